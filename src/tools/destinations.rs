//! Static destination knowledge table.
//!
//! Pure lookups against a table built once at startup; no runtime mutation.

/// Returned verbatim whenever no destination matches the query.
pub const NO_DESTINATION_MATCH: &str = "No destination entry found in the travel database. \
Fall back to the general retrieval context for this query.";

const ANSWER_FROM_DETAILS: &str =
    "Answer the question using only the destination details above.";

#[derive(Debug, Clone)]
pub struct DestinationRecord {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub best_time: &'static str,
    pub activities: &'static [&'static str],
    pub avg_cost: &'static str,
}

#[derive(Debug, Clone)]
pub struct DestinationGuide {
    records: Vec<DestinationRecord>,
}

impl DestinationGuide {
    pub fn new() -> Self {
        Self {
            records: vec![
                DestinationRecord {
                    key: "maldives",
                    name: "Maldives",
                    description: "Tropical island paradise with overwater bungalows and coral reefs",
                    best_time: "November to April",
                    activities: &["snorkeling", "diving", "spa retreats", "sunset cruises"],
                    avg_cost: "$400-800 per night",
                },
                DestinationRecord {
                    key: "swiss alps",
                    name: "Swiss Alps",
                    description: "Alpine mountain region with ski resorts and scenic rail journeys",
                    best_time: "December to March for skiing, June to September for hiking",
                    activities: &["skiing", "snowboarding", "hiking", "mountain railways"],
                    avg_cost: "$250-500 per night",
                },
                DestinationRecord {
                    key: "african safari",
                    name: "African Safari",
                    description: "Guided wildlife viewing across savanna reserves",
                    best_time: "June to October",
                    activities: &["game drives", "hot air balloon rides", "bush camping", "photography"],
                    avg_cost: "$300-600 per night",
                },
            ],
        }
    }

    pub fn records(&self) -> &[DestinationRecord] {
        &self.records
    }

    /// Collects every record whose key or display name occurs in the query,
    /// case-insensitively. Misses return a byte-stable fallback string.
    pub fn lookup(&self, query: &str) -> String {
        let needle = query.to_lowercase();
        let matches: Vec<&DestinationRecord> = self
            .records
            .iter()
            .filter(|r| needle.contains(r.key) || needle.contains(&r.name.to_lowercase()))
            .collect();

        if matches.is_empty() {
            return NO_DESTINATION_MATCH.to_string();
        }

        let mut out = String::new();
        for record in &matches {
            out.push_str(&format!(
                "{}:\nDescription: {}\nBest time to visit: {}\nActivities: {}\nAverage cost: {}\n\n",
                record.name,
                record.description,
                record.best_time,
                record.activities.join(", "),
                record.avg_cost,
            ));
        }
        out.push_str(&format!("User query: {}\n{}", query, ANSWER_FROM_DETAILS));
        out
    }
}

impl Default for DestinationGuide {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive_and_returns_record_fields() {
        let guide = DestinationGuide::new();
        let result = guide.lookup("Tell me about the MALDIVES please");

        assert!(result.contains("Tropical island paradise with overwater bungalows and coral reefs"));
        assert!(result.contains("November to April"));
        assert!(result.contains("$400-800 per night"));
        assert!(result.contains("Tell me about the MALDIVES please"));
    }

    #[test]
    fn lookup_collects_every_match() {
        let guide = DestinationGuide::new();
        let result = guide.lookup("Compare the maldives with the swiss alps");

        assert!(result.contains("Maldives:"));
        assert!(result.contains("Swiss Alps:"));
        assert!(!result.contains("African Safari:"));
    }

    #[test]
    fn lookup_matches_on_display_name() {
        let guide = DestinationGuide::new();
        let result = guide.lookup("Is an African Safari worth it?");

        assert!(result.contains("Guided wildlife viewing across savanna reserves"));
    }

    #[test]
    fn miss_returns_identical_fallback_string() {
        let guide = DestinationGuide::new();

        assert_eq!(guide.lookup("What is a neural network?"), NO_DESTINATION_MATCH);
        assert_eq!(guide.lookup("something else entirely"), NO_DESTINATION_MATCH);
    }

    #[test]
    fn activities_are_joined_by_comma() {
        let guide = DestinationGuide::new();
        let result = guide.lookup("maldives");

        assert!(result.contains("snorkeling, diving, spa retreats, sunset cruises"));
    }
}
