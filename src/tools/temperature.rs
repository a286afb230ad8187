//! Static average-temperature table.

/// Returned verbatim for any unsupported destination.
pub const UNSUPPORTED_DESTINATION: &str = "Sorry, temperature data is only available \
for the Maldives, the Swiss Alps, and African safaris.";

#[derive(Debug, Clone)]
pub struct TemperatureTable {
    entries: Vec<(&'static str, &'static str)>,
}

impl TemperatureTable {
    pub fn new() -> Self {
        Self {
            entries: vec![
                ("maldives", "82°F (28°C)"),
                ("swiss alps", "45°F (7°C)"),
                ("african safari", "75°F (24°C)"),
            ],
        }
    }

    /// Exact match on the lowercase-normalized key; the success message keeps
    /// the caller's original casing.
    pub fn lookup(&self, destination: &str) -> String {
        let key = destination.trim().to_lowercase();
        match self.entries.iter().find(|(k, _)| *k == key) {
            Some((_, temperature)) => {
                format!("The average temperature in {} is {}.", destination, temperature)
            }
            None => UNSUPPORTED_DESTINATION.to_string(),
        }
    }
}

impl Default for TemperatureTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_preserves_caller_casing() {
        let table = TemperatureTable::new();
        let result = table.lookup("MALDIVES");

        assert!(result.contains("MALDIVES"));
        assert!(result.contains("82°F (28°C)"));
    }

    #[test]
    fn lookup_is_exact_match_only() {
        let table = TemperatureTable::new();

        // no partial or fuzzy matching
        assert_eq!(table.lookup("maldive"), UNSUPPORTED_DESTINATION);
        assert_eq!(table.lookup("the swiss alps"), UNSUPPORTED_DESTINATION);
    }

    #[test]
    fn miss_message_is_independent_of_input() {
        let table = TemperatureTable::new();

        assert_eq!(table.lookup("Mars"), table.lookup("Atlantis"));
        assert_eq!(table.lookup("Mars"), UNSUPPORTED_DESTINATION);
    }

    #[test]
    fn all_three_destinations_resolve() {
        let table = TemperatureTable::new();

        assert!(table.lookup("swiss alps").contains("45°F (7°C)"));
        assert!(table.lookup("African Safari").contains("75°F (24°C)"));
        assert!(table.lookup("maldives").contains("82°F (28°C)"));
    }
}
