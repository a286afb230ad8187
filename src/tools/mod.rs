//! Registered callable functions exposed to the chat model.
//!
//! The registry owns the static lookup tables, describes each function with a
//! name, description and schema for the model's tool-choice protocol, and
//! dispatches incoming calls.

pub mod destinations;
pub mod temperature;

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::core::errors::AppError;
use crate::rag::augment::build_augmented_prompt;
use destinations::DestinationGuide;
use temperature::TemperatureTable;

#[derive(Debug, Deserialize, JsonSchema)]
struct AugmentArgs {
    /// The user's travel question.
    query: String,
    /// Retrieved context the answer must be grounded in.
    retrieval_context: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct TemperatureArgs {
    /// Destination name, e.g. "Maldives".
    destination: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct DestinationInfoArgs {
    /// The user query to scan for known destinations.
    query: String,
}

pub struct ToolRegistry {
    destinations: DestinationGuide,
    temperatures: TemperatureTable,
}

impl ToolRegistry {
    pub fn new(destinations: DestinationGuide, temperatures: TemperatureTable) -> Self {
        Self {
            destinations,
            temperatures,
        }
    }

    /// Tool descriptions in the wire format the chat endpoint expects.
    pub fn specs(&self) -> Vec<Value> {
        vec![
            tool_spec::<AugmentArgs>(
                "build_augmented_prompt",
                "Build a retrieval-augmented prompt instructing the model to answer a \
                 travel query using only the supplied context.",
            ),
            tool_spec::<TemperatureArgs>(
                "get_destination_temperature",
                "Get the average temperature for a supported travel destination.",
            ),
            tool_spec::<DestinationInfoArgs>(
                "get_destination_info",
                "Look up structured travel details for any destination mentioned in the query.",
            ),
        ]
    }

    pub fn execute(&self, name: &str, args: &Value) -> Result<String, AppError> {
        match name {
            "build_augmented_prompt" => {
                let args: AugmentArgs = parse_args(args)?;
                Ok(build_augmented_prompt(&args.query, &args.retrieval_context))
            }
            "get_destination_temperature" => {
                let args: TemperatureArgs = parse_args(args)?;
                Ok(self.temperatures.lookup(&args.destination))
            }
            "get_destination_info" => {
                let args: DestinationInfoArgs = parse_args(args)?;
                Ok(self.destinations.lookup(&args.query))
            }
            _ => Err(AppError::BadRequest(format!("Unknown tool: {}", name))),
        }
    }
}

fn parse_args<T: DeserializeOwned>(args: &Value) -> Result<T, AppError> {
    serde_json::from_value(args.clone())
        .map_err(|e| AppError::BadRequest(format!("Invalid tool arguments: {}", e)))
}

fn tool_spec<T: JsonSchema>(name: &str, description: &str) -> Value {
    json!({
        "type": "function",
        "function": {
            "name": name,
            "description": description,
            "parameters": schema_for!(T),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ToolRegistry {
        ToolRegistry::new(DestinationGuide::new(), TemperatureTable::new())
    }

    #[test]
    fn specs_describe_all_three_registered_functions() {
        let specs = registry().specs();
        let names: Vec<&str> = specs
            .iter()
            .filter_map(|s| s["function"]["name"].as_str())
            .collect();

        assert_eq!(
            names,
            vec![
                "build_augmented_prompt",
                "get_destination_temperature",
                "get_destination_info"
            ]
        );
        for spec in &specs {
            assert_eq!(spec["type"], "function");
            assert!(spec["function"]["parameters"].is_object());
        }
    }

    #[test]
    fn execute_dispatches_to_temperature_lookup() {
        let result = registry()
            .execute(
                "get_destination_temperature",
                &json!({ "destination": "Maldives" }),
            )
            .expect("dispatch works");

        assert!(result.contains("82°F (28°C)"));
    }

    #[test]
    fn execute_dispatches_to_destination_info() {
        let result = registry()
            .execute("get_destination_info", &json!({ "query": "swiss alps trip" }))
            .expect("dispatch works");

        assert!(result.contains("Alpine mountain region"));
    }

    #[test]
    fn execute_builds_augmented_prompt() {
        let result = registry()
            .execute(
                "build_augmented_prompt",
                &json!({ "query": "insurance?", "retrieval_context": "Document: policy text" }),
            )
            .expect("dispatch works");

        assert!(result.contains("Retrieved Context:"));
        assert!(result.contains("Document: policy text"));
        assert!(result.contains("insurance?"));
    }

    #[test]
    fn unknown_tool_is_rejected() {
        let err = registry().execute("launch_rocket", &json!({})).unwrap_err();
        assert!(err.to_string().contains("Unknown tool"));
    }

    #[test]
    fn invalid_arguments_are_rejected() {
        let err = registry()
            .execute("get_destination_temperature", &json!({ "dest": "Maldives" }))
            .unwrap_err();
        assert!(err.to_string().contains("Invalid tool arguments"));
    }
}
