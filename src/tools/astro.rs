//! Astrology reading tool: echoes validated user data back to the model.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{Tool, ToolError};

/// Field order is part of the tool's contract; the rendered block always
/// lists them in this sequence.
const FIELDS: [(&str, &str); 7] = [
    ("name", "Name"),
    ("dob", "Date of Birth"),
    ("tob", "Time of Birth"),
    ("pob", "Place of Birth"),
    ("gender", "Gender"),
    ("palmLeft", "Palm Image 1"),
    ("palmRight", "Palm Image 2"),
];

/// The `Astro_AI` tool.
///
/// Pure formatting: no side effects, no external calls. Given the seven
/// required string fields it produces a deterministic labeled block the
/// model folds into its report.
pub struct AstroReading;

#[async_trait]
impl Tool for AstroReading {
    fn name(&self) -> &str {
        "Astro_AI"
    }

    fn description(&self) -> &str {
        "Astrology prediction system. Accepts the user's biodata and palm image URLs and returns them as a structured block for the reading."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "name of the user"
                },
                "dob": {
                    "type": "string",
                    "description": "date of birth of the user"
                },
                "tob": {
                    "type": "string",
                    "description": "time of birth of the user"
                },
                "pob": {
                    "type": "string",
                    "description": "place of birth of the user"
                },
                "gender": {
                    "type": "string",
                    "description": "gender of the user"
                },
                "palmLeft": {
                    "type": "string",
                    "description": "left palm image of the user"
                },
                "palmRight": {
                    "type": "string",
                    "description": "right palm image of the user"
                }
            },
            "required": ["name", "dob", "tob", "pob", "gender", "palmLeft", "palmRight"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String, ToolError> {
        let mut lines = vec!["User Info:".to_string()];

        for (key, label) in FIELDS {
            let value = match args.get(key) {
                Some(Value::String(s)) => s,
                Some(_) => {
                    return Err(ToolError::InvalidArguments {
                        tool: self.name().to_string(),
                        reason: format!("field '{}' must be a string", key),
                    })
                }
                None => {
                    return Err(ToolError::InvalidArguments {
                        tool: self.name().to_string(),
                        reason: format!("missing required field '{}'", key),
                    })
                }
            };
            lines.push(format!("- {}: {}", label, value));
        }

        Ok(lines.join("\n"))
    }
}
