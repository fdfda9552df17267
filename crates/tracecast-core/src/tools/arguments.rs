//! Strict parsing of model-generated tool arguments

use super::types::ToolError;
use crate::trace::ToolParams;
use serde_json::Value;

/// Parse a raw argument payload into a parameter map
///
/// Only a JSON object is accepted. Anything else, including valid JSON of
/// another shape, is rejected.
pub fn parse_arguments(tool: &str, raw: &str) -> Result<ToolParams, ToolError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(ToolParams::new());
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ToolError::invalid_arguments(
            tool,
            format!("expected a JSON object, got {}", json_kind(&other)),
        )),
        Err(e) => Err(ToolError::invalid_arguments(
            tool,
            format!("malformed JSON payload ({})", e),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
