use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::AppError;

/// Cloud Storage object notification that triggers a redaction job
///
/// Only `name` is required to submit a job. The remaining fields are kept for
/// logging. Numeric fields arrive as strings in the storage JSON API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadEvent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bucket: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub generation: Option<String>,
    #[serde(default)]
    pub time_created: Option<String>,
}

impl UploadEvent {
    /// Parse an event body.
    ///
    /// Accepts the storage object itself (CloudEvents binary mode) or the
    /// background-function envelope `{"data": {...}, "context": {...}}`.
    pub fn from_json(body: JsonValue) -> Result<Self, AppError> {
        let object = match body {
            JsonValue::Object(mut map) => match map.remove("data") {
                Some(data @ JsonValue::Object(_)) => data,
                Some(other) => {
                    map.insert("data".to_string(), other);
                    JsonValue::Object(map)
                }
                None => JsonValue::Object(map),
            },
            other => {
                return Err(AppError::InvalidInput(format!(
                    "Upload event must be a JSON object, got {}",
                    json_kind(&other)
                )))
            }
        };

        Ok(serde_json::from_value(object)?)
    }

    /// Name of the uploaded object; missing or empty names are a malformed event.
    pub fn object_name(&self) -> Result<&str, AppError> {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => Ok(name),
            Some(_) => Err(AppError::InvalidInput(
                "Upload event has an empty object name".to_string(),
            )),
            None => Err(AppError::InvalidInput(
                "Upload event is missing the object name".to_string(),
            )),
        }
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
