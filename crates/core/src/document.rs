//! Document records
//!
//! A document is the unit stored under one key in a pack. On disk the key
//! travels inside the file as the synthetic `_key` field; in the store it is
//! the entry key and the payload is stored without it.

use crate::error::CodecError;
use serde_json::{Map, Value};

/// Synthetic field carrying the store key through document files
pub const KEY_FIELD: &str = "_key";

/// Display name field used for unpacked file names
pub const NAME_FIELD: &str = "name";

/// Document id field used as the file name suffix
pub const ID_FIELD: &str = "_id";

/// Structured document payload (field order preserved)
pub type Payload = Map<String, Value>;

/// A single compendium document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Store key (opaque, unique within one pack)
    pub key: String,
    /// Payload without the `_key` field
    pub payload: Payload,
}

impl Document {
    /// Create a document from a key and a payload
    pub fn new(key: impl Into<String>, payload: Payload) -> Self {
        Self {
            key: key.into(),
            payload,
        }
    }

    /// Build a document from a parsed source value
    ///
    /// The value must be a map carrying a non-empty string `_key`. The key
    /// is removed from the payload.
    pub fn from_value(value: Value) -> Result<Self, CodecError> {
        let fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(CodecError::NotAMap {
                    found: value_kind(&other),
                })
            }
        };

        let key = match fields.get(KEY_FIELD) {
            None => return Err(CodecError::MissingKey),
            Some(Value::String(key)) if !key.is_empty() => key.clone(),
            Some(_) => return Err(CodecError::InvalidKey),
        };

        // Rebuild rather than remove so the remaining field order is kept
        let payload = fields
            .into_iter()
            .filter(|(field, _)| field != KEY_FIELD)
            .collect();

        Ok(Self { key, payload })
    }

    /// Payload with `_key` injected, ready to be written to a file
    pub fn to_value(&self) -> Value {
        let mut fields = self.payload.clone();
        fields.insert(KEY_FIELD.to_string(), Value::String(self.key.clone()));
        Value::Object(fields)
    }

    /// Display name, if the payload has a non-empty string `name`
    pub fn name(&self) -> Option<&str> {
        non_empty_str(self.payload.get(NAME_FIELD))
    }

    /// Document id, if the payload has a non-empty string `_id`
    pub fn id(&self) -> Option<&str> {
        non_empty_str(self.payload.get(ID_FIELD))
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a map",
    }
}
