use serde_json::{Map, Value};
use thiserror::Error;

/// The data carried by an inbound event. Its shape is only known once the event arrives
#[derive(Debug, Clone, PartialEq)]
pub enum EventData {
    /// already decoded JSON object
    Structured(Map<String, Value>),
    /// raw bytes expected to hold UTF-8 JSON
    Bytes(Vec<u8>),
    /// text expected to hold JSON
    Text(String),
}

#[derive(Debug, Error)]
pub enum PayloadErr {
    #[error("Error decoding JSON payload: {source}")]
    Json {
        /// the text that failed to parse
        raw: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("payload is a JSON {0}, expected an object")]
    NotAnObject(&'static str),
}

impl EventData {
    /// Zero length bytes or text, or an empty structured object. Treated the same as missing data.
    /// Bytes and text holding `{}` are only known to be empty after [EventData::normalize]
    pub fn is_empty(&self) -> bool {
        match self {
            EventData::Structured(map) => map.is_empty(),
            EventData::Bytes(bytes) => bytes.is_empty(),
            EventData::Text(text) => text.is_empty(),
        }
    }

    /// Resolves the payload into the canonical JSON object the fields are read from
    pub fn normalize(self) -> Result<Map<String, Value>, PayloadErr> {
        let raw = match self {
            EventData::Structured(map) => return Ok(map),
            EventData::Bytes(bytes) => String::from_utf8(bytes)?,
            EventData::Text(text) => text,
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(PayloadErr::NotAnObject(json_kind(&other))),
            Err(source) => Err(PayloadErr::Json { raw, source }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
