use serde_json::{Map, Value};

/// The fields of a storage notification the relay cares about.
/// Every field is optional, a missing key is not an error
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorageObject {
    pub name: Option<Value>,
    pub bucket: Option<Value>,
    pub size: Option<Value>,
    pub content_type: Option<Value>,
}

impl StorageObject {
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        let field = |key: &str| payload.get(key).filter(|v| !v.is_null()).cloned();

        Self {
            name: field("name"),
            bucket: field("bucket"),
            size: field("size"),
            content_type: field("contentType"),
        }
    }
}

/// The record published downstream for every created object
#[derive(Debug, Clone, PartialEq)]
pub struct FileSummary {
    pub file_name: Option<Value>,
    pub file_size: Option<Value>,
    pub file_format: Option<Value>,
}

impl From<StorageObject> for FileSummary {
    fn from(object: StorageObject) -> Self {
        Self {
            file_name: object.name,
            file_size: object.size,
            file_format: object.content_type,
        }
    }
}

impl FileSummary {
    /// Always exactly `fileName`, `fileSize` and `fileFormat`, absent values are `null`
    pub fn to_value(&self) -> Value {
        let field = |value: &Option<Value>| value.clone().unwrap_or(Value::Null);

        Value::Object(Map::from_iter([
            ("fileName".to_string(), field(&self.file_name)),
            ("fileSize".to_string(), field(&self.file_size)),
            ("fileFormat".to_string(), field(&self.file_format)),
        ]))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_value().to_string().into_bytes()
    }
}
