use super::payload::EventData;
use std::collections::BTreeMap;

/// An inbound event as handed to the relay: its attributes and optional data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CloudEvent {
    pub attributes: BTreeMap<String, String>,
    pub data: Option<EventData>,
}

impl CloudEvent {
    pub fn new(data: Option<EventData>) -> Self {
        Self {
            attributes: BTreeMap::new(),
            data,
        }
    }

    #[cfg(test)]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.attributes.get("id").map(String::as_str)
    }

    /// the data, if there is any worth processing
    pub fn into_data(self) -> Option<EventData> {
        self.data.filter(|data| !data.is_empty())
    }
}
