use base64::{Engine, engine::general_purpose};
use serde::{Deserialize, Serialize};

/// Request body of `topics.publish`
#[derive(Debug, Serialize)]
pub struct PublishRequest {
    pub messages: Vec<PubsubMessage>,
}

#[derive(Debug, Serialize)]
pub struct PubsubMessage {
    /// base64 encoded message payload
    pub data: String,
}

impl PubsubMessage {
    pub fn new(data: &[u8]) -> Self {
        Self {
            data: general_purpose::STANDARD.encode(data),
        }
    }
}

/// Response body of `topics.publish`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResponse {
    #[serde(default)]
    pub message_ids: Vec<String>,
}
