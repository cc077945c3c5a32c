//! Thin client over the Pub/Sub REST api, covering the one call the relay needs: `topics.publish`

mod error;
mod model;
mod token;
mod topic;

pub use error::{PublishErr, TokenErr};
pub use token::TokenSource;
pub use topic::{TopicPath, TopicPathErr};

use error::check_status;
use model::{PublishRequest, PublishResponse, PubsubMessage};
use std::sync::Arc;

pub static DEFAULT_ENDPOINT: &str = "https://pubsub.googleapis.com";

#[derive(Clone, Debug)]
pub struct PubSub {
    client: reqwest::Client,
    endpoint: String,
    token_source: TokenSource,
}

impl PubSub {
    /// Client for the production api, authenticated with Application Default Credentials
    pub fn new(client: reqwest::Client, provider: Arc<dyn gcp_auth::TokenProvider>) -> Self {
        Self::with_token_source(
            client,
            DEFAULT_ENDPOINT,
            TokenSource::ApplicationDefault(provider),
        )
    }

    /// Client for any endpoint speaking the Pub/Sub REST api
    pub fn with_token_source(
        client: reqwest::Client,
        endpoint: &str,
        token_source: TokenSource,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token_source,
        }
    }

    /// Client for a local emulator listening on `host` (e.g. `localhost:8085`), which needs no credentials
    pub fn emulator(client: reqwest::Client, host: &str) -> Self {
        Self::with_token_source(client, &format!("http://{host}"), TokenSource::Anonymous)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn publish_url(&self, topic: &TopicPath) -> String {
        format!("{}/v1/{}:publish", self.endpoint, topic)
    }

    /// Publishes a single message and waits for the server to acknowledge it.
    /// Returns the server assigned message id
    #[tracing::instrument(err, skip(self, topic, data), fields(topic = %topic, bytes = data.len()))]
    pub async fn publish(&self, topic: &TopicPath, data: &[u8]) -> Result<String, PublishErr> {
        let body = PublishRequest {
            messages: vec![PubsubMessage::new(data)],
        };

        let mut request = self.client.post(self.publish_url(topic)).json(&body);
        if let Some(token) = self.token_source.bearer().await? {
            request = request.bearer_auth(token);
        }

        let response = check_status(request.send().await?).await?;
        let response = response.json::<PublishResponse>().await?;

        response
            .message_ids
            .into_iter()
            .next()
            .ok_or(PublishErr::MissingMessageId)
    }
}
