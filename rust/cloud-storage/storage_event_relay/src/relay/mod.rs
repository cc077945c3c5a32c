//! Turns one storage notification into one queue message

mod envelope;
mod payload;
mod publisher;
mod summary;


pub use envelope::CloudEvent;
pub use payload::{EventData, PayloadErr};
pub use publisher::Publisher;
pub use summary::{FileSummary, StorageObject};

#[cfg(test)]
pub use publisher::MockPublisher;

use pubsub_client::TopicPath;
use serde_json::{Map, Value};

/// What happened to a single event. None of these are errors from the caller's point of view
#[derive(Debug)]
pub enum RelayOutcome {
    /// the summary was acknowledged by the queue
    Published { message_id: String },
    /// the event carried no data, or an empty object
    NoPayload,
    /// the data could not be turned into a notification
    MalformedPayload(PayloadErr),
    /// the queue did not accept the summary
    PublishFailed(anyhow::Error),
}

/// The long lived half of the relay: where summaries go and how they get there.
/// Built once at startup and shared read only between invocations
#[derive(Debug)]
pub struct Relay<P> {
    publisher: P,
    topic: Option<TopicPath>,
}

impl<P: Publisher> Relay<P> {
    /// `topic` is `None` when the destination was not configured, every publish then fails
    pub fn new(publisher: P, topic: Option<TopicPath>) -> Self {
        Self { publisher, topic }
    }

    pub fn topic(&self) -> Option<&TopicPath> {
        self.topic.as_ref()
    }

    /// Handles a single event. Every failure is logged and reported through the [RelayOutcome]
    #[tracing::instrument(skip_all, fields(event_id = event.id()))]
    pub async fn handle(&self, event: CloudEvent) -> RelayOutcome {
        tracing::info!(attributes = ?event.attributes, "received a cloud storage event");

        let Some(data) = event.into_data() else {
            tracing::warn!("no data found in the cloud event, skipping");
            return RelayOutcome::NoPayload;
        };

        let payload = match data.normalize() {
            Ok(payload) => payload,
            Err(err) => {
                match &err {
                    PayloadErr::Json { raw, source } => {
                        tracing::error!(error = %source, raw_data = %raw, "error decoding JSON payload");
                    }
                    other => {
                        tracing::error!(error = %other, "unexpected error while processing data");
                    }
                }
                return RelayOutcome::MalformedPayload(err);
            }
        };

        if payload.is_empty() {
            tracing::warn!("data is an empty object, skipping");
            return RelayOutcome::NoPayload;
        }

        let message_data = summarize(&payload).to_bytes();

        match self.publish(message_data).await {
            Ok(message_id) => {
                tracing::info!(
                    message_id = %message_id,
                    topic = ?self.topic.as_ref().map(TopicPath::topic_id),
                    "published message"
                );
                RelayOutcome::Published { message_id }
            }
            Err(err) => {
                tracing::error!(error = ?err, "failed to publish message");
                RelayOutcome::PublishFailed(err)
            }
        }
    }

    async fn publish(&self, data: Vec<u8>) -> anyhow::Result<String> {
        let topic = self
            .topic
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("no topic is configured"))?;

        self.publisher.publish(topic, data).await
    }
}

/// Projects the notification into the record that gets published
fn summarize(payload: &Map<String, Value>) -> FileSummary {
    let object = StorageObject::from_payload(payload);

    tracing::info!(
        file_name = ?object.name,
        bucket = ?object.bucket,
        size = ?object.size,
        content_type = ?object.content_type,
        "processing file"
    );

    FileSummary::from(object)
}
