use pubsub_client::{PubSub, TopicPath};

/// Outbound port for handing a message to the queue
#[cfg_attr(test, mockall::automock)]
pub trait Publisher: Send + Sync + 'static {
    /// publish `data` to `topic`, resolving once the queue acknowledged it with a message id
    fn publish(
        &self,
        topic: &TopicPath,
        data: Vec<u8>,
    ) -> impl Future<Output = anyhow::Result<String>> + Send;
}

impl Publisher for PubSub {
    async fn publish(&self, topic: &TopicPath, data: Vec<u8>) -> anyhow::Result<String> {
        Ok(PubSub::publish(self, topic, &data).await?)
    }
}
