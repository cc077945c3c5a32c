use anyhow::Context;
use pubsub_client::TopicPath;
use relay_entrypoint::Environment;

static DEFAULT_PORT: u16 = 8080;

/// project the destination topic lives in
pub const PROJECT_VAR: &str = "GCP_PROJECT";
/// topic file summaries are published to
pub const TOPIC_VAR: &str = "PUBSUB_TOPIC_ID";

#[derive(Debug, Clone)]
pub struct Config {
    /// self explanatory
    pub environment: Environment,
    /// port to listen for events on (8080)
    pub port: u16,
    /// GCP_PROJECT, the project the destination topic lives in
    pub project_id: Option<String>,
    /// PUBSUB_TOPIC_ID, the topic file summaries are published to
    pub topic_id: Option<String>,
    /// PUBSUB_EMULATOR_HOST, publish to a local emulator instead of the real api
    pub emulator_host: Option<String>,
}

impl Config {
    pub fn from_env(environment: Environment) -> anyhow::Result<Self> {
        Self::from_lookup(environment, |name| std::env::var(name).ok())
    }

    fn from_lookup<F>(environment: Environment, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(port) => port
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port, got {port}"))?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            environment,
            port,
            project_id: non_empty(PROJECT_VAR),
            topic_id: non_empty(TOPIC_VAR),
            emulator_host: non_empty("PUBSUB_EMULATOR_HOST"),
        })
    }

    /// The destination topic, `None` when the project or topic is missing.
    /// The service keeps running but nothing can be published
    pub fn topic_path(&self) -> Option<TopicPath> {
        TopicPath::new(self.project_id.as_deref()?, self.topic_id.as_deref()?).ok()
    }
}
