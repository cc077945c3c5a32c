use anyhow::Context;
use pubsub_client::PubSub;
use relay::Relay;
use relay_entrypoint::RelayEntrypoint;

mod api;
mod config;
mod relay;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let entrypoint = RelayEntrypoint::default()
        .service_name("storage_event_relay")
        .require(config::PROJECT_VAR)
        .require(config::TOPIC_VAR)
        .init();

    let config = config::Config::from_env(entrypoint.environment())
        .context("invalid environment variables")?;

    let topic = config.topic_path();

    let http_client = reqwest::Client::builder()
        .build()
        .context("unable to build http client")?;

    let pubsub = match config.emulator_host.as_deref() {
        Some(host) => {
            tracing::info!(host, "publishing to the pubsub emulator");
            PubSub::emulator(http_client, host)
        }
        None => {
            let provider = gcp_auth::provider()
                .await
                .context("unable to load application default credentials")?;
            PubSub::new(http_client, provider)
        }
    };

    api::setup_and_serve(config, Relay::new(pubsub, topic)).await
}
