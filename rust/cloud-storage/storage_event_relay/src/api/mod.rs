mod cloud_event;
pub mod context;
mod event;
mod health;

use crate::{
    config::Config,
    relay::{Publisher, Relay},
};
use anyhow::Context;
use axum::{Router, extract::DefaultBodyLimit};
use context::AppState;
use std::sync::Arc;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// storage notifications are small, anything past this is not one
static MAX_REQUEST_SIZE: usize = 10 * 1024 * 1024;

pub fn app<P: Publisher>(relay: Relay<P>) -> Router {
    let state = AppState {
        relay: Arc::new(relay),
    };

    Router::new()
        .merge(event::router())
        .merge(health::router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_SIZE))
}

pub async fn setup_and_serve<P: Publisher>(config: Config, relay: Relay<P>) -> anyhow::Result<()> {
    let topic = relay.topic().map(ToString::to_string);
    let app = app(relay);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .with_context(|| format!("unable to bind port {}", config.port))?;

    tracing::info!(
        environment = %config.environment,
        port = config.port,
        topic = ?topic,
        "storage_event_relay listening"
    );

    axum::serve(listener, app.into_make_service())
        .await
        .context("error starting service")
}
