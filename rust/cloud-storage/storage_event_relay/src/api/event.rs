use super::{
    cloud_event::{self, CloudEventErr},
    context::AppState,
};
use crate::relay::Publisher;
use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
};

/// Receives a CloudEvent and hands it to the relay.
/// Once decoded the event is always acknowledged, the delivery system is never asked to retry
#[tracing::instrument(skip_all)]
async fn handler<P: Publisher>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, CloudEventErr> {
    let event = cloud_event::from_http(&headers, body).inspect_err(|err| {
        tracing::warn!(error = %err, "rejecting undecodable cloud event");
    })?;

    let outcome = state.relay.handle(event).await;
    tracing::debug!(outcome = ?outcome, "event handled");

    Ok(StatusCode::OK)
}

pub fn router<P: Publisher>() -> Router<AppState<P>> {
    Router::new().route("/", post(handler::<P>))
}
