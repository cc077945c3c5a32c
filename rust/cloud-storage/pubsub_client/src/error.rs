use reqwest::Response;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("unable to obtain access token: {0}")]
pub struct TokenErr(#[from] gcp_auth::Error);

#[derive(Debug, Error)]
pub enum PublishErr {
    #[error(transparent)]
    Token(#[from] TokenErr),
    #[error("publish request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("pubsub returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("publish response did not contain a message id")]
    MissingMessageId,
}

/// Passes successful responses through, otherwise reads the status and body text into a [PublishErr::Status]
pub(crate) async fn check_status(response: Response) -> Result<Response, PublishErr> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    Err(PublishErr::Status { status, message })
}
