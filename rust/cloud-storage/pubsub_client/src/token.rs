use crate::error::TokenErr;
use std::sync::Arc;

/// oauth scope required by `topics.publish`
pub(crate) static PUBSUB_SCOPE: &str = "https://www.googleapis.com/auth/pubsub";

/// Where the bearer token attached to publish requests comes from
#[derive(Clone)]
pub enum TokenSource {
    /// Application Default Credentials: `GOOGLE_APPLICATION_CREDENTIALS`, gcloud user
    /// credentials, or the metadata server. Caching and refresh happen inside the provider
    ApplicationDefault(Arc<dyn gcp_auth::TokenProvider>),
    /// Send requests without an `Authorization` header, used against the emulator
    Anonymous,
    #[cfg(test)]
    Fixed(&'static str),
}

impl std::fmt::Debug for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenSource::ApplicationDefault(_) => f.write_str("ApplicationDefault"),
            TokenSource::Anonymous => f.write_str("Anonymous"),
            #[cfg(test)]
            TokenSource::Fixed(_) => f.write_str("Fixed"),
        }
    }
}

impl TokenSource {
    pub(crate) async fn bearer(&self) -> Result<Option<String>, TokenErr> {
        match self {
            TokenSource::ApplicationDefault(provider) => {
                let token = provider.token(&[PUBSUB_SCOPE]).await?;
                Ok(Some(token.as_str().to_string()))
            }
            TokenSource::Anonymous => Ok(None),
            #[cfg(test)]
            TokenSource::Fixed(token) => Ok(Some(token.to_string())),
        }
    }
}
