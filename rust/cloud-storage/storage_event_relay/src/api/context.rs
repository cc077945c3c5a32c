use crate::relay::Relay;
use std::sync::Arc;

pub struct AppState<P> {
    pub relay: Arc<Relay<P>>,
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            relay: self.relay.clone(),
        }
    }
}
