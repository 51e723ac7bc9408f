//! Bearer-token session shared between the transport and the login flow.

use std::sync::{Arc, RwLock};

/// Shared handle to the current bearer token.
///
/// Clones point at the same token. The login and logout paths are the only
/// writers; every outgoing request reads the token at send time.
#[derive(Clone, Default, Debug)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session that starts out holding `token`.
    pub fn with_token(token: &str) -> Self {
        let session = Self::new();
        session.set_token(token);
        session
    }

    pub fn set_token(&self, token: &str) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
    }

    pub fn clear(&self) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }
}
