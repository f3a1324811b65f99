use std::sync::{Arc, RwLock};

/// Shared bearer-token store. The [`crate::api::ApiClient`] attaches the token
/// to every request and clears it when the backend answers 401, so every view
/// holding a clone observes the logout at once.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().unwrap() = Some(token.into());
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap().clone()
    }

    pub fn clear(&self) {
        *self.token.write().unwrap() = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().unwrap().is_some()
    }
}
