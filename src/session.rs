//! Shared handle to the current bearer token.
//!
//! The auth store is the only writer. The HTTP layer reads the token on every
//! request, so logging out takes effect for all services at once.

use std::sync::{Arc, RwLock};

use zeroize::Zeroizing;

#[derive(Clone, Default)]
pub struct SessionHandle {
    token: Arc<RwLock<Option<Zeroizing<String>>>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle pre-loaded with a token (tests, CLI one-shots).
    pub fn with_token(token: impl Into<String>) -> Self {
        let handle = Self::new();
        handle.set_token(token.into());
        handle
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|t| t.as_str().to_string()))
    }

    pub fn is_active(&self) -> bool {
        self.token
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    pub(crate) fn set_token(&self, token: String) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(Zeroizing::new(token));
        }
    }

    /// Drops the token; its memory is wiped on drop.
    pub(crate) fn clear(&self) {
        if let Ok(mut guard) = self.token.write() {
            guard.take();
        }
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("active", &self.is_active())
            .finish()
    }
}
