//! Credential storage for the active session.
//!
//! The gateway reads the current token on every outgoing call and forces a
//! logout when the backend rejects the session. The store itself stays
//! process-local; persisting across restarts (the browser build keeps both
//! slots in localStorage) is the embedder's concern, wired up through the
//! logout hook and the setters.

use arc_swap::ArcSwapOption;
use serde_json::Value;
use std::sync::{Arc, RwLock};

/// Holder of the current authentication state, as seen by the gateway.
pub trait CredentialStore: Send + Sync {
    /// Current bearer token, if a session is active.
    fn token(&self) -> Option<String>;

    /// Replace the current token. `None` clears it.
    fn set_token(&self, token: Option<String>);

    /// Replace the current user payload. `None` clears it.
    fn set_user(&self, user: Option<Value>);

    /// Invoked by the gateway when the backend answers 401: the session is
    /// gone and the application must return to the login screen.
    fn on_auth_failure(&self);
}

type LogoutHook = Box<dyn Fn() + Send + Sync>;

/// In-memory credential store with hot-swappable slots.
///
/// Token and user are read on every call and replaced rarely, so both live
/// in lock-free [`ArcSwapOption`] slots. The optional logout hook runs after
/// the slots are cleared; a UI embedding typically redirects to the login
/// route there.
#[derive(Default)]
pub struct SessionCredentials {
    token: ArcSwapOption<String>,
    user: ArcSwapOption<Value>,
    on_logout: RwLock<Option<LogoutHook>>,
}

impl SessionCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logout_hook(hook: impl Fn() + Send + Sync + 'static) -> Self {
        let credentials = Self::new();
        credentials.set_logout_hook(hook);
        credentials
    }

    /// Register the hook run after a logout clears the session.
    pub fn set_logout_hook(&self, hook: impl Fn() + Send + Sync + 'static) {
        if let Ok(mut slot) = self.on_logout.write() {
            *slot = Some(Box::new(hook));
        }
    }

    /// Current user payload, opaque to this crate.
    pub fn user(&self) -> Option<Arc<Value>> {
        self.user.load_full()
    }

    /// A session is authenticated once both token and user are known.
    pub fn is_authenticated(&self) -> bool {
        self.token.load().is_some() && self.user.load().is_some()
    }

    /// Clear both slots and run the logout hook.
    pub fn logout(&self) {
        self.token.store(None);
        self.user.store(None);
        if let Ok(slot) = self.on_logout.read() {
            if let Some(hook) = slot.as_ref() {
                hook();
            }
        }
    }
}

impl CredentialStore for SessionCredentials {
    fn token(&self) -> Option<String> {
        self.token.load_full().map(|token| (*token).clone())
    }

    fn set_token(&self, token: Option<String>) {
        self.token.store(token.map(Arc::new));
    }

    fn set_user(&self, user: Option<Value>) {
        self.user.store(user.map(Arc::new));
    }

    fn on_auth_failure(&self) {
        self.logout();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_empty_store_is_unauthenticated() {
        let credentials = SessionCredentials::new();
        assert_eq!(credentials.token(), None);
        assert!(credentials.user().is_none());
        assert!(!credentials.is_authenticated());
    }

    #[test]
    fn test_authenticated_requires_token_and_user() {
        let credentials = SessionCredentials::new();
        credentials.set_token(Some("tok".to_string()));
        assert!(!credentials.is_authenticated());

        credentials.set_user(Some(json!({"id": 1, "username": "alice"})));
        assert!(credentials.is_authenticated());
        assert_eq!(credentials.token().as_deref(), Some("tok"));
    }

    #[test]
    fn test_auth_failure_clears_session_and_fires_hook() {
        let fired = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&fired);
        let credentials = SessionCredentials::with_logout_hook(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        credentials.set_token(Some("tok".to_string()));
        credentials.set_user(Some(json!({"id": 1})));

        credentials.on_auth_failure();

        assert_eq!(credentials.token(), None);
        assert!(credentials.user().is_none());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
