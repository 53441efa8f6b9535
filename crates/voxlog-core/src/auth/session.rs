use std::sync::Arc;

use tracing::{debug, warn};

use crate::auth::TokenStore;

/// Process-wide authentication state, derived from the token store.
///
/// There is exactly one `Session` per front-end process; consumers receive a
/// reference rather than reaching for a global. Invariant:
/// `is_authenticated() == token().is_some()`.
///
/// The session never talks to the network and never inspects the token
/// contents; expiry is the backend's problem, reported as a 401 on the next
/// request.
pub struct Session {
    store: Arc<dyn TokenStore>,
    token: Option<String>,
}

impl Session {
    /// Rehydrate from the store. This happens exactly once per process; a
    /// store read failure degrades to an unauthenticated session.
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        let token = match store.load() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to read token store, starting unauthenticated");
                None
            }
        };
        debug!(authenticated = token.is_some(), "Session initialized");
        Self { store, token }
    }

    /// Persist the token, then mark the session authenticated. A persist
    /// failure is logged; the in-memory state still updates so the current
    /// process keeps working.
    pub fn login(&mut self, token: String) {
        if let Err(e) = self.store.save(&token) {
            warn!(error = %e, "Failed to persist token");
        }
        self.token = Some(token);
    }

    /// Clear the stored token, then mark the session unauthenticated.
    /// Idempotent.
    pub fn logout(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear token store");
        }
        self.token = None;
    }

    /// The bearer token, if the session is authenticated.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenStore;

    #[test]
    fn empty_store_starts_unauthenticated() {
        let session = Session::new(Arc::new(MemoryTokenStore::new()));
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn rehydrates_from_persisted_token() {
        let store = Arc::new(MemoryTokenStore::new());
        store.save("persisted").unwrap();

        let session = Session::new(store);
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("persisted"));
    }

    #[test]
    fn login_persists_and_authenticates() {
        let store = Arc::new(MemoryTokenStore::new());
        let mut session = Session::new(Arc::clone(&store) as Arc<dyn TokenStore>);

        session.login("abc123".to_string());

        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("abc123"));
        assert_eq!(store.load().unwrap().as_deref(), Some("abc123"));
    }

    #[test]
    fn logout_clears_store_and_state() {
        let store = Arc::new(MemoryTokenStore::new());
        let mut session = Session::new(Arc::clone(&store) as Arc<dyn TokenStore>);
        session.login("abc123".to_string());

        session.logout();

        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
        assert_eq!(store.load().unwrap(), None);

        // A second logout changes nothing.
        session.logout();
        assert!(!session.is_authenticated());
    }
}
