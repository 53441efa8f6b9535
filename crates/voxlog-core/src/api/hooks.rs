//! Cross-cutting request/response policies for the API client.
//!
//! Hooks are small, total, side-effecting steps composed into an ordered
//! pipeline by [`crate::api::ApiClient`]: request hooks run before every
//! send, response hooks run on every received status. Hooks observe; they
//! never swallow a response or fail a request.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use reqwest::{RequestBuilder, StatusCode};
use tracing::{debug, warn};

use crate::auth::TokenStore;

/// Runs before a request is sent; may rewrite the builder.
pub trait RequestHook: Send + Sync {
    fn apply(&self, request: RequestBuilder) -> RequestBuilder;
}

/// Runs on the status of every received response.
pub trait ResponseHook: Send + Sync {
    fn inspect(&self, status: StatusCode);
}

/// Navigation command target for forced logouts. Front-ends decide what a
/// "hard redirect to the login view" means in their world.
pub trait Navigator: Send + Sync {
    fn redirect_to_login(&self);
}

/// Latch [`Navigator`]: remembers that a redirect was requested until the
/// front-end consumes it. Any number of concurrent failures collapse into
/// one observable navigation.
#[derive(Clone, Default)]
pub struct RedirectFlag {
    flag: Arc<AtomicBool>,
}

impl RedirectFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending redirect, if any. Returns `true` at most once
    /// per batch of rejections.
    pub fn take(&self) -> bool {
        self.flag.swap(false, Ordering::SeqCst)
    }
}

impl Navigator for RedirectFlag {
    fn redirect_to_login(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }
}

/// Request hook: attach the persisted bearer token when one exists.
///
/// Reads the token store directly, not the session context, so a request
/// always carries the latest persisted value even if an in-memory session
/// elsewhere is stale. A missing token is fine; the auth endpoints are
/// public.
pub struct BearerAuth {
    store: Arc<dyn TokenStore>,
}

impl BearerAuth {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }
}

impl RequestHook for BearerAuth {
    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self.store.load() {
            Ok(Some(token)) => request.bearer_auth(token),
            Ok(None) => request,
            Err(e) => {
                // Never fail the request over a store problem.
                debug!(error = %e, "Token store unreadable, sending without credentials");
                request
            }
        }
    }
}

/// Response hook: force a logout when the backend rejects the credentials.
///
/// On 401 or 403 the persisted token is cleared and a redirect to the login
/// view is requested. Both effects are idempotent, so any number of
/// concurrent rejections behave like one. The response itself still reaches
/// the caller as an error.
pub struct AuthWatch {
    store: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
}

impl AuthWatch {
    pub fn new(store: Arc<dyn TokenStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }
}

impl ResponseHook for AuthWatch {
    fn inspect(&self, status: StatusCode) {
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            warn!(status = %status, "Credentials rejected, forcing logout");
            if let Err(e) = self.store.clear() {
                warn!(error = %e, "Failed to clear token store after rejection");
            }
            self.navigator.redirect_to_login();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;
    use crate::auth::MemoryTokenStore;

    #[derive(Default)]
    struct CountingNavigator {
        redirects: AtomicUsize,
    }

    impl Navigator for CountingNavigator {
        fn redirect_to_login(&self) {
            self.redirects.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn build(hook: &BearerAuth) -> reqwest::Request {
        let client = reqwest::Client::new();
        hook.apply(client.get("http://example.invalid/transcribe/history"))
            .build()
            .unwrap()
    }

    #[test]
    fn attaches_bearer_header_when_token_present() {
        let store = Arc::new(MemoryTokenStore::new());
        store.save("abc123").unwrap();
        let hook = BearerAuth::new(store);

        let request = build(&hook);
        let header = request
            .headers()
            .get(reqwest::header::AUTHORIZATION)
            .expect("authorization header missing");
        assert_eq!(header.to_str().unwrap(), "Bearer abc123");
    }

    #[test]
    fn sends_unmodified_when_token_absent() {
        let hook = BearerAuth::new(Arc::new(MemoryTokenStore::new()));

        let request = build(&hook);
        assert!(request.headers().get(reqwest::header::AUTHORIZATION).is_none());
    }

    #[test]
    fn rejection_clears_store_and_requests_redirect() {
        let store = Arc::new(MemoryTokenStore::new());
        store.save("abc123").unwrap();
        let navigator = Arc::new(CountingNavigator::default());
        let hook = AuthWatch::new(
            Arc::clone(&store) as Arc<dyn TokenStore>,
            Arc::clone(&navigator) as Arc<dyn Navigator>,
        );

        hook.inspect(StatusCode::UNAUTHORIZED);

        assert_eq!(store.load().unwrap(), None);
        assert_eq!(navigator.redirects.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn success_and_ordinary_failures_pass_through() {
        let store = Arc::new(MemoryTokenStore::new());
        store.save("abc123").unwrap();
        let navigator = Arc::new(CountingNavigator::default());
        let hook = AuthWatch::new(
            Arc::clone(&store) as Arc<dyn TokenStore>,
            Arc::clone(&navigator) as Arc<dyn Navigator>,
        );

        hook.inspect(StatusCode::OK);
        hook.inspect(StatusCode::INTERNAL_SERVER_ERROR);
        hook.inspect(StatusCode::NOT_FOUND);

        assert_eq!(store.load().unwrap().as_deref(), Some("abc123"));
        assert_eq!(navigator.redirects.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn concurrent_rejections_collapse_into_one_redirect() {
        let store = Arc::new(MemoryTokenStore::new());
        store.save("abc123").unwrap();
        let flag = RedirectFlag::new();
        let hook = AuthWatch::new(
            Arc::clone(&store) as Arc<dyn TokenStore>,
            Arc::new(flag.clone()),
        );

        // Two in-flight requests both come back rejected.
        hook.inspect(StatusCode::FORBIDDEN);
        hook.inspect(StatusCode::FORBIDDEN);

        assert_eq!(store.load().unwrap(), None);
        // The latch yields exactly one navigation.
        assert!(flag.take());
        assert!(!flag.take());
    }
}
