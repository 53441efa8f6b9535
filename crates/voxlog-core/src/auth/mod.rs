//! Authentication state: durable token storage and the session context.
//!
//! This module provides:
//! - `TokenStore`: the contract for persisting the single bearer token,
//!   with a keychain-backed and an in-memory implementation
//! - `Session`: process-wide authentication state derived from the store
//!
//! The token is opaque to the client; issuing and validating it is the
//! backend's job.

pub mod credentials;
pub mod session;

pub use credentials::{KeyringTokenStore, MemoryTokenStore, TokenStore};
pub use session::Session;
