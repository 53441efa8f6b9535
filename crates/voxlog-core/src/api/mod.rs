//! HTTP client module for the transcription service API.
//!
//! This module provides the `ApiClient` used by every front-end: one
//! configured request pipeline with an ordered list of request hooks
//! (bearer-token injection) and response hooks (forced logout on rejected
//! credentials).
//!
//! The API issues JWT bearer tokens through `/auth/login` and expects them
//! back in the `Authorization` header on the transcription endpoints.

pub mod client;
pub mod error;
pub mod hooks;

pub use client::ApiClient;
pub use error::ApiError;
pub use hooks::{Navigator, RedirectFlag};
