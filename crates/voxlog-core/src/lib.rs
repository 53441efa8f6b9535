//! Core library for voxlog, a client for a remote audio-transcription
//! service.
//!
//! The pieces fit together like this:
//!
//! - `auth`: durable token storage and the in-memory session context
//! - `api`: the hooked HTTP client and the typed API operations
//! - `routes`: navigation-level gating of protected views
//! - `models`: request/response payload types
//! - `config`: on-disk application configuration
//!
//! Front-ends own a [`auth::Session`] and an [`api::ApiClient`] wired to the
//! same [`auth::TokenStore`]; the client attaches the persisted bearer token
//! to every request and forces a logout-plus-redirect when the backend
//! rejects it.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod routes;
