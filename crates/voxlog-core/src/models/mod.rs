//! Payload types for the transcription service API.
//!
//! - `Credentials`, `AuthPayload`: auth endpoint request/response bodies
//! - `TranscriptionOutcome`: result of one upload
//! - `HistoryEntry`: one past transcription record
//!
//! Transcription payloads are owned by the backend; the client passes them
//! through for display and never reinterprets them.

pub mod auth;
pub mod transcription;

pub use auth::{AuthPayload, Credentials};
pub use transcription::{HistoryEntry, TranscriptionOutcome};
