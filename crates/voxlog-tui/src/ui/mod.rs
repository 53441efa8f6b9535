//! Terminal UI module using ratatui.
//!
//! - `render`: frame layout, navigation bar, status bar, overlays
//! - `input`: keyboard event handling
//! - `styles`: color palette and text styling
//! - `views`: per-route content rendering (landing, upload, history, ...)

pub mod input;
pub mod render;
pub mod styles;
pub mod views;
