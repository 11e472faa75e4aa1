//! Session module for the crawl request lifecycle
//!
//! # Components
//!
//! - `SessionState`: the current attempt (idle, in flight, succeeded, failed)
//! - `SessionController`: submits requests and applies their outcomes
//! - `Editor`: the not-yet-submitted input a request is composed from

mod controller;
mod editor;
mod state;

// Re-export main types
pub use controller::{AttemptTicket, Resolution, SessionController};
pub use editor::Editor;
pub use state::{Failure, FailureKind, SessionState};
