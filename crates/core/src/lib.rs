//! Pure domain logic for the playdeck recommendation core.
//!
//! No I/O lives here: id/timestamp types, the error taxonomy, the
//! recommendation configuration, the scoring engine, and the typed
//! interaction payload. Everything is synchronous and side-effect free
//! so it can be unit tested without a database or cache.

pub mod config;
pub mod error;
pub mod interaction;
pub mod scoring;
pub mod types;
