//! Core domain types for Stride Dashboard.
//!
//! Holds the shoe/stride models, the shared error type, command-line
//! settings with last-used persistence, and the display formatting helpers
//! used by every other crate in the workspace.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
