//! Runtime orchestration layer for Stride Dashboard.
//!
//! Watches the upload slot and re-runs the data pipeline whenever a new
//! export lands there, handing each fresh report to the UI over a channel.

pub mod orchestrator;
pub mod upload_slot;

pub use stride_core as core;
pub use stride_data as data;
