//! Data ingestion layer for Stride Dashboard.
//!
//! Resolves the upload slot to a JSON export, parses it, flattens each
//! shoe's segments into stride rows, and builds the summaries and chart
//! series the presentation layer renders.

pub mod analysis;
pub mod extractor;
pub mod loader;
pub mod table;

pub use stride_core as core;
