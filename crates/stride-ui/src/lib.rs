//! Terminal UI layer for Stride Dashboard.
//!
//! Provides themes, the header and summary components, the dashboard and
//! table views, SVG chart export, the plain-text report, and the main
//! application event loop built on top of [`ratatui`].

pub mod app;
pub mod components;
pub mod dashboard_view;
pub mod export;
pub mod report;
pub mod table_view;
pub mod themes;

pub use stride_core as core;
