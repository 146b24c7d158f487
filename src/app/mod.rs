//! Operator-facing reporting.
//!
//! This module provides progress logging while a search runs and the
//! summaries printed when a command finishes.

pub mod logging;
pub mod statistics;

// Re-export public API
pub use logging::{log_progress, progress_logger};
pub use statistics::{print_request_statistics, print_search_summary};
