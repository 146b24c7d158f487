//! Error handling and request statistics.
//!
//! This module provides:
//! - Error type definitions (initialization, API, export, key storage)
//! - The endpoint taxonomy used in error messages
//! - Conversion of upstream responses and transport failures into errors
//! - Per-endpoint request statistics
//!
//! Error categories:
//! - **Configuration**: missing API key, raised before any request
//! - **Upstream**: non-success responses, message taken from the body when possible
//! - **Transport**: no response at all, reduced to a message
//!
//! An empty search result is not an error.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{error_from_response, error_from_transport};
pub use stats::RequestStats;
pub use types::{ApiError, Endpoint, ExportError, InitializationError, StorageError};
