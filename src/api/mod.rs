//! YouTube Data API access.
//!
//! - `models`: typed response records with explicit optional fields
//! - `client`: the HTTP client issuing search, lookup, comment, and probe requests

mod client;
pub mod models;

pub use client::{ApiClient, KeyCheck, SearchQuery};
