//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (API limits, search defaults)
//! - Filter configuration of a search
//! - CLI option types and parsing

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::{Cli, Command, CommentsArgs, SearchArgs};
pub use constants::*;
pub use types::{
    Config, FilterConfig, LogFormat, LogLevel, LookbackPeriod, PageSize, RatioThreshold,
    ShortsMode,
};
