//! Error type definitions.
//!
//! This module defines the errors surfaced by the library and the endpoint
//! taxonomy used to label upstream failures and request statistics.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The configured API base URL does not parse.
    #[error("Invalid API base URL '{url}': {source}")]
    BaseUrlError {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// The YouTube Data API endpoints the tool calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum Endpoint {
    Search,
    Videos,
    Channels,
    CommentThreads,
    I18nLanguages,
}

impl Endpoint {
    /// Resource path relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Search => "search",
            Endpoint::Videos => "videos",
            Endpoint::Channels => "channels",
            Endpoint::CommentThreads => "commentThreads",
            Endpoint::I18nLanguages => "i18nLanguages",
        }
    }

    /// API method name, as used in error messages (e.g. `search.list`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Search => "search.list",
            Endpoint::Videos => "videos.list",
            Endpoint::Channels => "channels.list",
            Endpoint::CommentThreads => "commentThreads.list",
            Endpoint::I18nLanguages => "i18nLanguages.list",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while talking to the Data API.
///
/// Any of these aborts the whole operation that raised it; nothing is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No API key was supplied. Raised before any request is sent.
    #[error("An API key is required")]
    MissingApiKey,

    /// The API answered with a non-success status.
    ///
    /// `message` is the body's `error.message` when present, otherwise
    /// `"<endpoint> HTTP <status>"`.
    #[error("{message}")]
    Http {
        endpoint: Endpoint,
        status: u16,
        message: String,
    },

    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("{0}")]
    Transport(String),

    /// A success response whose body could not be decoded.
    #[error("{endpoint} returned an unreadable body: {message}")]
    Decode { endpoint: Endpoint, message: String },

    /// A comment fetch for this video is already running.
    #[error("Comments for video {0} are already being fetched")]
    FetchInProgress(String),
}

/// Errors raised by the CSV export wrappers.
#[derive(Error, Debug)]
pub enum ExportError {
    /// There is nothing to write; shown to the operator as a one-shot notice.
    #[error("{0}")]
    NothingToExport(String),

    /// Writing the file failed.
    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the CSV failed.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors raised while persisting the API key.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Key file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Key file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
