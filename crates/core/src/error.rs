//! Error types for serialbook operations.
//!
//! This module defines the main error type [`SerialbookError`] which covers
//! everything that can go wrong while fetching pages, extracting chapters,
//! loading site profiles and rendering the bound book.
//!
//! Note that a chapter failing to download is *not* surfaced as an error to
//! callers of the pipeline: it is logged and the chapter is skipped. These
//! variants describe why, and are what ends up in the run report.
//!
//! # Example
//!
//! ```rust
//! use serialbook_core::{Result, SerialbookError};
//!
//! fn require_slug(slug: &str) -> Result<&str> {
//!     if slug.trim().is_empty() {
//!         return Err(SerialbookError::ConfigError("novel slug is empty".to_string()));
//!     }
//!     Ok(slug)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for serialbook operations.
#[derive(Error, Debug)]
pub enum SerialbookError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// redirect loops and other transport problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// The server answered with a non-success status code.
    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// The server answered with something that is not an HTML page.
    #[error("{url} is not an HTML page (content type {content_type})")]
    NotHtml { url: String, content_type: String },

    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed or is malformed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// Site profile or option errors.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The page backend could not produce the document.
    #[error("Failed to render document: {0}")]
    RenderError(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("Failed to write to file: {0}")]
    WriteError(#[from] std::io::Error),
}

impl From<serde_json::Error> for SerialbookError {
    fn from(err: serde_json::Error) -> Self {
        SerialbookError::ConfigError(err.to_string())
    }
}

/// Result type alias for SerialbookError.
pub type Result<T> = std::result::Result<T, SerialbookError>;
