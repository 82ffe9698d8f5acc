//! Error handling for the spelunk library.
//!
//! Only configuration-fatal problems and cancellation surface as [`Error`].
//! Everything that goes wrong with a single directory or a single leaf is
//! reported per item (see [`crate::fetch::FetchOutcome`]) or suppressed by the
//! crawler, so a partially reachable listing still produces results.

use reqwest::StatusCode;
use std::io;
use thiserror::Error;

/// Errors that can happen when using spelunk.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    ///
    /// Captures internal failures that don't fit into other categories, such
    /// as a closed invocation pool.
    #[error("Internal error: {0}")]
    Internal(String),

    /// The root URL cannot be parsed or does not match the expected
    /// addressing scheme.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A policy option is out of range or unusable.
    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    /// The proxy endpoint cannot be parsed or uses an unsupported scheme.
    #[error("Proxy error: {0}")]
    Proxy(String),

    /// The invocation was cancelled by the caller.
    ///
    /// Any partial artifact has already been removed when this is returned.
    #[error("Operation cancelled")]
    Cancelled,

    /// The server answered with a non-success status.
    #[error("Unexpected HTTP status {0}")]
    Status(StatusCode),

    /// I/O Error.
    ///
    /// Wraps errors from creating directories and writing files.
    #[error("I/O error: {source}")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library.
    ///
    /// Covers connection failures, timeouts and body read errors.
    #[error("Reqwest error: {source}")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Error from the middleware stack wrapping the HTTP client.
    #[error("HTTP middleware error: {source}")]
    Middleware {
        #[from]
        source: reqwest_middleware::Error,
    },
}

/// Result type alias for operations that can fail with a spelunk error.
pub type Result<T> = std::result::Result<T, Error>;
