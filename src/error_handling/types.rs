//! Error type definitions.
//!
//! This module defines the error, fault and event types used throughout the
//! application.

use std::path::PathBuf;

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

    /// Error initializing the logger with custom message (e.g., file creation).
    #[error("Logger initialization error: {0}")]
    LoggerSetupError(String),
}

/// Failures surfaced by the analysis engine.
///
/// Pagination-time failures never reach the caller as a `ScrapeError`; the
/// collector folds them into a [`CollectionFault`] and keeps its partial list.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Unusable configuration or credential, detected before any request.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Every attempt at a request failed with a transport error or an
    /// unexpected status.
    #[error("Request to {url} failed after {attempts} attempts")]
    RequestExhausted {
        /// Target of the request
        url: String,
        /// Attempts made (the configured retry bound)
        attempts: u32,
    },

    /// The rate-limit wait budget ran out. Only reachable when a cap on 429
    /// waits is configured.
    #[error("Request to {url} still rate limited after {waits} waits")]
    RateLimitExhausted {
        /// Target of the request
        url: String,
        /// 429 responses seen
        waits: u32,
    },

    /// The profile page was fetched but no extraction strategy found an id.
    #[error("Could not resolve a user id for '{handle}'")]
    UserNotResolved {
        /// Handle that was looked up
        handle: String,
    },

    /// The profile page itself could not be fetched.
    #[error("Profile page fetch failed: {0}")]
    ProfileFetch(#[source] ReqwestError),

    /// The handle is not a syntactically valid account name.
    #[error("Invalid handle '{0}': expected 1-30 letters, digits, '.' or '_', not only dots")]
    InvalidHandle(String),

    /// A request URL could not be built from the configured base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The report could not be written to its destination.
    #[error("Failed to write report to {}: {source}", path.display())]
    SinkWrite {
        /// Destination that failed
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}

/// Why a relationship list stopped before the API reported its last page.
///
/// These are non-fatal: the accumulated usernames are still returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionFault {
    /// The page request failed after all retries.
    #[error("page request failed: {0}")]
    RequestFailed(String),

    /// The page body was not valid JSON or did not match the page shape.
    #[error("malformed page body: {0}")]
    MalformedBody(String),

    /// `data` or `data.user` was missing or null (blocked session or end of data).
    #[error("response has no data.user object")]
    MissingUser,

    /// The user object has no collection for the requested edge.
    #[error("response has no '{0}' collection")]
    MissingEdge(&'static str),

    /// The API claimed more pages but did not advance the cursor.
    #[error("cursor did not advance (stuck at '{0}')")]
    StalledCursor(String),
}

/// Outcome of a single request attempt, as counted in
/// [`super::RequestStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIterMacro)]
pub enum RequestEvent {
    /// 200 response
    Success,
    /// 429 response
    RateLimited,
    /// Any other status
    UnexpectedStatus,
    /// Request or body read timed out
    Timeout,
    /// Connection could not be established
    Connect,
    /// Body could not be read
    Body,
    /// Any other transport failure
    OtherTransport,
}

impl std::fmt::Display for RequestEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RequestEvent {
    /// Human-readable label used in log lines and the statistics block.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestEvent::Success => "Successful responses",
            RequestEvent::RateLimited => "Rate limited (429)",
            RequestEvent::UnexpectedStatus => "Unexpected status",
            RequestEvent::Timeout => "Timeouts",
            RequestEvent::Connect => "Connection failures",
            RequestEvent::Body => "Body read failures",
            RequestEvent::OtherTransport => "Other transport failures",
        }
    }

    /// Whether the event consumed one of the bounded retry attempts.
    pub fn counts_against_retries(&self) -> bool {
        !matches!(self, RequestEvent::Success | RequestEvent::RateLimited)
    }
}
