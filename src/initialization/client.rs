//! HTTP client initialization.
//!
//! Two clients are built per run: one owned by the request executor for the
//! paginated API, and a short-timeout one used once by the user resolver.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, TCP_CONNECT_TIMEOUT_SECS};

/// Initializes the HTTP client used for paginated API requests.
///
/// No default User-Agent is set: the executor supplies a rotated identity on
/// every attempt.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(Duration::from_secs(
            TCP_CONNECT_TIMEOUT_SECS.min(config.timeout_seconds),
        ))
        .build()
}

/// Initializes the HTTP client for the one-shot profile page fetch.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_profile_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.profile_timeout_seconds))
        .connect_timeout(Duration::from_secs(
            TCP_CONNECT_TIMEOUT_SECS.min(config.profile_timeout_seconds),
        ))
        .build()
}
