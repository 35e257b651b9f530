//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::*;
use crate::fetch::{JitterRange, Pacing};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// A configuration value that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// What is wrong and what would be accepted
    pub message: String,
}

impl ConfigValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigValidationError {}

/// Run configuration.
///
/// Parsed from the command line by the binary, or built programmatically
/// (usually from `Config::default()`) by library callers and tests.
///
/// # Examples
///
/// ```no_run
/// use follow_audit::Config;
///
/// let config = Config {
///     handle: Some("alice".to_string()),
///     max_retries: 5,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "follow_audit",
    about = "Lists the accounts you follow that do not follow you back."
)]
pub struct Config {
    /// Account handle to analyse (prompted for when omitted)
    #[arg(value_parser)]
    pub handle: Option<String>,

    /// File the sorted non-follower list is written to
    #[arg(long, value_parser, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Print the report without writing the output file
    #[arg(long)]
    pub no_save: bool,

    /// Environment variable read for the session id before prompting
    #[arg(long, default_value = SESSION_ENV_VAR)]
    pub session_env: String,

    /// Platform root URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// GraphQL query identifier for the followers edge
    #[arg(long, default_value = FOLLOWERS_QUERY_HASH)]
    pub followers_query_hash: String,

    /// GraphQL query identifier for the following edge
    #[arg(long, default_value = FOLLOWING_QUERY_HASH)]
    pub following_query_hash: String,

    /// User-Agent added to the rotation pool (repeatable; replaces the built-in pool)
    #[arg(long = "user-agent")]
    pub user_agents: Vec<String>,

    /// Attempts per page request (429 waits do not count)
    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,

    /// Edges requested per page (1-50)
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// Lower bound of the delay after each successful request, in seconds
    #[arg(long, default_value_t = REQUEST_DELAY_MIN_SECS)]
    pub request_delay_min_secs: f64,

    /// Upper bound of the delay after each successful request, in seconds
    #[arg(long, default_value_t = REQUEST_DELAY_MAX_SECS)]
    pub request_delay_max_secs: f64,

    /// Lower bound of the wait after a 429 response, in seconds
    #[arg(long, default_value_t = RATE_LIMIT_BACKOFF_MIN_SECS)]
    pub rate_limit_backoff_min_secs: f64,

    /// Upper bound of the wait after a 429 response, in seconds
    #[arg(long, default_value_t = RATE_LIMIT_BACKOFF_MAX_SECS)]
    pub rate_limit_backoff_max_secs: f64,

    /// Lower bound of the wait after a connection failure, in seconds
    #[arg(long, default_value_t = TRANSPORT_BACKOFF_MIN_SECS)]
    pub transport_backoff_min_secs: f64,

    /// Upper bound of the wait after a connection failure, in seconds
    #[arg(long, default_value_t = TRANSPORT_BACKOFF_MAX_SECS)]
    pub transport_backoff_max_secs: f64,

    /// Give up on a request after this many 429 responses (unbounded when unset)
    #[arg(long)]
    pub max_rate_limit_waits: Option<u32>,

    /// Per-request timeout for paginated queries, in seconds
    #[arg(long, default_value_t = REQUEST_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Timeout for the profile page fetch, in seconds
    #[arg(long, default_value_t = PROFILE_TIMEOUT_SECS)]
    pub profile_timeout_seconds: u64,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Also append log lines to this file
    #[arg(long, value_parser)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            handle: None,
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            no_save: false,
            session_env: SESSION_ENV_VAR.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            followers_query_hash: FOLLOWERS_QUERY_HASH.to_string(),
            following_query_hash: FOLLOWING_QUERY_HASH.to_string(),
            user_agents: Vec::new(),
            max_retries: DEFAULT_MAX_RETRIES,
            page_size: DEFAULT_PAGE_SIZE,
            request_delay_min_secs: REQUEST_DELAY_MIN_SECS,
            request_delay_max_secs: REQUEST_DELAY_MAX_SECS,
            rate_limit_backoff_min_secs: RATE_LIMIT_BACKOFF_MIN_SECS,
            rate_limit_backoff_max_secs: RATE_LIMIT_BACKOFF_MAX_SECS,
            transport_backoff_min_secs: TRANSPORT_BACKOFF_MIN_SECS,
            transport_backoff_max_secs: TRANSPORT_BACKOFF_MAX_SECS,
            max_rate_limit_waits: None,
            timeout_seconds: REQUEST_TIMEOUT_SECS,
            profile_timeout_seconds: PROFILE_TIMEOUT_SECS,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            log_file: None,
        }
    }
}

impl Config {
    /// Checks every field for values the engine cannot work with.
    ///
    /// Returns the first offending field. Called by the binary before any
    /// network activity, and by [`crate::Analyzer::new`].
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.max_retries == 0 {
            return Err(ConfigValidationError::new(
                "max_retries",
                "must be greater than 0",
            ));
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigValidationError::new(
                "page_size",
                format!("must be between 1 and {MAX_PAGE_SIZE}"),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigValidationError::new(
                "timeout_seconds",
                "must be greater than 0",
            ));
        }
        if self.profile_timeout_seconds == 0 {
            return Err(ConfigValidationError::new(
                "profile_timeout_seconds",
                "must be greater than 0",
            ));
        }

        check_interval(
            "request_delay",
            self.request_delay_min_secs,
            self.request_delay_max_secs,
        )?;
        check_interval(
            "rate_limit_backoff",
            self.rate_limit_backoff_min_secs,
            self.rate_limit_backoff_max_secs,
        )?;
        check_interval(
            "transport_backoff",
            self.transport_backoff_min_secs,
            self.transport_backoff_max_secs,
        )?;

        if self.user_agents.iter().any(|ua| ua.trim().is_empty()) {
            return Err(ConfigValidationError::new(
                "user_agents",
                "entries must not be empty",
            ));
        }
        if let Err(e) = url::Url::parse(&self.base_url) {
            return Err(ConfigValidationError::new(
                "base_url",
                format!("'{}' is not a valid URL: {e}", self.base_url),
            ));
        }
        if self.followers_query_hash.trim().is_empty() {
            return Err(ConfigValidationError::new(
                "followers_query_hash",
                "must not be empty",
            ));
        }
        if self.following_query_hash.trim().is_empty() {
            return Err(ConfigValidationError::new(
                "following_query_hash",
                "must not be empty",
            ));
        }
        Ok(())
    }

    /// Delay intervals used by the request executor.
    ///
    /// Assumes [`Config::validate`] passed.
    pub fn pacing(&self) -> Pacing {
        Pacing {
            request_delay: JitterRange::new(
                secs(self.request_delay_min_secs),
                secs(self.request_delay_max_secs),
            ),
            rate_limit_backoff: JitterRange::new(
                secs(self.rate_limit_backoff_min_secs),
                secs(self.rate_limit_backoff_max_secs),
            ),
            transport_backoff: JitterRange::new(
                secs(self.transport_backoff_min_secs),
                secs(self.transport_backoff_max_secs),
            ),
        }
    }

    /// The User-Agent pool to rotate through: the configured one, or the
    /// built-in pool when none was given.
    pub fn user_agent_pool(&self) -> Vec<String> {
        if self.user_agents.is_empty() {
            DEFAULT_USER_AGENTS.iter().map(|ua| ua.to_string()).collect()
        } else {
            self.user_agents.clone()
        }
    }
}

fn check_interval(field: &'static str, min: f64, max: f64) -> Result<(), ConfigValidationError> {
    if !min.is_finite() || !max.is_finite() || min < 0.0 || max < 0.0 {
        return Err(ConfigValidationError::new(
            field,
            format!("bounds must be finite and non-negative (got {min}..{max})"),
        ));
    }
    if max > MAX_DELAY_SECS {
        return Err(ConfigValidationError::new(
            field,
            format!("maximum {max}s exceeds the {MAX_DELAY_SECS}s limit"),
        ));
    }
    if min > max {
        return Err(ConfigValidationError::new(
            field,
            format!("minimum {min}s exceeds maximum {max}s"),
        ));
    }
    Ok(())
}

// Out-of-range values only reach here when validation was skipped
fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value.min(MAX_DELAY_SECS)).unwrap_or(Duration::ZERO)
}
