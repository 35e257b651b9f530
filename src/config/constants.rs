//! Configuration constants.
//!
//! This module defines the defaults used throughout the application: endpoint
//! identifiers, retry bounds, pacing intervals and the built-in identity pool.

/// Default platform root. Profile pages and the GraphQL endpoint hang off it.
pub const DEFAULT_BASE_URL: &str = "https://www.instagram.com/";

/// Path of the paginated GraphQL query endpoint, relative to the base URL.
pub const GRAPHQL_QUERY_PATH: &str = "graphql/query/";

/// Query identifier for the followers edge.
pub const FOLLOWERS_QUERY_HASH: &str = "c76146de99bb02f6415203be841dd25a";

/// Query identifier for the following edge.
pub const FOLLOWING_QUERY_HASH: &str = "d04b0a864b4b54837c0d870b0e77e076";

/// Environment variable holding the session id.
pub const SESSION_ENV_VAR: &str = "INSTAGRAM_SESSION_ID";

/// Cookie name the session id is sent under.
pub const SESSION_COOKIE_NAME: &str = "sessionid";

/// Default report destination.
pub const DEFAULT_OUTPUT_FILE: &str = "non_followers.txt";

// Retry strategy
/// Maximum number of attempts per paginated request.
/// Rate-limit (429) waits are not counted against this bound.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

// Pagination
/// Edges requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 50;
/// Largest page the endpoint honours.
pub const MAX_PAGE_SIZE: u32 = 50;

// Pacing (seconds)
/// Longest delay any pacing interval may be configured with (one day)
pub const MAX_DELAY_SECS: f64 = 86_400.0;
/// Throttle delay after every successful request, lower bound
pub const REQUEST_DELAY_MIN_SECS: f64 = 2.0;
/// Throttle delay after every successful request, upper bound
pub const REQUEST_DELAY_MAX_SECS: f64 = 5.0;
/// Backoff after a 429 response, lower bound
pub const RATE_LIMIT_BACKOFF_MIN_SECS: f64 = 30.0;
/// Backoff after a 429 response, upper bound
pub const RATE_LIMIT_BACKOFF_MAX_SECS: f64 = 60.0;
/// Backoff after a transport failure, lower bound
pub const TRANSPORT_BACKOFF_MIN_SECS: f64 = 5.0;
/// Backoff after a transport failure, upper bound
pub const TRANSPORT_BACKOFF_MAX_SECS: f64 = 10.0;

// Network operation timeouts
/// Total timeout for a paginated request in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
/// Timeout for the one-shot profile page fetch in seconds
pub const PROFILE_TIMEOUT_SECS: u64 = 10;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Built-in User-Agent pool used when none is configured.
///
/// Mixes desktop and mobile browsers so consecutive retries do not present the
/// same fingerprint.
pub const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1",
];

// HTTP status codes (for clarity and consistency)
/// Rate-limit signal
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;
