//! Client identity rotation.
//!
//! Each request attempt presents a User-Agent drawn at random from a configured
//! pool, merged over a fixed set of base headers, so consecutive retries are
//! harder to correlate.

use rand::seq::IndexedRandom;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};

use crate::error_handling::ScrapeError;

/// Supplies a pseudo-random outbound identity per attempt.
///
/// The pool is validated once at construction, so [`IdentityRotator::next_identity`]
/// cannot fail.
#[derive(Debug, Clone)]
pub struct IdentityRotator {
    user_agents: Vec<HeaderValue>,
    base_headers: HeaderMap,
}

impl IdentityRotator {
    /// Builds a rotator from a User-Agent pool and base headers.
    ///
    /// # Errors
    ///
    /// Returns `ScrapeError::Configuration` if the pool is empty or any header
    /// name or value is not valid HTTP.
    pub fn new<S: AsRef<str>>(
        user_agents: &[S],
        base_headers: &[(&str, &str)],
    ) -> Result<Self, ScrapeError> {
        if user_agents.is_empty() {
            return Err(ScrapeError::Configuration(
                "identity pool is empty: at least one User-Agent is required".to_string(),
            ));
        }

        let user_agents = user_agents
            .iter()
            .map(|ua| {
                HeaderValue::from_str(ua.as_ref()).map_err(|e| {
                    ScrapeError::Configuration(format!(
                        "invalid User-Agent '{}': {e}",
                        ua.as_ref()
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut headers = HeaderMap::new();
        for (name, value) in base_headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ScrapeError::Configuration(format!("invalid header name '{name}': {e}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                ScrapeError::Configuration(format!("invalid value for header {name}: {e}"))
            })?;
            headers.insert(name, value);
        }

        Ok(Self {
            user_agents,
            base_headers: headers,
        })
    }

    /// Returns the base headers with a randomly chosen User-Agent merged on top.
    pub fn next_identity(&self) -> HeaderMap {
        let mut headers = self.base_headers.clone();
        headers.insert(USER_AGENT, self.next_user_agent());
        headers
    }

    /// Draws a User-Agent from the pool without the base headers.
    pub fn next_user_agent(&self) -> HeaderValue {
        self.user_agents
            .choose(&mut rand::rng())
            .cloned()
            // The constructor rejects an empty pool
            .unwrap_or_else(|| HeaderValue::from_static("Mozilla/5.0"))
    }

    /// Number of identities in the pool.
    pub fn pool_size(&self) -> usize {
        self.user_agents.len()
    }
}
