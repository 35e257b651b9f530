//! Resilient request execution.
//!
//! Issues GET requests with session-cookie auth, rotating the client identity
//! per attempt. Rate limiting (429) is waited out without consuming an attempt;
//! unexpected statuses and transport failures consume one each, up to the
//! configured bound.

use log::{debug, error, warn};
use reqwest::header::COOKIE;
use reqwest::StatusCode;
use tokio::time::sleep;

use super::pacing::Pacing;
use super::request::SessionToken;
use crate::error_handling::{
    categorize_transport_error, classify_status, RequestEvent, RequestStats, ResponseClass,
    ScrapeError,
};
use crate::user_agent::IdentityRotator;

/// What a single attempt produced.
enum Attempt {
    Body(String),
    /// Any status other than 200, classified as rate limited or unexpected
    Status(ResponseClass, StatusCode),
    Transport(reqwest::Error),
}

impl Attempt {
    fn event(&self) -> RequestEvent {
        match self {
            Attempt::Body(_) => RequestEvent::Success,
            Attempt::Status(class, _) => RequestEvent::from(*class),
            Attempt::Transport(e) => categorize_transport_error(e),
        }
    }
}

/// Fetches response bodies with retry, backoff and throttling.
///
/// Owns its HTTP client; nothing else issues requests through it.
#[derive(Debug)]
pub struct RequestExecutor {
    client: reqwest::Client,
    identities: IdentityRotator,
    session: SessionToken,
    max_retries: u32,
    max_rate_limit_waits: Option<u32>,
    pacing: Pacing,
    stats: RequestStats,
}

impl RequestExecutor {
    /// Creates an executor.
    ///
    /// `max_retries` bounds attempts lost to unexpected statuses and transport
    /// failures. `max_rate_limit_waits` bounds 429 waits; `None` never gives up
    /// on rate limiting.
    pub fn new(
        client: reqwest::Client,
        identities: IdentityRotator,
        session: SessionToken,
        max_retries: u32,
        max_rate_limit_waits: Option<u32>,
        pacing: Pacing,
    ) -> Self {
        Self {
            client,
            identities,
            session,
            max_retries,
            max_rate_limit_waits,
            pacing,
            stats: RequestStats::new(),
        }
    }

    /// Per-event counters for every attempt made so far.
    pub fn stats(&self) -> &RequestStats {
        &self.stats
    }

    /// Fetches `url` and returns the body of the first 200 response.
    ///
    /// # Errors
    ///
    /// - `ScrapeError::RequestExhausted` when `max_retries` attempts ended in an
    ///   unexpected status or a transport failure
    /// - `ScrapeError::RateLimitExhausted` when a 429 cap is configured and hit
    pub async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let mut attempt: u32 = 0;
        let mut rate_limit_waits: u32 = 0;

        while attempt < self.max_retries {
            let attempt_no = attempt + 1;
            let outcome = self.attempt(url).await;
            let event = outcome.event();
            self.stats.record(event);
            if event.counts_against_retries() {
                attempt += 1;
            }

            match outcome {
                Attempt::Body(body) => {
                    let delay = self.pacing.request_delay.sample();
                    debug!(
                        "GET {url} succeeded on attempt {attempt_no}/{}, pausing {:.1}s",
                        self.max_retries,
                        delay.as_secs_f64()
                    );
                    sleep(delay).await;
                    return Ok(body);
                }
                Attempt::Status(ResponseClass::RateLimited, _) => {
                    rate_limit_waits += 1;
                    if let Some(cap) = self.max_rate_limit_waits {
                        if rate_limit_waits > cap {
                            error!("GET {url} still rate limited after {cap} waits, giving up");
                            return Err(ScrapeError::RateLimitExhausted {
                                url: url.to_string(),
                                waits: rate_limit_waits,
                            });
                        }
                    }
                    let wait = self.pacing.rate_limit_backoff.sample();
                    warn!(
                        "Rate limited on {url} (wait #{rate_limit_waits}), sleeping {:.1}s",
                        wait.as_secs_f64()
                    );
                    sleep(wait).await;
                }
                Attempt::Status(_, status) => {
                    warn!(
                        "Status {status} from {url}, attempt {attempt_no}/{}",
                        self.max_retries
                    );
                }
                Attempt::Transport(e) => {
                    error!(
                        "Transport failure on {url} ({event}, attempt {attempt_no}/{}): {e}",
                        self.max_retries
                    );
                    if attempt < self.max_retries {
                        sleep(self.pacing.transport_backoff.sample()).await;
                    }
                }
            }
        }

        Err(ScrapeError::RequestExhausted {
            url: url.to_string(),
            attempts: self.max_retries,
        })
    }

    async fn attempt(&self, url: &str) -> Attempt {
        let response = self
            .client
            .get(url)
            .headers(self.identities.next_identity())
            .header(COOKIE, self.session.cookie_header())
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => return Attempt::Transport(e),
        };

        let status = response.status();
        match classify_status(status) {
            ResponseClass::Success => match response.text().await {
                Ok(body) => Attempt::Body(body),
                Err(e) => Attempt::Transport(e),
            },
            class => Attempt::Status(class, status),
        }
    }
}
