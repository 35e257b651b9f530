//! Handle to user id resolution.
//!
//! The profile page is fetched exactly once, without the session cookie and
//! without retries, then searched with the [`ExtractionStrategy`] list.

mod strategies;

use std::sync::LazyLock;

use log::{error, info};
use regex::Regex;

use crate::error_handling::ScrapeError;
use crate::fetch::{apply_navigation_headers, Endpoints};
use crate::user_agent::IdentityRotator;

pub use strategies::{extract_user_id, ExtractionStrategy};

const HANDLE_PATTERN: &str = r"^[A-Za-z0-9._]{1,30}$";

static HANDLE_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(HANDLE_PATTERN)
        .map_err(|e| error!("Failed to compile handle pattern: {e}"))
        .ok()
});

/// Normalizes and checks an account handle.
///
/// Surrounding whitespace and one leading `@` are removed. The remainder must
/// be 1-30 ASCII letters, digits, `.` or `_`, and not consist of dots only.
///
/// # Errors
///
/// Returns `ScrapeError::InvalidHandle` for anything else.
pub fn validate_handle(raw: &str) -> Result<String, ScrapeError> {
    let trimmed = raw.trim();
    let handle = trimmed.strip_prefix('@').unwrap_or(trimmed);

    // "." and ".." would resolve to parent paths of the profile URL
    let valid = HANDLE_RE.as_ref().is_some_and(|re| re.is_match(handle))
        && handle.chars().any(|c| c != '.');
    if valid {
        Ok(handle.to_string())
    } else {
        Err(ScrapeError::InvalidHandle(raw.trim().to_string()))
    }
}

/// Maps a handle to the platform's numeric user id.
#[derive(Debug)]
pub struct UserResolver {
    client: reqwest::Client,
    identities: IdentityRotator,
    endpoints: Endpoints,
}

impl UserResolver {
    /// Creates a resolver. `client` should carry the short profile timeout.
    pub fn new(client: reqwest::Client, identities: IdentityRotator, endpoints: Endpoints) -> Self {
        Self {
            client,
            identities,
            endpoints,
        }
    }

    /// Resolves `handle` to its user id.
    ///
    /// # Errors
    ///
    /// - `ScrapeError::InvalidHandle` if the handle is malformed
    /// - `ScrapeError::ProfileFetch` if the page request fails or returns a
    ///   non-success status
    /// - `ScrapeError::UserNotResolved` if no strategy finds an id
    pub async fn resolve(&self, handle: &str) -> Result<String, ScrapeError> {
        let handle = validate_handle(handle)?;
        let url = self.endpoints.profile_url(&handle)?;

        info!("Resolving user id for '{handle}'");
        let request = self
            .client
            .get(url.as_str())
            .header(reqwest::header::USER_AGENT, self.identities.next_user_agent());

        let html = apply_navigation_headers(request)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                error!("Profile page fetch for '{handle}' failed: {e}");
                ScrapeError::ProfileFetch(e)
            })?
            .text()
            .await
            .map_err(ScrapeError::ProfileFetch)?;

        match extract_user_id(&html, &handle) {
            Some((strategy, id)) => {
                info!("Resolved '{handle}' to user id {id} (via {strategy})");
                Ok(id)
            }
            None => {
                error!(
                    "No extraction strategy matched the profile page of '{handle}' ({} bytes)",
                    html.len()
                );
                Err(ScrapeError::UserNotResolved { handle })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::QueryHashes;
    use httptest::{all_of, matchers::*, responders::*, Expectation, Server};

    fn resolver(server: &Server) -> UserResolver {
        UserResolver::new(
            reqwest::Client::new(),
            IdentityRotator::new(&["profile-agent/2.0"], &[]).unwrap(),
            Endpoints::new(
                &server.url_str("/"),
                QueryHashes {
                    followers: "f".to_string(),
                    following: "g".to_string(),
                },
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_validate_handle() {
        assert_eq!(validate_handle("alice").unwrap(), "alice");
        assert_eq!(validate_handle("  @alice.b_2 ").unwrap(), "alice.b_2");
        assert!(matches!(
            validate_handle(""),
            Err(ScrapeError::InvalidHandle(_))
        ));
        assert!(validate_handle("@").is_err());
        assert!(validate_handle("alice/../admin").is_err());
        assert!(validate_handle("has space").is_err());
        assert!(validate_handle(&"a".repeat(31)).is_err());
        assert!(validate_handle(&"a".repeat(30)).is_ok());
        assert!(validate_handle(".").is_err());
        assert!(validate_handle("..").is_err());
        assert!(validate_handle("@...").is_err());
        assert_eq!(validate_handle("._.").unwrap(), "._.");
        assert_eq!(validate_handle("a..b").unwrap(), "a..b");
    }

    #[tokio::test]
    async fn test_resolve_from_profile_page() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/alice/"),
                request::headers(contains(("user-agent", "profile-agent/2.0"))),
                request::headers(contains(("sec-fetch-mode", "navigate"))),
                request::headers(not(contains(key("cookie")))),
            ])
            .respond_with(
                status_code(200).body(r#"<html><script>{"id":"123","username":"alice"}</script></html>"#),
            ),
        );

        let id = resolver(&server).resolve("@alice").await.unwrap();
        assert_eq!(id, "123");
    }

    #[tokio::test]
    async fn test_unmatched_page_is_not_resolved() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/ghost/"))
                .respond_with(status_code(200).body("<html><body>Sorry</body></html>")),
        );

        match resolver(&server).resolve("ghost").await {
            Err(ScrapeError::UserNotResolved { handle }) => assert_eq!(handle, "ghost"),
            other => panic!("expected UserNotResolved, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_status_is_single_attempt_fetch_failure() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/alice/"))
                .times(1)
                .respond_with(status_code(404)),
        );

        let result = resolver(&server).resolve("alice").await;
        assert!(matches!(result, Err(ScrapeError::ProfileFetch(_))));
    }

    #[tokio::test]
    async fn test_invalid_handle_makes_no_request() {
        let server = Server::run();
        let result = resolver(&server).resolve("not valid!").await;
        assert!(matches!(result, Err(ScrapeError::InvalidHandle(_))));
    }

    #[tokio::test]
    async fn test_dot_handle_never_fetches_site_root() {
        // No expectations: any request would fail the server's verification
        let server = Server::run();
        let result = resolver(&server).resolve("..").await;
        assert!(matches!(result, Err(ScrapeError::InvalidHandle(_))));
    }
}
