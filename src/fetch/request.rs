//! Request construction: endpoint URLs, session cookie and browser headers.

use std::fmt;

use reqwest::header::HeaderValue;
use serde_json::Value;
use url::Url;

use crate::collect::EdgeKind;
use crate::config::{Config, GRAPHQL_QUERY_PATH, SESSION_COOKIE_NAME};
use crate::error_handling::ScrapeError;

/// Opaque session credential, sent as the `sessionid` cookie.
///
/// The secret never appears in `Debug` output or log lines.
#[derive(Clone)]
pub struct SessionToken {
    cookie: HeaderValue,
}

impl SessionToken {
    /// Wraps a raw session id.
    ///
    /// # Errors
    ///
    /// Returns `ScrapeError::Configuration` if the value is empty or cannot be
    /// carried in a cookie (whitespace, `;`, control characters).
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ScrapeError> {
        let token = raw.as_ref().trim();
        if token.is_empty() {
            return Err(ScrapeError::Configuration(
                "session id is required".to_string(),
            ));
        }
        if token
            .chars()
            .any(|c| c == ';' || c == ',' || c.is_whitespace() || c.is_control())
        {
            return Err(ScrapeError::Configuration(
                "session id contains characters not allowed in a cookie".to_string(),
            ));
        }

        let mut cookie = HeaderValue::from_str(&format!("{SESSION_COOKIE_NAME}={token}"))
            .map_err(|e| ScrapeError::Configuration(format!("invalid session id: {e}")))?;
        cookie.set_sensitive(true);
        Ok(Self { cookie })
    }

    /// The `Cookie` header value carrying the session.
    pub fn cookie_header(&self) -> HeaderValue {
        self.cookie.clone()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Query identifiers of the two relationship edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryHashes {
    /// Identifier of the followers query
    pub followers: String,
    /// Identifier of the following query
    pub following: String,
}

/// Builds the two upstream URLs the engine talks to.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
    query_hashes: QueryHashes,
}

impl Endpoints {
    /// Creates endpoints rooted at `base`.
    ///
    /// A missing trailing slash on `base` is added so relative joins keep the
    /// full base path.
    pub fn new(base: &str, query_hashes: QueryHashes) -> Result<Self, ScrapeError> {
        let mut base = Url::parse(base)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base, query_hashes })
    }

    /// Endpoints described by a [`Config`].
    pub fn from_config(config: &Config) -> Result<Self, ScrapeError> {
        Self::new(
            &config.base_url,
            QueryHashes {
                followers: config.followers_query_hash.clone(),
                following: config.following_query_hash.clone(),
            },
        )
    }

    /// Query identifier configured for `kind`.
    pub fn query_hash(&self, kind: EdgeKind) -> &str {
        match kind {
            EdgeKind::Followers => &self.query_hashes.followers,
            EdgeKind::Following => &self.query_hashes.following,
        }
    }

    /// `<base>/<handle>/`
    ///
    /// The handle must already be validated.
    pub fn profile_url(&self, handle: &str) -> Result<Url, ScrapeError> {
        Ok(self.base.join(&format!("{handle}/"))?)
    }

    /// `<base>/graphql/query/?query_hash=<H>&variables=<JSON>`
    pub fn edge_page_url(
        &self,
        kind: EdgeKind,
        user_id: &str,
        first: u32,
        after: &str,
    ) -> Result<Url, ScrapeError> {
        let variables = edge_page_variables(user_id, first, after);
        let mut url = self.base.join(GRAPHQL_QUERY_PATH)?;
        url.query_pairs_mut()
            .append_pair("query_hash", self.query_hash(kind))
            .append_pair("variables", &variables);
        Ok(url)
    }
}

/// GraphQL `variables` for one page, keys in the order the endpoint expects.
///
/// String values go through `serde_json::Value` so quotes and control
/// characters in a cursor are escaped.
fn edge_page_variables(user_id: &str, first: u32, after: &str) -> String {
    format!(
        r#"{{"id":{},"include_reel":true,"fetch_mutual":false,"first":{first},"after":{}}}"#,
        Value::from(user_id),
        Value::from(after)
    )
}

/// Applies browser navigation headers to a profile page request.
///
/// The profile fetch is a plain page load, so it looks like one: HTML accept
/// types and `sec-fetch-*` navigation markers.
pub(crate) fn apply_navigation_headers(
    builder: reqwest::RequestBuilder,
) -> reqwest::RequestBuilder {
    builder
        .header(
            reqwest::header::ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        )
        .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
        .header(
            reqwest::header::HeaderName::from_static("sec-fetch-dest"),
            "document",
        )
        .header(
            reqwest::header::HeaderName::from_static("sec-fetch-mode"),
            "navigate",
        )
        .header(
            reqwest::header::HeaderName::from_static("sec-fetch-site"),
            "none",
        )
        .header(reqwest::header::UPGRADE_INSECURE_REQUESTS, "1")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints(base: &str) -> Endpoints {
        Endpoints::new(
            base,
            QueryHashes {
                followers: "fhash".to_string(),
                following: "ghash".to_string(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_session_token_rejects_blank() {
        assert!(matches!(
            SessionToken::new("   "),
            Err(ScrapeError::Configuration(_))
        ));
    }

    #[test]
    fn test_session_token_rejects_cookie_injection() {
        assert!(SessionToken::new("abc; csrftoken=x").is_err());
    }

    #[test]
    fn test_session_token_cookie_and_redaction() {
        let token = SessionToken::new(" 123%3Aabc ").unwrap();
        assert_eq!(token.cookie_header(), "sessionid=123%3Aabc");
        assert!(token.cookie_header().is_sensitive());
        assert_eq!(format!("{token:?}"), "SessionToken(<redacted>)");
    }

    #[test]
    fn test_profile_url() {
        let ep = endpoints("https://www.instagram.com/");
        assert_eq!(
            ep.profile_url("alice").unwrap().as_str(),
            "https://www.instagram.com/alice/"
        );
    }

    #[test]
    fn test_base_without_trailing_slash_keeps_path() {
        let ep = endpoints("http://127.0.0.1:8080/mock");
        assert_eq!(
            ep.profile_url("bob").unwrap().as_str(),
            "http://127.0.0.1:8080/mock/bob/"
        );
    }

    #[test]
    fn test_edge_page_url_query() {
        let ep = endpoints("https://www.instagram.com/");
        let url = ep
            .edge_page_url(EdgeKind::Following, "123", 50, "QVFD")
            .unwrap();

        assert_eq!(url.path(), "/graphql/query/");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(pairs[0], ("query_hash".to_string(), "ghash".to_string()));
        assert_eq!(pairs[1].0, "variables");
        assert_eq!(
            pairs[1].1,
            r#"{"id":"123","include_reel":true,"fetch_mutual":false,"first":50,"after":"QVFD"}"#
        );
    }

    #[test]
    fn test_variables_escape_cursor() {
        let variables = edge_page_variables("1", 12, "a\"b\\c");
        let parsed: Value = serde_json::from_str(&variables).unwrap();
        assert_eq!(parsed["after"], "a\"b\\c");
        assert_eq!(parsed["first"], 12);
        assert!(variables.starts_with(r#"{"id":"1","include_reel":true"#));
    }

    #[test]
    fn test_query_hash_per_edge() {
        let ep = endpoints("https://www.instagram.com/");
        assert_eq!(ep.query_hash(EdgeKind::Followers), "fhash");
        assert_eq!(ep.query_hash(EdgeKind::Following), "ghash");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = Endpoints::new(
            "::not a url::",
            QueryHashes {
                followers: "a".into(),
                following: "b".into(),
            },
        );
        assert!(matches!(result, Err(ScrapeError::InvalidUrl(_))));
    }
}
