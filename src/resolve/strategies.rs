//! User id extraction strategies.
//!
//! Profile pages embed the numeric account id in several ways depending on
//! page version and login state. Each strategy looks for one of them; they
//! are tried in [`ExtractionStrategy::ORDER`], most specific first.

use std::sync::LazyLock;

use log::{debug, error};
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;

const PROFILE_PAGE_MARKER_PATTERN: &str = r#""profilePage_(\d+)""#;
const USER_ID_FIELD_PATTERN: &str = r#""user_id":"(\d+)""#;
const SHARED_DATA_PATTERN: &str = r"window\._sharedData\s*=\s*(\{.+?\});";
const SHARED_DATA_MARKER: &str = "window._sharedData";
const SCRIPT_SELECTOR_STR: &str = "script";

static PROFILE_PAGE_MARKER: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(PROFILE_PAGE_MARKER_PATTERN));
static USER_ID_FIELD: LazyLock<Option<Regex>> = LazyLock::new(|| compile(USER_ID_FIELD_PATTERN));
static SHARED_DATA: LazyLock<Option<Regex>> = LazyLock::new(|| compile(SHARED_DATA_PATTERN));

static SCRIPT_SELECTOR: LazyLock<Option<Selector>> = LazyLock::new(|| {
    Selector::parse(SCRIPT_SELECTOR_STR)
        .map_err(|e| error!("Failed to parse selector '{SCRIPT_SELECTOR_STR}': {e}"))
        .ok()
});

fn compile(pattern: &str) -> Option<Regex> {
    Regex::new(pattern)
        .map_err(|e| error!("Failed to compile pattern '{pattern}': {e}"))
        .ok()
}

/// One known embedding of the account id in a profile page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// `"profilePage_<id>"` page marker
    ProfilePageMarker,
    /// An `"id"` field followed on the same line by the handle's `"username"`
    HandleAssociatedId,
    /// Any `"user_id"` field
    UserIdField,
    /// `window._sharedData` JSON, walked to `entry_data.ProfilePage[0].graphql.user.id`
    SharedData,
}

impl ExtractionStrategy {
    /// Priority order. The first strategy that matches wins.
    pub const ORDER: [ExtractionStrategy; 4] = [
        ExtractionStrategy::ProfilePageMarker,
        ExtractionStrategy::HandleAssociatedId,
        ExtractionStrategy::UserIdField,
        ExtractionStrategy::SharedData,
    ];

    /// Runs this strategy against a raw profile page.
    pub fn extract(&self, html: &str, handle: &str) -> Option<String> {
        match self {
            ExtractionStrategy::ProfilePageMarker => first_capture(&PROFILE_PAGE_MARKER, html),
            ExtractionStrategy::HandleAssociatedId => {
                let pattern = format!(
                    r#""id":"(\d+)".*"username":"{}""#,
                    regex::escape(handle)
                );
                let re = compile(&pattern);
                first_capture(&re, html)
            }
            ExtractionStrategy::UserIdField => first_capture(&USER_ID_FIELD, html),
            ExtractionStrategy::SharedData => extract_shared_data_id(html),
        }
    }

    /// Short name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionStrategy::ProfilePageMarker => "profile page marker",
            ExtractionStrategy::HandleAssociatedId => "handle-associated id",
            ExtractionStrategy::UserIdField => "user_id field",
            ExtractionStrategy::SharedData => "shared data block",
        }
    }
}

impl std::fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tries every strategy in priority order.
///
/// Returns the winning strategy with the id it found, or `None` if the page
/// carries no recognizable id.
pub fn extract_user_id(html: &str, handle: &str) -> Option<(ExtractionStrategy, String)> {
    ExtractionStrategy::ORDER.iter().find_map(|strategy| {
        let id = strategy.extract(html, handle);
        if id.is_none() {
            debug!("Strategy '{strategy}' found no id for '{handle}'");
        }
        id.map(|id| (*strategy, id))
    })
}

fn first_capture(re: &Option<Regex>, haystack: &str) -> Option<String> {
    re.as_ref()?
        .captures(haystack)?
        .get(1)
        .map(|m| m.as_str().to_string())
}

/// Script elements are searched first, then the raw document, since some
/// page versions inline the assignment outside a parsed `<script>` element.
fn extract_shared_data_id(html: &str) -> Option<String> {
    let from_scripts = SCRIPT_SELECTOR.as_ref().and_then(|selector| {
        Html::parse_document(html)
            .select(selector)
            .map(|script| script.text().collect::<String>())
            .filter(|text| text.contains(SHARED_DATA_MARKER))
            .find_map(|text| shared_data_user_id(&text))
    });

    from_scripts.or_else(|| {
        html.contains(SHARED_DATA_MARKER)
            .then(|| shared_data_user_id(html))
            .flatten()
    })
}

fn shared_data_user_id(text: &str) -> Option<String> {
    let json = first_capture(&SHARED_DATA, text)?;
    let value: Value = serde_json::from_str(&json)
        .map_err(|e| debug!("Shared data block is not valid JSON: {e}"))
        .ok()?;
    match value.pointer("/entry_data/ProfilePage/0/graphql/user/id")? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHARED_DATA_PAGE: &str = r#"<html><head>
        <script type="text/javascript">window._sharedData = {"entry_data":{"ProfilePage":[{"graphql":{"user":{"id":"777","full_name":"Alice"}}}]}};</script>
        </head><body></body></html>"#;

    #[test]
    fn test_profile_page_marker() {
        let html = r#"<script>{"page_id":"profilePage_4242","x":1}</script>"#;
        assert_eq!(
            extract_user_id(html, "alice"),
            Some((ExtractionStrategy::ProfilePageMarker, "4242".to_string()))
        );
    }

    #[test]
    fn test_handle_associated_id() {
        let html = r#"{"id":"555","full_name":"Alice","username":"alice"}"#;
        assert_eq!(
            extract_user_id(html, "alice"),
            Some((ExtractionStrategy::HandleAssociatedId, "555".to_string()))
        );
    }

    #[test]
    fn test_handle_with_dot_is_escaped() {
        // '.' in the handle must not match an arbitrary character
        let html = r#"{"id":"555","username":"aXb"}"#;
        assert_eq!(
            ExtractionStrategy::HandleAssociatedId.extract(html, "a.b"),
            None
        );
        let html = r#"{"id":"556","username":"a.b"}"#;
        assert_eq!(
            ExtractionStrategy::HandleAssociatedId.extract(html, "a.b"),
            Some("556".to_string())
        );
    }

    #[test]
    fn test_user_id_field() {
        let html = r#"<script>{"user_id":"9001"}</script>"#;
        assert_eq!(
            extract_user_id(html, "alice"),
            Some((ExtractionStrategy::UserIdField, "9001".to_string()))
        );
    }

    #[test]
    fn test_shared_data_block() {
        assert_eq!(
            extract_user_id(SHARED_DATA_PAGE, "alice"),
            Some((ExtractionStrategy::SharedData, "777".to_string()))
        );
    }

    #[test]
    fn test_shared_data_numeric_id() {
        let html = r#"<script>window._sharedData = {"entry_data":{"ProfilePage":[{"graphql":{"user":{"id":31}}}]}};</script>"#;
        assert_eq!(
            ExtractionStrategy::SharedData.extract(html, "alice"),
            Some("31".to_string())
        );
    }

    #[test]
    fn test_shared_data_outside_script_element() {
        let html = r#"<html><body><div>window._sharedData = {"entry_data":{"ProfilePage":[{"graphql":{"user":{"id":"4242"}}}]}};</div></body></html>"#;
        assert_eq!(
            extract_user_id(html, "alice"),
            Some((ExtractionStrategy::SharedData, "4242".to_string()))
        );
    }

    #[test]
    fn test_marker_wins_over_shared_data() {
        let html = format!(
            r#"{SHARED_DATA_PAGE}<div data-page="profilePage_111"></div><script>"profilePage_111"</script>"#
        );
        assert_eq!(
            extract_user_id(&html, "alice"),
            Some((ExtractionStrategy::ProfilePageMarker, "111".to_string()))
        );
    }

    #[test]
    fn test_no_id_found() {
        assert_eq!(extract_user_id("<html><body>Login</body></html>", "alice"), None);
    }

    #[test]
    fn test_shared_data_without_profile_page() {
        let html = r#"<script>window._sharedData = {"entry_data":{"LoginAndSignupPage":[{}]}};</script>"#;
        assert_eq!(ExtractionStrategy::SharedData.extract(html, "alice"), None);
    }
}
