// Shared test helpers for mock server setup and page fixtures.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use httptest::Server;
use serde_json::{json, Value};

use follow_audit::Config;

/// Followers query identifier used by every test config.
pub const FOLLOWERS_HASH: &str = "followers-hash";
/// Following query identifier used by every test config.
pub const FOLLOWING_HASH: &str = "following-hash";

/// A config pointed at `server` with every delay set to zero.
#[allow(dead_code)] // Used by other test files
pub fn test_config(server: &Server) -> Config {
    Config {
        base_url: server.url_str("/"),
        followers_query_hash: FOLLOWERS_HASH.to_string(),
        following_query_hash: FOLLOWING_HASH.to_string(),
        user_agents: vec!["integration-test/1.0".to_string()],
        request_delay_min_secs: 0.0,
        request_delay_max_secs: 0.0,
        rate_limit_backoff_min_secs: 0.0,
        rate_limit_backoff_max_secs: 0.0,
        transport_backoff_min_secs: 0.0,
        transport_backoff_max_secs: 0.0,
        timeout_seconds: 5,
        profile_timeout_seconds: 5,
        ..Default::default()
    }
}

/// A GraphQL page body for `edge_key`.
#[allow(dead_code)] // Used by other test files
pub fn edge_page(edge_key: &str, names: &[&str], has_next: bool, cursor: &str) -> Value {
    let edges: Vec<Value> = names
        .iter()
        .map(|n| json!({ "node": { "username": n, "full_name": "" } }))
        .collect();
    json!({
        "data": { "user": { edge_key: {
            "count": names.len(),
            "page_info": { "has_next_page": has_next, "end_cursor": cursor },
            "edges": edges
        }}},
        "status": "ok"
    })
}

/// A profile page embedding `user_id` next to `handle`.
#[allow(dead_code)] // Used by other test files
pub fn profile_page(handle: &str, user_id: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>@{handle}</title></head><body>
<script type="application/json">{{"id":"{user_id}","username":"{handle}","is_private":false}}</script>
</body></html>"#
    )
}
