//! HTTP header name constants.
//!
//! Headers sent with every paginated API request, underneath the rotated
//! client identity.

/// Marks the request as an XHR, which the GraphQL endpoint expects.
pub const HEADER_X_REQUESTED_WITH: &str = "X-Requested-With";
/// CSRF header. The endpoint only checks presence for GET requests.
pub const HEADER_X_CSRF_TOKEN: &str = "X-CSRFToken";

/// Base headers applied to every paginated request.
/// Identity headers (User-Agent) are merged on top of these per attempt.
pub const BASE_API_HEADERS: &[(&str, &str)] = &[
    (HEADER_X_REQUESTED_WITH, "XMLHttpRequest"),
    (HEADER_X_CSRF_TOKEN, "missing"),
];
