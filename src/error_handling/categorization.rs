//! Response and error categorization.
//!
//! Maps HTTP statuses and `reqwest::Error`s onto the small vocabulary the
//! request executor branches on and logs with.

use reqwest::StatusCode;

use super::types::RequestEvent;
use crate::config::HTTP_STATUS_TOO_MANY_REQUESTS;

/// How the executor should treat a received status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    /// 200: throttle, then hand back the body
    Success,
    /// 429: back off and retry without consuming an attempt
    RateLimited,
    /// Anything else: log and retry, consuming an attempt
    Unexpected,
}

/// Classifies a response status.
///
/// Only 200 counts as success. Other 2xx codes (204 and friends) carry no page
/// body and are retried like any other unexpected status.
pub fn classify_status(status: StatusCode) -> ResponseClass {
    if status == StatusCode::OK {
        ResponseClass::Success
    } else if status.as_u16() == HTTP_STATUS_TOO_MANY_REQUESTS {
        ResponseClass::RateLimited
    } else {
        ResponseClass::Unexpected
    }
}

impl From<ResponseClass> for RequestEvent {
    fn from(class: ResponseClass) -> Self {
        match class {
            ResponseClass::Success => RequestEvent::Success,
            ResponseClass::RateLimited => RequestEvent::RateLimited,
            ResponseClass::Unexpected => RequestEvent::UnexpectedStatus,
        }
    }
}

/// Categorizes a transport-level `reqwest::Error` into a [`RequestEvent`].
pub fn categorize_transport_error(error: &reqwest::Error) -> RequestEvent {
    if error.is_timeout() {
        RequestEvent::Timeout
    } else if error.is_connect() {
        RequestEvent::Connect
    } else if error.is_body() || error.is_decode() {
        RequestEvent::Body
    } else {
        RequestEvent::OtherTransport
    }
}
