//! HTTP fetching for the paginated API.
//!
//! This module provides:
//! - [`RequestExecutor`]: retrying GET with identity rotation and pacing
//! - [`Endpoints`] and [`SessionToken`]: URL and credential handling
//! - [`Pacing`] / [`JitterRange`]: randomized delay intervals

mod executor;
mod pacing;
mod request;

pub use executor::RequestExecutor;
pub use pacing::{JitterRange, Pacing};
pub(crate) use request::apply_navigation_headers;
pub use request::{Endpoints, QueryHashes, SessionToken};
