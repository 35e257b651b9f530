//! Error handling and request statistics.
//!
//! This module provides:
//! - Error type definitions (initialization, engine failures, collection faults)
//! - Status and transport-error categorization
//! - Per-attempt request statistics
//!
//! Failures are split by how far they propagate:
//! - **Fatal**: [`ScrapeError`], returned to the caller and aborting the run
//! - **Partial**: [`CollectionFault`], recorded alongside a truncated list

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_transport_error, classify_status, ResponseClass};
pub use stats::RequestStats;
pub use types::{CollectionFault, InitializationError, RequestEvent, ScrapeError};
