//! follow_audit library: finds the accounts you follow that do not follow back
//!
//! This library resolves an account handle to its numeric id, walks the
//! followers and following lists through the platform's paginated GraphQL API
//! (with retries, rate-limit backoff and User-Agent rotation), and computes
//! the set difference between them.
//!
//! # Example
//!
//! ```no_run
//! use follow_audit::{run_analysis, Config, SessionToken};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     max_retries: 5,
//!     ..Default::default()
//! };
//! let session = SessionToken::new(std::env::var("INSTAGRAM_SESSION_ID")?)?;
//!
//! let report = run_analysis(&config, session, "alice").await?;
//! println!(
//!     "{} of {} accounts do not follow back",
//!     report.non_follower_count(),
//!     report.following_count
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

mod analysis;
pub mod app;
mod collect;
pub mod config;
mod error_handling;
mod fetch;
pub mod initialization;
mod resolve;
mod user_agent;

// Re-export public API
pub use analysis::{Analyzer, NonFollowerReport};
pub use collect::{Collection, CollectionOutcome, Collector, EdgeKind, EdgePage};
pub use config::{Config, ConfigValidationError, LogFormat, LogLevel};
pub use error_handling::{
    categorize_transport_error, classify_status, CollectionFault, InitializationError,
    RequestEvent, RequestStats, ResponseClass, ScrapeError,
};
pub use fetch::{Endpoints, JitterRange, Pacing, QueryHashes, RequestExecutor, SessionToken};
pub use resolve::{extract_user_id, validate_handle, ExtractionStrategy, UserResolver};
pub use run::run_analysis;
pub use user_agent::IdentityRotator;

// Internal run module (one complete analysis with statistics logging)
mod run {
    use crate::analysis::{Analyzer, NonFollowerReport};
    use crate::app::print_request_statistics;
    use crate::config::Config;
    use crate::error_handling::ScrapeError;
    use crate::fetch::SessionToken;

    /// Runs one analysis of `handle` with the provided configuration.
    ///
    /// Builds the engine, resolves the handle, collects both lists and logs
    /// the request counters whether or not the analysis succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, or if the handle is
    /// invalid or cannot be resolved. Faults during list collection do not
    /// fail the run; they are recorded in [`NonFollowerReport::incomplete`].
    pub async fn run_analysis(
        config: &Config,
        session: SessionToken,
        handle: &str,
    ) -> Result<NonFollowerReport, ScrapeError> {
        let analyzer = Analyzer::new(config, session)?;
        let result = analyzer.analyze(handle).await;
        print_request_statistics(analyzer.request_stats());
        result
    }
}
