//! Application shell around the analysis engine.
//!
//! This module provides the collaborators the binary wires in: credential
//! sources, report sinks, console rendering and statistics printing.

pub mod credentials;
pub mod output;
pub mod sink;
pub mod statistics;

// Re-export public API
pub use credentials::{
    read_prompted_line, ChainedCredentials, CredentialProvider, EnvCredentials, PromptCredentials,
};
pub use output::render_report;
pub use sink::{ResultSink, TextFileSink};
pub use statistics::print_request_statistics;
