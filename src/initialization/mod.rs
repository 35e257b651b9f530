//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger (plain or JSON, optionally teed to a file)
//! - HTTP clients for the paginated API and the profile page
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;

// Re-export public API
pub use client::{init_client, init_profile_client};
pub use logger::{init_logger_to_file, init_logger_with};
