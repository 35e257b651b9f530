//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `follow_audit` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Credential and handle prompting
//! - User-facing output and the report file
//!
//! All core functionality is implemented in the library crate.

use std::io::{self, BufRead, Write};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};

use follow_audit::app::{
    read_prompted_line, render_report, ChainedCredentials, CredentialProvider, EnvCredentials,
    PromptCredentials, ResultSink, TextFileSink,
};
use follow_audit::initialization::{init_logger_to_file, init_logger_with};
use follow_audit::{run_analysis, Config, SessionToken};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // This allows keeping the session id in .env instead of the shell history
    if dotenvy::dotenv().is_err() {
        // If .env not found in current dir, try next to the executable
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    // Parse command-line arguments into Config
    let config = Config::parse();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    match &config.log_file {
        Some(path) => init_logger_to_file(log_level.into(), log_format, path),
        None => init_logger_with(log_level.into(), log_format),
    }
    .context("Failed to initialize logger")?;

    if let Err(e) = config.validate() {
        eprintln!("follow_audit error: {e}");
        process::exit(2);
    }

    let stdin = io::stdin();
    let session = match read_session(&config, stdin.lock()) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("follow_audit error: {e:#}");
            process::exit(2);
        }
    };

    let handle = match &config.handle {
        Some(handle) => handle.clone(),
        None => {
            let mut stdout = io::stdout();
            match read_prompted_line(&mut stdin.lock(), &mut stdout, "Username to analyse: ")
                .context("Failed to read username")?
            {
                Some(handle) => handle,
                None => {
                    eprintln!("follow_audit error: a username is required");
                    process::exit(2);
                }
            }
        }
    };

    let report = tokio::select! {
        result = run_analysis(&config, session, &handle) => result,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, no report written");
            process::exit(130);
        }
    };

    let report = match report {
        Ok(report) => report,
        Err(e) => {
            error!("Analysis failed: {e}");
            eprintln!("follow_audit error: {e}");
            process::exit(1);
        }
    };

    print!("{}", render_report(&report));

    if config.no_save {
        info!("--no-save given, report file not written");
    } else if !report.non_followers.is_empty() {
        let sink = TextFileSink::new(&config.output);
        match sink.write_report(&report.sorted_non_followers()) {
            Ok(()) => println!("Results saved in {}", sink.destination()),
            // The printed report stays valid
            Err(e) => error!("{e}"),
        }
    }
    io::stdout().flush().ok();
    Ok(())
}

/// Reads the session id from the configured environment variable, falling
/// back to a prompt.
fn read_session<R: BufRead + 'static>(config: &Config, reader: R) -> Result<SessionToken> {
    let mut credentials = ChainedCredentials::new()
        .with(EnvCredentials::new(&config.session_env))
        .with(PromptCredentials::new(reader, io::stdout()));

    let raw = credentials
        .session_id()
        .context("Failed to read session id")?
        .with_context(|| {
            format!(
                "a session id is required (set {} or enter it at the prompt)",
                config.session_env
            )
        })?;
    Ok(SessionToken::new(raw)?)
}
