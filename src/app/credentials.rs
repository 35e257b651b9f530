//! Session credential sources.
//!
//! The engine only ever sees the resulting [`SessionToken`]; where the raw
//! value comes from is decided here.

use std::io::{self, BufRead, Write};

use log::debug;

/// Something that may yield a raw session id.
pub trait CredentialProvider {
    /// Returns the session id, or `None` if this source has none.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the source could not be read.
    fn session_id(&mut self) -> io::Result<Option<String>>;
}

/// Reads the session id from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    /// Reads from `var`.
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialProvider for EnvCredentials {
    fn session_id(&mut self) -> io::Result<Option<String>> {
        let value = std::env::var(&self.var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        if value.is_some() {
            debug!("Session id read from ${}", self.var);
        }
        Ok(value)
    }
}

/// Prompts for the session id on a reader/writer pair (stdin/stdout in the
/// binary).
pub struct PromptCredentials<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> PromptCredentials<R, W> {
    /// Prompts on the given streams.
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: BufRead, W: Write> CredentialProvider for PromptCredentials<R, W> {
    fn session_id(&mut self) -> io::Result<Option<String>> {
        read_prompted_line(&mut self.reader, &mut self.writer, "Session id: ")
    }
}

/// Tries each provider in turn; the first non-empty value wins.
#[derive(Default)]
pub struct ChainedCredentials {
    providers: Vec<Box<dyn CredentialProvider>>,
}

impl ChainedCredentials {
    /// An empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a provider to the chain.
    pub fn with(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }
}

impl CredentialProvider for ChainedCredentials {
    fn session_id(&mut self) -> io::Result<Option<String>> {
        for provider in &mut self.providers {
            if let Some(id) = provider.session_id()? {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }
}

/// Writes `prompt`, then reads one line.
///
/// Returns the trimmed line, or `None` at end of input or for a blank line.
///
/// # Errors
///
/// Returns an I/O error if writing the prompt or reading the line fails.
pub fn read_prompted_line<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(writer, "{prompt}")?;
    writer.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let line = line.trim();
    Ok((!line.is_empty()).then(|| line.to_string()))
}
