//! Report destinations.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::error_handling::ScrapeError;

const RULE_WIDTH: usize = 50;

/// Accepts the sorted non-follower list.
pub trait ResultSink {
    /// Writes `names` (already sorted) under a count header.
    ///
    /// # Errors
    ///
    /// Returns `ScrapeError::SinkWrite` if the destination cannot be written.
    fn write_report(&self, names: &[String]) -> Result<(), ScrapeError>;

    /// Human-readable destination name for log lines.
    fn destination(&self) -> String;
}

/// Writes the list to a text file, replacing any previous content.
#[derive(Debug, Clone)]
pub struct TextFileSink {
    path: PathBuf,
}

impl TextFileSink {
    /// A sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_to(&self, names: &[String]) -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        writeln!(writer, "Accounts not following back ({}):", names.len())?;
        writeln!(writer, "{}", "=".repeat(RULE_WIDTH))?;
        for name in names {
            writeln!(writer, "{name}")?;
        }
        writer.flush()
    }
}

impl ResultSink for TextFileSink {
    fn write_report(&self, names: &[String]) -> Result<(), ScrapeError> {
        self.write_to(names).map_err(|source| ScrapeError::SinkWrite {
            path: self.path.clone(),
            source,
        })?;
        info!("Saved {} names to {}", names.len(), self.path.display());
        Ok(())
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}
