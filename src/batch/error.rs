use std::fmt;
use std::path::PathBuf;

use super::converter::ConversionError;
use super::merge::MergeError;

/// A batch entry that could not be converted
#[derive(Debug, thiserror::Error)]
#[error("{}: {error}", .identification.display())]
pub struct EntryFailure {
    /// Entry index
    pub index: usize,
    /// idXML file
    pub identification: PathBuf,
    /// Paired mzML file
    pub spectral: Option<PathBuf>,
    /// Cause
    #[source]
    pub error: ConversionError,
}

/// Errors that can occur while running a batch
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// Invalid or conflicting input options
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An entry failed in fail-fast mode
    #[error("Conversion failed for {0}")]
    Entry(Box<EntryFailure>),

    /// No entry was converted
    #[error("No parquet files were successfully generated ({} of {attempted} entries failed)", .failures.len())]
    EmptyResult {
        /// Number of entries attempted
        attempted: usize,
        /// Why each entry failed
        failures: Vec<EntryFailure>,
    },

    /// The final merge failed
    #[error("Merge failed: {0}")]
    Merge(#[from] MergeError),

    /// I/O error creating the output or temporary folder
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The worker pool could not be started
    #[error("Worker pool error: {0}")]
    WorkerPool(String),
}

impl BatchError {
    /// Whether the error was raised before any file was converted
    pub fn is_configuration(&self) -> bool {
        matches!(self, BatchError::Configuration(_))
    }
}

/// Summary line for a list of failures, used by the CLI
pub struct FailureSummary<'a>(pub &'a [EntryFailure]);

impl fmt::Display for FailureSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {}", failure)?;
        }
        Ok(())
    }
}
