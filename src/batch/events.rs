//! Structured batch progress events and their sinks

use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;

use log::{debug, error, info, warn};

use super::matcher::PairingStrategy;

/// Orchestrator stages, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStage {
    /// Resolving inputs and creating the output and temporary folders
    Validating,
    /// Pairing identification files with spectral files
    Pairing,
    /// Converting each entry to an intermediate file
    Converting,
    /// Merging intermediate files into the final output
    Merging,
    /// Finished
    Done,
}

impl fmt::Display for BatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BatchStage::Validating => "validating",
            BatchStage::Pairing => "pairing",
            BatchStage::Converting => "converting",
            BatchStage::Merging => "merging",
            BatchStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Something that happened during a batch run
#[derive(Debug, Clone, PartialEq)]
pub enum BatchEvent {
    /// The orchestrator entered a stage
    StageEntered(BatchStage),
    /// Inputs were resolved to files
    InputsResolved {
        /// Number of idXML files
        identification: usize,
        /// Number of mzML files, if a spectral set was given
        spectral: Option<usize>,
    },
    /// The scoped temporary directory was created
    TempAreaCreated {
        /// Directory path
        path: PathBuf,
    },
    /// Pairing finished
    PairingBuilt {
        /// Strategy used
        strategy: PairingStrategy,
        /// Number of entries
        entries: usize,
        /// Entries with a spectral file
        paired: usize,
    },
    /// An entry has no spectral file although a spectral set was given
    EntryUnpaired {
        /// Entry index
        index: usize,
        /// idXML file
        identification: PathBuf,
        /// Strategy used
        strategy: PairingStrategy,
    },
    /// An entry started converting
    EntryStarted {
        /// Entry index
        index: usize,
        /// Number of entries
        total: usize,
        /// idXML file
        identification: PathBuf,
        /// Paired mzML file
        spectral: Option<PathBuf>,
    },
    /// An entry was converted
    EntrySucceeded {
        /// Entry index
        index: usize,
        /// idXML file
        identification: PathBuf,
        /// Records written
        records: usize,
        /// Intermediate file
        output: PathBuf,
    },
    /// An entry failed to convert
    EntryFailed {
        /// Entry index
        index: usize,
        /// idXML file
        identification: PathBuf,
        /// Rendered cause
        error: String,
    },
    /// An entry was not attempted because an earlier one failed in fail-fast mode
    EntrySkipped {
        /// Entry index
        index: usize,
        /// idXML file
        identification: PathBuf,
    },
    /// Merge started
    MergeStarted {
        /// Number of intermediate files
        inputs: usize,
    },
    /// Merge finished
    MergeCompleted {
        /// Final output path
        output: PathBuf,
        /// Rows in the merged output
        records: usize,
    },
    /// The scoped temporary directory was removed
    TempAreaRemoved {
        /// Directory path
        path: PathBuf,
    },
    /// The batch failed
    BatchFailed {
        /// Stage the failure happened in
        stage: BatchStage,
        /// Rendered cause
        error: String,
    },
}

/// Receives batch events.
///
/// Implementations must be thread-safe: with the `parallel` feature events
/// are still emitted from the orchestrating thread, but the observer is
/// shared with it through an `Arc`.
pub trait BatchObserver: Send + Sync {
    /// Handle one event
    fn on_event(&self, event: &BatchEvent);
}

/// Forwards every event to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl BatchObserver for LogObserver {
    fn on_event(&self, event: &BatchEvent) {
        match event {
            BatchEvent::StageEntered(stage) => debug!("Batch stage: {}", stage),
            BatchEvent::InputsResolved {
                identification,
                spectral,
            } => match spectral {
                Some(spectral) => info!(
                    "Found {} idXML file(s) and {} mzML file(s)",
                    identification, spectral
                ),
                None => info!("Found {} idXML file(s)", identification),
            },
            BatchEvent::TempAreaCreated { path } => {
                debug!("Using temporary directory {}", path.display())
            }
            BatchEvent::PairingBuilt {
                strategy,
                entries,
                paired,
            } => info!(
                "Pairing by {}: {}/{} idXML file(s) have an mzML file",
                strategy, paired, entries
            ),
            BatchEvent::EntryUnpaired {
                identification,
                strategy,
                ..
            } => warn!(
                "No mzML file paired with {} ({} pairing), converting without spectra",
                identification.display(),
                strategy
            ),
            BatchEvent::EntryStarted {
                index,
                total,
                identification,
                spectral,
            } => match spectral {
                Some(spectral) => info!(
                    "[{}/{}] Converting {} with {}",
                    index + 1,
                    total,
                    identification.display(),
                    spectral.display()
                ),
                None => info!(
                    "[{}/{}] Converting {}",
                    index + 1,
                    total,
                    identification.display()
                ),
            },
            BatchEvent::EntrySucceeded {
                identification,
                records,
                output,
                ..
            } => debug!(
                "Converted {} ({} PSMs) to {}",
                identification.display(),
                records,
                output.display()
            ),
            BatchEvent::EntryFailed {
                identification,
                error,
                ..
            } => warn!("Failed to convert {}: {}", identification.display(), error),
            BatchEvent::EntrySkipped { identification, .. } => {
                warn!("Skipped {} after an earlier failure", identification.display())
            }
            BatchEvent::MergeStarted { inputs } => info!("Merging {} file(s)", inputs),
            BatchEvent::MergeCompleted { output, records } => {
                info!("Wrote {} PSMs to {}", records, output.display())
            }
            BatchEvent::TempAreaRemoved { path } => {
                debug!("Removed temporary directory {}", path.display())
            }
            BatchEvent::BatchFailed { stage, error: err } => {
                error!("Batch failed while {}: {}", stage, err)
            }
        }
    }
}

/// Keeps every event in memory
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<BatchEvent>>,
}

impl RecordingObserver {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far
    pub fn events(&self) -> Vec<BatchEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl BatchObserver for RecordingObserver {
    fn on_event(&self, event: &BatchEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}
