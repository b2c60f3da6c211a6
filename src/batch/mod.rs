//! # Batch Conversion
//!
//! Converts a set of idXML files, each optionally paired with an mzML file,
//! into a single merged PSM Parquet file.
//!
//! A run moves through fixed stages:
//!
//! ```text
//! Validating -> Pairing -> Converting -> Merging -> Done
//! ```
//!
//! - **Validating** resolves [`BatchInputs`] to existing files, creates the
//!   output folder and a fresh `idxml_batch_*` temporary directory.
//! - **Pairing** builds a [`Pairing`] by index (two explicit lists) or by
//!   file stem (any directory scan).
//! - **Converting** writes one intermediate file per entry. Failures are
//!   recorded and skipped unless [`BatchConfig::fail_fast`] is set.
//! - **Merging** concatenates the intermediates, in input order, into
//!   `{prefix}-{uuid}.psm.parquet`.
//!
//! The temporary directory is removed before [`BatchConverter::run`] returns,
//! on success and on failure. Progress is reported as [`BatchEvent`]s to a
//! [`BatchObserver`]; the default [`LogObserver`] writes them to the `log`
//! facade.
//!
//! # Example
//! ```rust,no_run
//! use idxml_psm::batch::{BatchConfig, BatchConverter, BatchInputs, InputSource};
//!
//! let inputs = BatchInputs::new(InputSource::Directory("results/".into()), None);
//! let report = BatchConverter::new(BatchConfig::new("out/")).run(&inputs)?;
//! println!("{} PSMs written to {}", report.records, report.output.display());
//! # Ok::<(), idxml_psm::batch::BatchError>(())
//! ```

mod converter;
mod error;
mod events;
mod input;
mod matcher;
mod merge;
mod naming;


use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::warn;

use crate::psm::{IdXmlParser, PsmParser};
use crate::schema::PSM_PARQUET_SUFFIX;
use crate::writer::WriterConfig;

pub use converter::{convert_file, convert_one, ConversionError, ConvertedFile};
pub use error::{BatchError, EntryFailure, FailureSummary};
pub use events::{BatchEvent, BatchObserver, BatchStage, LogObserver, RecordingObserver};
pub use input::{BatchInputs, InputMode, InputRole, InputSet, InputSource};
pub use matcher::{build_pairing, file_stem_key, PairedEntry, Pairing, PairingStrategy};
pub use merge::{merge_outputs, MergeError, MergeStats};
pub use naming::{
    intermediate_file_name, unique_file_name, INTERMEDIATE_PREFIX, TEMP_DIR_PREFIX,
};

/// Default prefix of the merged output file
pub const DEFAULT_OUTPUT_PREFIX: &str = "merged-psm";

/// Batch run settings
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Folder receiving the merged output
    pub output_folder: PathBuf,
    /// Merged output is named `{output_prefix}-{uuid}.psm.parquet`
    pub output_prefix: String,
    /// Abort on the first failed entry
    pub fail_fast: bool,
    /// Conversion workers; values above 1 need the `parallel` feature
    pub workers: usize,
    /// Parquet settings for intermediate and merged files
    pub writer_config: WriterConfig,
    /// Parent of the temporary directory; the system temp dir when `None`
    pub temp_root: Option<PathBuf>,
}

impl BatchConfig {
    /// Sequential, continue-on-error run writing to `output_folder`
    pub fn new<P: Into<PathBuf>>(output_folder: P) -> Self {
        Self {
            output_folder: output_folder.into(),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            fail_fast: false,
            workers: 1,
            writer_config: WriterConfig::default(),
            temp_root: None,
        }
    }

    /// Set the output file prefix
    pub fn with_output_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.output_prefix = prefix.into();
        self
    }

    /// Abort on the first failure
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Set the number of conversion workers (at least 1)
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set the Parquet writer settings
    pub fn with_writer_config(mut self, writer_config: WriterConfig) -> Self {
        self.writer_config = writer_config;
        self
    }

    /// Create the temporary directory under `root`
    pub fn with_temp_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.temp_root = Some(root.into());
        self
    }
}

/// Outcome of a successful run
#[derive(Debug)]
pub struct BatchReport {
    /// Merged output file
    pub output: PathBuf,
    /// Rows in the merged output
    pub records: usize,
    /// Pairing strategy used
    pub strategy: PairingStrategy,
    /// Entries converted and merged
    pub converted: usize,
    /// Merged rows carrying spectrum peaks
    pub enriched: usize,
    /// Entries that failed and were skipped
    pub failures: Vec<EntryFailure>,
}

type EntryOutcomes = (Vec<ConvertedFile>, Vec<EntryFailure>);

/// Runs batch conversions
pub struct BatchConverter<P: PsmParser = IdXmlParser> {
    parser: P,
    config: BatchConfig,
    observer: Arc<dyn BatchObserver>,
}

impl BatchConverter<IdXmlParser> {
    /// Batch converter for idXML files
    pub fn new(config: BatchConfig) -> Self {
        Self::with_parser(config, IdXmlParser)
    }
}

impl<P: PsmParser> BatchConverter<P> {
    /// Batch converter using a custom parser
    pub fn with_parser(config: BatchConfig, parser: P) -> Self {
        Self {
            parser,
            config,
            observer: Arc::new(LogObserver),
        }
    }

    /// Replace the event observer
    pub fn with_observer(mut self, observer: Arc<dyn BatchObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Run settings
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Run the batch
    pub fn run(&self, inputs: &BatchInputs) -> Result<BatchReport, BatchError> {
        let mut stage = BatchStage::Validating;
        let result = self.run_stages(inputs, &mut stage);
        match &result {
            Ok(_) => self.enter(&mut stage, BatchStage::Done),
            Err(e) => self.emit(BatchEvent::BatchFailed {
                stage,
                error: e.to_string(),
            }),
        }
        result
    }

    fn run_stages(
        &self,
        inputs: &BatchInputs,
        stage: &mut BatchStage,
    ) -> Result<BatchReport, BatchError> {
        self.enter(stage, BatchStage::Validating);
        let (identification, spectral) = inputs.resolve()?;
        self.emit(BatchEvent::InputsResolved {
            identification: identification.len(),
            spectral: spectral.as_ref().map(InputSet::len),
        });

        fs::create_dir_all(&self.config.output_folder)?;
        let builder = {
            let mut builder = tempfile::Builder::new();
            builder.prefix(TEMP_DIR_PREFIX);
            builder
        };
        let temp = match &self.config.temp_root {
            Some(root) => {
                fs::create_dir_all(root)?;
                builder.tempdir_in(root)?
            }
            None => builder.tempdir()?,
        };
        let temp_path = temp.path().to_path_buf();
        self.emit(BatchEvent::TempAreaCreated {
            path: temp_path.clone(),
        });

        let outcome = self.process(&identification, spectral.as_ref(), &temp_path, stage);

        match temp.close() {
            Ok(()) => self.emit(BatchEvent::TempAreaRemoved { path: temp_path }),
            Err(e) => warn!(
                "Failed to remove temporary directory {}: {}",
                temp_path.display(),
                e
            ),
        }

        outcome
    }

    fn process(
        &self,
        identification: &InputSet,
        spectral: Option<&InputSet>,
        temp_dir: &Path,
        stage: &mut BatchStage,
    ) -> Result<BatchReport, BatchError> {
        self.enter(stage, BatchStage::Pairing);
        let pairing = build_pairing(identification, spectral);
        self.emit(BatchEvent::PairingBuilt {
            strategy: pairing.strategy(),
            entries: pairing.len(),
            paired: pairing.paired_count(),
        });
        if spectral.is_some() {
            for entry in pairing.entries().iter().filter(|e| e.spectral.is_none()) {
                self.emit(BatchEvent::EntryUnpaired {
                    index: entry.index,
                    identification: entry.identification.clone(),
                    strategy: pairing.strategy(),
                });
            }
        }

        self.enter(stage, BatchStage::Converting);
        let (converted, failures) = self.convert_entries(pairing.entries(), temp_dir)?;

        self.enter(stage, BatchStage::Merging);
        if converted.is_empty() {
            return Err(BatchError::EmptyResult {
                attempted: pairing.len(),
                failures,
            });
        }

        let paths: Vec<PathBuf> = converted.iter().map(|c| c.path.clone()).collect();
        self.emit(BatchEvent::MergeStarted {
            inputs: paths.len(),
        });
        let output = self.config.output_folder.join(unique_file_name(
            &self.config.output_prefix,
            PSM_PARQUET_SUFFIX,
        ));
        let stats = merge_outputs(&paths, &output, &self.config.writer_config)?;
        self.emit(BatchEvent::MergeCompleted {
            output: stats.output.clone(),
            records: stats.records,
        });

        Ok(BatchReport {
            output: stats.output,
            records: stats.records,
            strategy: pairing.strategy(),
            converted: converted.len(),
            enriched: converted.iter().map(|c| c.enriched).sum(),
            failures,
        })
    }

    fn convert_entries(
        &self,
        entries: &[PairedEntry],
        temp_dir: &Path,
    ) -> Result<EntryOutcomes, BatchError> {
        #[cfg(feature = "parallel")]
        if self.config.workers > 1 {
            return self.convert_parallel(entries, temp_dir);
        }

        #[cfg(not(feature = "parallel"))]
        if self.config.workers > 1 {
            log::debug!(
                "Built without the parallel feature, converting {} entries sequentially",
                entries.len()
            );
        }

        let mut converted = Vec::with_capacity(entries.len());
        let mut failures = Vec::new();
        for (position, entry) in entries.iter().enumerate() {
            self.emit_started(entry, entries.len());
            let outcome = convert_one(
                &self.parser,
                entry,
                temp_dir,
                &self.config.writer_config,
            );
            if let Err(failure) = self.record_outcome(entry, outcome, &mut converted) {
                if self.config.fail_fast {
                    self.skip_remaining(&entries[position + 1..]);
                    return Err(BatchError::Entry(Box::new(failure)));
                }
                failures.push(failure);
            }
        }
        Ok((converted, failures))
    }

    /// Convert on a bounded rayon pool. Outcomes are collected in input order
    /// and recorded on the calling thread.
    #[cfg(feature = "parallel")]
    fn convert_parallel(
        &self,
        entries: &[PairedEntry],
        temp_dir: &Path,
    ) -> Result<EntryOutcomes, BatchError> {
        use rayon::prelude::*;
        use std::sync::atomic::{AtomicBool, Ordering};

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .build()
            .map_err(|e| BatchError::WorkerPool(e.to_string()))?;

        let abort = AtomicBool::new(false);
        let outcomes: Vec<Option<Result<ConvertedFile, ConversionError>>> = pool.install(|| {
            entries
                .par_iter()
                .map(|entry| {
                    if abort.load(Ordering::Relaxed) {
                        return None;
                    }
                    self.emit_started(entry, entries.len());
                    let outcome = convert_one(
                        &self.parser,
                        entry,
                        temp_dir,
                        &self.config.writer_config,
                    );
                    if outcome.is_err() && self.config.fail_fast {
                        abort.store(true, Ordering::Relaxed);
                    }
                    Some(outcome)
                })
                .collect()
        });

        let mut converted = Vec::with_capacity(entries.len());
        let mut failures = Vec::new();
        for (position, (entry, outcome)) in entries.iter().zip(outcomes).enumerate() {
            let Some(outcome) = outcome else {
                self.emit(BatchEvent::EntrySkipped {
                    index: entry.index,
                    identification: entry.identification.clone(),
                });
                continue;
            };
            if let Err(failure) = self.record_outcome(entry, outcome, &mut converted) {
                if self.config.fail_fast {
                    self.skip_remaining(&entries[position + 1..]);
                    return Err(BatchError::Entry(Box::new(failure)));
                }
                failures.push(failure);
            }
        }
        Ok((converted, failures))
    }

    fn record_outcome(
        &self,
        entry: &PairedEntry,
        outcome: Result<ConvertedFile, ConversionError>,
        converted: &mut Vec<ConvertedFile>,
    ) -> Result<(), EntryFailure> {
        match outcome {
            Ok(file) => {
                self.emit(BatchEvent::EntrySucceeded {
                    index: entry.index,
                    identification: entry.identification.clone(),
                    records: file.records,
                    output: file.path.clone(),
                });
                converted.push(file);
                Ok(())
            }
            Err(error) => {
                self.emit(BatchEvent::EntryFailed {
                    index: entry.index,
                    identification: entry.identification.clone(),
                    error: error.to_string(),
                });
                Err(EntryFailure {
                    index: entry.index,
                    identification: entry.identification.clone(),
                    spectral: entry.spectral.clone(),
                    error,
                })
            }
        }
    }

    fn skip_remaining(&self, entries: &[PairedEntry]) {
        for entry in entries {
            self.emit(BatchEvent::EntrySkipped {
                index: entry.index,
                identification: entry.identification.clone(),
            });
        }
    }

    fn emit_started(&self, entry: &PairedEntry, total: usize) {
        self.emit(BatchEvent::EntryStarted {
            index: entry.index,
            total,
            identification: entry.identification.clone(),
            spectral: entry.spectral.clone(),
        });
    }

    fn enter(&self, current: &mut BatchStage, next: BatchStage) {
        *current = next;
        self.emit(BatchEvent::StageEntered(next));
    }

    fn emit(&self, event: BatchEvent) {
        self.observer.on_event(&event);
    }
}
