use anyhow::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;

use idxml_psm::batch::{
    BatchConfig, BatchConverter, BatchError, BatchInputs, FailureSummary, LogObserver,
    PairingStrategy, DEFAULT_OUTPUT_PREFIX,
};

use super::config::Config;
use super::Profile;

/// Options of the `convert-batch` command
pub struct BatchArgs {
    pub idxml_folder: Option<PathBuf>,
    pub idxml_files: Option<String>,
    pub output_folder: PathBuf,
    pub output_prefix: Option<String>,
    pub mzml_folder: Option<PathBuf>,
    pub mzml_files: Option<String>,
    pub fail_fast: bool,
    pub workers: Option<usize>,
    pub profile: Profile,
    pub config: Option<PathBuf>,
}

/// Convert many idXML files into one merged PSM Parquet file
pub fn run(args: BatchArgs) -> Result<()> {
    let inputs = BatchInputs::from_options(
        args.idxml_folder,
        args.idxml_files.as_deref(),
        args.mzml_folder,
        args.mzml_files.as_deref(),
    )?;

    let file_config = Config::load(args.config.as_deref())?;
    let config = BatchConfig::new(args.output_folder)
        .with_output_prefix(
            args.output_prefix
                .or(file_config.batch.output_prefix.clone())
                .unwrap_or_else(|| DEFAULT_OUTPUT_PREFIX.to_string()),
        )
        .with_fail_fast(args.fail_fast || file_config.batch.fail_fast.unwrap_or(false))
        .with_workers(args.workers.or(file_config.batch.workers).unwrap_or(1))
        .with_writer_config(file_config.apply_writer(args.profile.writer_config()));

    let strategy = PairingStrategy::select(
        inputs.identification.mode(),
        inputs.spectral.as_ref().map(|s| s.mode()),
    );
    match strategy {
        PairingStrategy::Unpaired => info!("No mzML input, converting without spectra"),
        PairingStrategy::Index => info!("Pairing idXML and mzML files by list position"),
        PairingStrategy::Stem => info!("Pairing idXML and mzML files by file name"),
    }
    info!(
        "Profile: {}, fail-fast: {}, workers: {}",
        args.profile, config.fail_fast, config.workers
    );

    let converter = BatchConverter::new(config).with_observer(Arc::new(LogObserver));
    let report = match converter.run(&inputs) {
        Ok(report) => report,
        Err(BatchError::EmptyResult { failures, .. }) => {
            anyhow::bail!(
                "No parquet files were successfully generated:\n{}",
                FailureSummary(&failures)
            );
        }
        Err(e) => return Err(e).context("Batch conversion failed"),
    };

    if !report.failures.is_empty() {
        warn!(
            "{} file(s) failed and were skipped:\n{}",
            report.failures.len(),
            FailureSummary(&report.failures)
        );
    }
    info!(
        "Merged {} file(s): {} PSMs, {} with spectra",
        report.converted, report.records, report.enriched
    );
    super::print_output(&report.output, report.records);

    Ok(())
}
