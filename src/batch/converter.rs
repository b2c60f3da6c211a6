//! Converting one identification file to a PSM Parquet file

use std::fs;
use std::path::{Path, PathBuf};

use crate::psm::{PsmError, PsmParser};
use crate::schema::PSM_PARQUET_SUFFIX;
use crate::writer::{write_psm_table, WriterConfig, WriterError};

use super::matcher::PairedEntry;
use super::naming::{intermediate_file_name, unique_file_name};

/// Errors converting a single file
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// The idXML or mzML file could not be read
    #[error(transparent)]
    Parse(#[from] PsmError),

    /// The Parquet file could not be written
    #[error("write error: {0}")]
    Write(#[from] WriterError),

    /// File-system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A successfully converted file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedFile {
    /// Entry index (0 for single conversions)
    pub index: usize,
    /// Written Parquet file
    pub path: PathBuf,
    /// Records written
    pub records: usize,
    /// Records carrying spectrum peaks
    pub enriched: usize,
}

/// Convert one paired entry into an intermediate file in `temp_dir`.
///
/// Spectral enrichment is on exactly when the entry has a spectral file.
pub fn convert_one<P: PsmParser + ?Sized>(
    parser: &P,
    entry: &PairedEntry,
    temp_dir: &Path,
    config: &WriterConfig,
) -> Result<ConvertedFile, ConversionError> {
    let spectral = entry.spectral.as_deref();
    let table = parser.parse(&entry.identification, spectral, spectral.is_some())?;

    let path = temp_dir.join(intermediate_file_name(entry.index));
    let stats = write_psm_table(&table, &path, config.clone())?;

    Ok(ConvertedFile {
        index: entry.index,
        path,
        records: stats.records_written,
        enriched: stats.enriched_records,
    })
}

/// Convert one idXML file to `{prefix}-{uuid}.psm.parquet` in `output_folder`.
///
/// The output folder is created if missing. A partially written file is
/// removed on failure.
pub fn convert_file<P: PsmParser + ?Sized>(
    parser: &P,
    identification: &Path,
    spectral: Option<&Path>,
    spectral_data: bool,
    output_folder: &Path,
    prefix: &str,
    config: &WriterConfig,
) -> Result<ConvertedFile, ConversionError> {
    let table = parser.parse(identification, spectral, spectral_data)?;

    fs::create_dir_all(output_folder)?;
    let path = output_folder.join(unique_file_name(prefix, PSM_PARQUET_SUFFIX));

    match write_psm_table(&table, &path, config.clone()) {
        Ok(stats) => Ok(ConvertedFile {
            index: 0,
            path,
            records: stats.records_written,
            enriched: stats.enriched_records,
        }),
        Err(e) => {
            let _ = fs::remove_file(&path);
            Err(e.into())
        }
    }
}
