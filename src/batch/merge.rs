//! Concatenating PSM Parquet files into one output

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use log::debug;

use crate::reader::{PsmReader, ReaderError};
use crate::schema::{schema_difference, KEY_MERGED_FROM, KEY_SOURCE_FILE, MZ_ARRAY};
use crate::writer::{base_footer_metadata, PsmWriter, WriterConfig, WriterError};

/// Errors that can occur while merging
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// Nothing to merge
    #[error("no input files to merge")]
    NoInputs,

    /// An input could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// Input file
        path: PathBuf,
        /// Cause
        #[source]
        source: ReaderError,
    },

    /// An input's schema differs from the first input's
    #[error("schema of {} differs from the first input: {detail}", .path.display())]
    SchemaMismatch {
        /// Input file
        path: PathBuf,
        /// First difference found
        detail: String,
    },

    /// The merged file could not be written
    #[error("write error: {0}")]
    Write(#[from] WriterError),

    /// The merged file could not be moved into place
    #[error("failed to move merged output into place: {0}")]
    Persist(#[from] tempfile::PersistError),

    /// File-system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Statistics of a finished merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeStats {
    /// Final output path
    pub output: PathBuf,
    /// Rows written
    pub records: usize,
    /// Number of input files
    pub inputs: usize,
    /// Row groups written
    pub row_groups: usize,
}

/// Concatenate `inputs`, in order, into `output`.
///
/// Every input must have the same fields as the first one. The merged file
/// is written under a temporary name next to `output` and renamed into place
/// once complete, so a failed merge leaves no file at `output`.
pub fn merge_outputs(
    inputs: &[PathBuf],
    output: &Path,
    config: &WriterConfig,
) -> Result<MergeStats, MergeError> {
    let readers = inputs
        .iter()
        .map(|path| {
            PsmReader::open(path).map_err(|source| MergeError::Read {
                path: path.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let first = readers.first().ok_or(MergeError::NoInputs)?;
    let canonical = Arc::new(Schema::new(first.schema().fields().clone()));

    for reader in &readers[1..] {
        if let Some(detail) = schema_difference(&canonical, &reader.schema()) {
            return Err(MergeError::SchemaMismatch {
                path: reader.path().to_path_buf(),
                detail,
            });
        }
    }

    let sources: Vec<String> = readers
        .iter()
        .map(|reader| {
            reader
                .metadata()
                .remove(KEY_SOURCE_FILE)
                .unwrap_or_else(|| reader.path().display().to_string())
        })
        .collect();
    let mut metadata = base_footer_metadata()?;
    metadata.insert(
        KEY_MERGED_FROM.to_string(),
        serde_json::to_string(&sources).map_err(WriterError::from)?,
    );

    let parent = match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;
    let temp = tempfile::Builder::new()
        .prefix(".merging-")
        .suffix(".tmp")
        .tempfile_in(parent)?;

    let mut writer = PsmWriter::with_schema(
        temp.reopen()?,
        canonical.clone(),
        &metadata,
        config.clone(),
    )?;
    for reader in &readers {
        let batches = reader.iter_batches().map_err(|source| MergeError::Read {
            path: reader.path().to_path_buf(),
            source,
        })?;
        for batch in batches {
            let batch = batch.map_err(|source| MergeError::Read {
                path: reader.path().to_path_buf(),
                source,
            })?;
            let batch = RecordBatch::try_new(canonical.clone(), batch.columns().to_vec())
                .map_err(WriterError::from)?;
            let enriched = batch
                .column_by_name(MZ_ARRAY)
                .map_or(0, |column| column.len() - column.null_count());
            writer.write_batch(&batch)?;
            writer.add_enriched(enriched);
        }
        debug!("Merged {}", reader.path().display());
    }
    let stats = writer.finish()?;

    temp.persist(output)?;

    Ok(MergeStats {
        output: output.to_path_buf(),
        records: stats.records_written,
        inputs: inputs.len(),
        row_groups: stats.row_groups_written,
    })
}
