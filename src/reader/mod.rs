//! # PSM Reader Module
//!
//! Opens PSM Parquet files written by this crate (single conversions and
//! merged outputs) for inspection and merging.
//!
//! ## Example
//!
//! ```rust,no_run
//! use idxml_psm::reader::PsmReader;
//!
//! let reader = PsmReader::open("merged-psm.psm.parquet")?;
//! println!("{} PSMs", reader.num_rows());
//! for (key, value) in reader.metadata() {
//!     println!("{key} = {value}");
//! }
//! # Ok::<(), idxml_psm::reader::ReaderError>(())
//! ```

mod batches;
mod error;


use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::datatypes::SchemaRef;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::metadata::ParquetMetaData;

use crate::schema::validate_schema;

pub use batches::RecordBatchIterator;
pub use error::ReaderError;

/// Default number of rows per record batch
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Footer key written by the Arrow writer itself; not part of the PSM metadata
const ARROW_SCHEMA_KEY: &str = "ARROW:schema";

/// Reader for PSM Parquet files
#[derive(Debug, Clone)]
pub struct PsmReader {
    path: PathBuf,
    schema: SchemaRef,
    parquet_metadata: Arc<ParquetMetaData>,
    batch_size: usize,
}

impl PsmReader {
    /// Open a Parquet file and read its footer
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ReaderError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

        Ok(Self {
            schema: builder.schema().clone(),
            parquet_metadata: builder.metadata().clone(),
            path,
            batch_size: DEFAULT_BATCH_SIZE,
        })
    }

    /// Set the number of rows per batch returned by [`Self::iter_batches`]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Path of the file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Arrow schema of the file
    pub fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    /// Total number of rows
    pub fn num_rows(&self) -> usize {
        usize::try_from(self.parquet_metadata.file_metadata().num_rows()).unwrap_or(0)
    }

    /// Number of row groups
    pub fn num_row_groups(&self) -> usize {
        self.parquet_metadata.num_row_groups()
    }

    /// Footer key-value metadata
    pub fn metadata(&self) -> HashMap<String, String> {
        self.parquet_metadata
            .file_metadata()
            .key_value_metadata()
            .map(|kv| {
                kv.iter()
                    .filter(|entry| entry.key != ARROW_SCHEMA_KEY)
                    .filter_map(|entry| Some((entry.key.clone(), entry.value.clone()?)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Check that the file carries the required PSM columns
    pub fn validate(&self) -> Result<(), ReaderError> {
        validate_schema(&self.schema)?;
        Ok(())
    }
}
