use std::fs::File;

use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::{PsmReader, ReaderError};

/// Streaming iterator over record batches
///
/// Batches are read on demand, so memory use is bounded by one batch.
pub struct RecordBatchIterator {
    inner: Box<dyn Iterator<Item = Result<RecordBatch, arrow::error::ArrowError>> + Send>,
}

impl RecordBatchIterator {
    pub(crate) fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = Result<RecordBatch, arrow::error::ArrowError>> + Send + 'static,
    {
        Self {
            inner: Box::new(iter),
        }
    }
}

impl Iterator for RecordBatchIterator {
    type Item = Result<RecordBatch, ReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|r| r.map_err(ReaderError::from))
    }
}

impl PsmReader {
    /// Returns a streaming iterator over the record batches of the file
    ///
    /// # Example
    /// ```rust,no_run
    /// use idxml_psm::reader::PsmReader;
    ///
    /// let reader = PsmReader::open("sample.psm.parquet")?;
    /// for batch_result in reader.iter_batches()? {
    ///     let batch = batch_result?;
    ///     println!("Processing batch with {} rows", batch.num_rows());
    /// }
    /// # Ok::<(), idxml_psm::reader::ReaderError>(())
    /// ```
    pub fn iter_batches(&self) -> Result<RecordBatchIterator, ReaderError> {
        let file = File::open(&self.path)?;
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)?
            .with_batch_size(self.batch_size)
            .build()?;
        Ok(RecordBatchIterator::new(reader))
    }

    /// Read every record batch into memory
    pub fn read_all(&self) -> Result<Vec<RecordBatch>, ReaderError> {
        self.iter_batches()?.collect()
    }
}
