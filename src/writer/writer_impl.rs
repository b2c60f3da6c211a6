use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use log::debug;
use parquet::arrow::ArrowWriter;

use crate::psm::{PsmRecord, PsmTable, TableProvenance};
use crate::schema::create_psm_schema_arc;

use super::batch_builder::build_record_batch;
use super::config::WriterConfig;
use super::error::WriterError;
use super::metadata::footer_metadata;
use super::stats::WriterStats;

/// Streaming writer for PSM Parquet files
pub struct PsmWriter<W: Write + Send> {
    writer: ArrowWriter<W>,
    schema: SchemaRef,
    row_group_size: usize,
    records_written: usize,
    enriched_records: usize,
}

impl PsmWriter<File> {
    /// Create a new writer to a file path
    pub fn new_file<P: AsRef<Path>>(
        path: P,
        provenance: &TableProvenance,
        config: WriterConfig,
    ) -> Result<Self, WriterError> {
        let file = File::create(path)?;
        Self::new(file, provenance, config)
    }
}

impl<W: Write + Send> PsmWriter<W> {
    /// Create a new writer to any Write implementation
    pub fn new(
        writer: W,
        provenance: &TableProvenance,
        config: WriterConfig,
    ) -> Result<Self, WriterError> {
        let metadata = footer_metadata(provenance)?;
        Self::with_schema(writer, create_psm_schema_arc(), &metadata, config)
    }

    /// Create a writer with an explicit schema and footer metadata
    pub fn with_schema(
        writer: W,
        schema: SchemaRef,
        metadata: &HashMap<String, String>,
        config: WriterConfig,
    ) -> Result<Self, WriterError> {
        let props = config.to_writer_properties(metadata);
        let arrow_writer = ArrowWriter::try_new(writer, schema.clone(), Some(props))?;

        Ok(Self {
            writer: arrow_writer,
            schema,
            row_group_size: config.row_group_size.max(1),
            records_written: 0,
            enriched_records: 0,
        })
    }

    /// Schema of the file being written
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Write PSM records, splitting them into row-group sized batches
    pub fn write_records(&mut self, records: &[PsmRecord]) -> Result<(), WriterError> {
        for chunk in records.chunks(self.row_group_size) {
            let batch = build_record_batch(&self.schema, chunk)?;
            self.writer.write(&batch)?;
            self.records_written += chunk.len();
            self.enriched_records += chunk.iter().filter(|r| r.spectrum.is_some()).count();
        }
        Ok(())
    }

    /// Write a prepared record batch
    pub fn write_batch(&mut self, batch: &RecordBatch) -> Result<(), WriterError> {
        if batch.schema().fields() != self.schema.fields() {
            return Err(WriterError::InvalidData(
                "record batch schema does not match the writer schema".to_string(),
            ));
        }
        self.writer.write(batch)?;
        self.records_written += batch.num_rows();
        Ok(())
    }

    /// Record that `count` of the rows written through [`Self::write_batch`] carry spectra
    pub(crate) fn add_enriched(&mut self, count: usize) {
        self.enriched_records += count;
    }

    /// Get current statistics
    pub fn stats(&self) -> WriterStats {
        WriterStats {
            records_written: self.records_written,
            enriched_records: self.enriched_records,
            row_groups_written: 0, // Unknown until finish
        }
    }

    /// Finish writing and close the file
    pub fn finish(self) -> Result<WriterStats, WriterError> {
        let file_metadata = self.writer.close()?;
        let stats = WriterStats {
            records_written: self.records_written,
            enriched_records: self.enriched_records,
            row_groups_written: file_metadata.row_groups.len(),
        };
        debug!("{}", stats);
        Ok(stats)
    }
}

/// Write a whole table to `path`.
///
/// An empty table still produces a valid file with the full schema.
pub fn write_psm_table<P: AsRef<Path>>(
    table: &PsmTable,
    path: P,
    config: WriterConfig,
) -> Result<WriterStats, WriterError> {
    let mut writer = PsmWriter::new_file(path, table.provenance(), config)?;
    writer.write_records(table.records())?;
    writer.finish()
}
