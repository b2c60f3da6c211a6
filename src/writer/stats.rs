use std::fmt;

/// Statistics from a completed write operation
#[derive(Debug, Clone, Default)]
pub struct WriterStats {
    /// Number of PSM rows written
    pub records_written: usize,
    /// Number of rows that carry spectrum arrays
    pub enriched_records: usize,
    /// Number of Parquet row groups written
    pub row_groups_written: usize,
}

impl fmt::Display for WriterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} PSMs ({} with spectra) in {} row groups",
            self.records_written, self.enriched_records, self.row_groups_written
        )
    }
}
