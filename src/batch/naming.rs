//! Output file naming

use uuid::Uuid;

use crate::schema::PSM_PARQUET_SUFFIX;

/// Prefix of the per-run scoped temporary directory
pub const TEMP_DIR_PREFIX: &str = "idxml_batch_";

/// Prefix of intermediate per-entry files
pub const INTERMEDIATE_PREFIX: &str = "psm";

/// `{prefix}-{uuid}{suffix}` with a fresh UUID v4
pub fn unique_file_name(prefix: &str, suffix: &str) -> String {
    format!("{}-{}{}", prefix, Uuid::new_v4(), suffix)
}

/// `temp_{sequence}_psm-{uuid}.psm.parquet`
pub fn intermediate_file_name(sequence: usize) -> String {
    format!(
        "temp_{}_{}",
        sequence,
        unique_file_name(INTERMEDIATE_PREFIX, PSM_PARQUET_SUFFIX)
    )
}
