/// PSM Parquet format version - follows semantic versioning
pub const PSM_FORMAT_VERSION: &str = "1.0.0";

/// File suffix for PSM Parquet files
pub const PSM_PARQUET_SUFFIX: &str = ".psm.parquet";

/// Metadata key for format version in Parquet footer
pub const KEY_FORMAT_VERSION: &str = "psm:format_version";

/// Metadata key for the identification file a table was converted from
pub const KEY_SOURCE_FILE: &str = "psm:source_file";

/// Metadata key for the spectral file used for enrichment
pub const KEY_SPECTRAL_FILE: &str = "psm:spectral_file";

/// Metadata key for the search engine that produced the identifications
pub const KEY_SEARCH_ENGINE: &str = "psm:search_engine";

/// Metadata key for conversion timestamp
pub const KEY_CREATED_AT: &str = "psm:created_at";

/// Metadata key for the ordered list of files a merged output was built from
pub const KEY_MERGED_FROM: &str = "psm:merged_from";

/// Metadata key for converter software info
pub const KEY_CONVERTER_INFO: &str = "psm:converter_info";
