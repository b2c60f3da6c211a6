//! TOML configuration file support.
//!
//! Settings that would otherwise need several flags can live in a file:
//!
//! ```toml
//! # idxml-psm.toml
//! [writer]
//! compression_level = 9
//! row_group_size = 100000
//!
//! [batch]
//! fail_fast = false
//! workers = 4
//! output_prefix = "study-psm"
//! ```
//!
//! Command-line flags take precedence over file values.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use idxml_psm::writer::{CompressionType, WriterConfig};

/// Root configuration structure for idxml-psm.toml files.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Parquet writer settings.
    #[serde(default)]
    pub writer: WriterSection,

    /// Batch conversion settings.
    #[serde(default)]
    pub batch: BatchSection,
}

/// `[writer]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WriterSection {
    /// ZSTD compression level (1-22).
    pub compression_level: Option<i32>,

    /// Number of PSM rows per Parquet row group.
    pub row_group_size: Option<usize>,
}

/// `[batch]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchSection {
    /// Stop at the first failed file.
    pub fail_fast: Option<bool>,

    /// Number of conversion workers.
    pub workers: Option<usize>,

    /// Merged output file prefix.
    pub output_prefix: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Load configuration from an optional file, defaulting when absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_file)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Apply the `[writer]` table on top of a profile's writer settings.
    pub fn apply_writer(&self, mut writer: WriterConfig) -> WriterConfig {
        if let Some(level) = self.writer.compression_level {
            writer.compression = CompressionType::Zstd(level);
        }
        if let Some(rows) = self.writer.row_group_size {
            writer.row_group_size = rows;
        }
        writer
    }
}
