//! # PSM Writer Module
//!
//! Writes [`PsmTable`](crate::psm::PsmTable)s to Parquet using the fixed PSM
//! schema.
//!
//! - Records are written in row-group sized batches.
//! - Provenance (source file, spectral file, search engine, creation time)
//!   goes into the footer's key-value metadata.
//! - Compression defaults to ZSTD; see [`WriterConfig`] for the presets.

mod batch_builder;
mod config;
mod error;
mod metadata;
mod stats;
mod writer_impl;


pub use batch_builder::build_record_batch;
pub use config::{CompressionType, WriterConfig};
pub use error::WriterError;
pub use metadata::{base_footer_metadata, footer_metadata};
pub use stats::WriterStats;
pub use writer_impl::{write_psm_table, PsmWriter};
