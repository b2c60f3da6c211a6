use std::collections::HashMap;

use parquet::basic::{Compression, Encoding, ZstdLevel};
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::format::KeyValue;
use parquet::schema::types::ColumnPath;

use crate::schema::columns;

/// Compression options for PSM Parquet files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    /// ZSTD compression (recommended, best compression ratio)
    Zstd(i32),
    /// Snappy compression (faster, slightly larger files)
    Snappy,
    /// No compression (fastest write, largest files)
    Uncompressed,
}

impl Default for CompressionType {
    fn default() -> Self {
        Self::Zstd(3)
    }
}

impl CompressionType {
    /// Maximum compression (slower write, smallest files)
    pub fn max_compression() -> Self {
        Self::Zstd(22)
    }

    /// Balanced compression (recommended default)
    pub fn balanced() -> Self {
        Self::Zstd(3)
    }

    /// Fast compression (faster write, larger files)
    pub fn fast() -> Self {
        Self::Snappy
    }
}

/// Configuration for the PSM writer
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Compression type to use
    pub compression: CompressionType,

    /// Target row group size (number of PSM rows per group)
    pub row_group_size: usize,

    /// Data page size in bytes
    pub data_page_size: usize,

    /// Whether to write statistics for columns
    pub write_statistics: bool,

    /// Dictionary page size limit in bytes
    pub dictionary_page_size_limit: usize,

    /// Enable BYTE_STREAM_SPLIT encoding for the spectrum arrays and scores
    pub use_byte_stream_split: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression: CompressionType::Zstd(3),
            // PSM rows carry spectrum arrays when enriched, so keep groups modest
            row_group_size: 50_000,
            data_page_size: 1024 * 1024,
            write_statistics: true,
            dictionary_page_size_limit: 1024 * 1024,
            use_byte_stream_split: true,
        }
    }
}

impl WriterConfig {
    /// Configuration optimized for maximum compression (slower write)
    pub fn max_compression() -> Self {
        Self {
            compression: CompressionType::Zstd(19),
            row_group_size: 200_000,
            data_page_size: 2 * 1024 * 1024,
            write_statistics: true,
            dictionary_page_size_limit: 2 * 1024 * 1024,
            use_byte_stream_split: true,
        }
    }

    /// Configuration optimized for fast writing (larger files)
    pub fn fast_write() -> Self {
        Self {
            compression: CompressionType::Snappy,
            row_group_size: 25_000,
            data_page_size: 512 * 1024,
            write_statistics: true,
            dictionary_page_size_limit: 512 * 1024,
            use_byte_stream_split: false,
        }
    }

    /// Balanced configuration (default)
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Create writer properties from this configuration
    pub(crate) fn to_writer_properties(
        &self,
        metadata: &HashMap<String, String>,
    ) -> WriterProperties {
        let compression = match self.compression {
            CompressionType::Zstd(level) => {
                Compression::ZSTD(ZstdLevel::try_new(level).unwrap_or_default())
            }
            CompressionType::Snappy => Compression::SNAPPY,
            CompressionType::Uncompressed => Compression::UNCOMPRESSED,
        };

        let statistics = if self.write_statistics {
            EnabledStatistics::Chunk
        } else {
            EnabledStatistics::None
        };

        let mut builder = WriterProperties::builder()
            .set_compression(compression)
            .set_data_page_size_limit(self.data_page_size)
            .set_dictionary_page_size_limit(self.dictionary_page_size_limit)
            .set_statistics_enabled(statistics)
            .set_max_row_group_size(self.row_group_size);

        // Low-cardinality text columns repeat heavily within a run
        let dict_columns = [
            columns::SEQUENCE,
            columns::PEPTIDOFORM,
            columns::SCORE_TYPE,
            columns::REFERENCE_FILE_NAME,
            columns::PRECURSOR_CHARGE,
        ];
        for col in dict_columns {
            builder = builder
                .set_column_dictionary_enabled(ColumnPath::new(vec![col.to_string()]), true);
        }

        // Spectrum arrays are high cardinality; list leaves live under `<column>.list.item`
        let array_leaves = [columns::MZ_ARRAY, columns::INTENSITY_ARRAY].map(|col| {
            ColumnPath::new(vec![
                col.to_string(),
                "list".to_string(),
                columns::LIST_ITEM.to_string(),
            ])
        });
        let score_columns = [
            columns::SCORE,
            columns::Q_VALUE,
            columns::POSTERIOR_ERROR_PROBABILITY,
        ]
        .map(|col| ColumnPath::new(vec![col.to_string()]));

        for path in array_leaves.iter().chain(score_columns.iter()) {
            builder = builder.set_column_dictionary_enabled(path.clone(), false);
            if self.use_byte_stream_split {
                builder = builder.set_column_encoding(path.clone(), Encoding::BYTE_STREAM_SPLIT);
            }
        }

        let kv_metadata: Vec<KeyValue> = metadata
            .iter()
            .map(|(k, v)| KeyValue {
                key: k.clone(),
                value: Some(v.clone()),
            })
            .collect();

        builder = builder.set_key_value_metadata(Some(kv_metadata));

        builder.build()
    }
}
