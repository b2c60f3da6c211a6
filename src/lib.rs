//! # idxml-psm - idXML peptide-spectrum matches as Parquet
//!
//! `idxml_psm` converts OpenMS idXML identification files into a flat PSM
//! table stored in Apache Parquet, optionally attaching the matched spectrum
//! peaks from the corresponding mzML file.
//!
//! ## Key Features
//!
//! - **Streaming parsers**: idXML and mzML are read with `quick-xml` pull
//!   parsers; mzML spectra are decoded only when a PSM needs them.
//!
//! - **One schema for every file**: spectral columns are always present and
//!   nullable, so enriched and plain outputs can be concatenated.
//!
//! - **Batch conversion**: folders or explicit lists of idXML files, paired
//!   with mzML files by position or by file name, are converted and merged
//!   into a single file. Failed files are skipped and reported.
//!
//! ## Quick Start - Single File
//!
//! ```rust,no_run
//! use idxml_psm::psm::{IdXmlParser, PsmParser};
//! use idxml_psm::writer::{write_psm_table, WriterConfig};
//! use std::path::Path;
//!
//! let table = IdXmlParser.parse(
//!     Path::new("run1.idXML"),
//!     Some(Path::new("run1.mzML")),
//!     true,
//! )?;
//! let stats = write_psm_table(&table, "run1.psm.parquet", WriterConfig::default())?;
//! println!("Wrote {} PSMs", stats.records_written);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Quick Start - Batch
//!
//! ```rust,no_run
//! use idxml_psm::batch::{BatchConfig, BatchConverter, BatchInputs, InputSource};
//!
//! let inputs = BatchInputs::new(
//!     InputSource::Directory("results/".into()),
//!     Some(InputSource::Directory("raw/".into())),
//! );
//! let report = BatchConverter::new(BatchConfig::new("out/")).run(&inputs)?;
//! println!("{} PSMs in {}", report.records, report.output.display());
//! # Ok::<(), idxml_psm::batch::BatchError>(())
//! ```
//!
//! ## Reading PSM Files
//!
//! Outputs are plain Parquet files:
//!
//! ```python
//! # Python
//! import pyarrow.parquet as pq
//! df = pq.read_table("out/merged-psm-<uuid>.psm.parquet").to_pandas()
//! ```
//!
//! ```sql
//! -- DuckDB
//! SELECT sequence, q_value FROM read_parquet('out/*.psm.parquet')
//! WHERE q_value < 0.01 AND NOT is_decoy;
//! ```
//!
//! ## Architecture
//!
//! - [`idxml`]: idXML document model and streaming reader
//! - [`mzml`]: mzML spectrum streamer and binary array decoding
//! - [`psm`]: PSM records, peptidoform masses and spectrum enrichment
//! - [`schema`]: Arrow schema of the PSM table
//! - [`writer`]: Parquet writer with footer provenance
//! - [`reader`]: Parquet reader used by merging and inspection
//! - [`batch`]: input discovery, pairing, batch orchestration and merging
//!
//! ### File Footer Metadata
//!
//! - `psm:format_version`: format version string
//! - `psm:created_at`: RFC 3339 creation time
//! - `psm:converter_info`: converter name and version (JSON)
//! - `psm:source_file`: idXML the table came from
//! - `psm:spectral_file`: mzML used for enrichment
//! - `psm:search_engine`: search engine name and version
//! - `psm:merged_from`: JSON list of source files of a merged output

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![allow(clippy::too_many_arguments)]

pub mod batch;
pub mod idxml;
pub mod mzml;
pub mod psm;
pub mod reader;
pub mod schema;
pub mod writer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::batch::{
        BatchConfig, BatchConverter, BatchError, BatchEvent, BatchInputs, BatchObserver,
        BatchReport, InputSource, LogObserver, PairingStrategy,
    };
    pub use crate::idxml::{IdXmlDocument, IdXmlError, IdXmlReader};
    pub use crate::mzml::{MzMLError, MzMLSpectrum, MzMLStreamer};
    pub use crate::psm::{IdXmlParser, PsmError, PsmParser, PsmRecord, PsmTable};
    pub use crate::reader::{PsmReader, ReaderError};
    pub use crate::schema::{create_psm_schema, PSM_FORMAT_VERSION};
    pub use crate::writer::{write_psm_table, PsmWriter, WriterConfig, WriterError, WriterStats};
}
