//! # mzML Spectral Reader
//!
//! Streaming reader for mzML files, the HUPO-PSI XML format for mass
//! spectrometry data. It reads just enough of each spectrum to attach peaks
//! to identifications: native id, index, MS level, retention time, the first
//! precursor and the m/z and intensity arrays.
//!
//! ## mzML Structure
//!
//! ```text
//! indexedmzML (optional wrapper)
//! └── mzML
//!     ├── cvList, fileDescription, softwareList, ... (skipped)
//!     └── run
//!         └── spectrumList
//!             └── spectrum* (many)
//!                 ├── cvParam* (ms level, ...)
//!                 ├── scanList
//!                 │   └── scan (scan start time)
//!                 ├── precursorList (for MS2+)
//!                 └── binaryDataArrayList
//!                     └── binaryDataArray*
//!                         ├── cvParam* (encoding info)
//!                         └── binary (base64 data)
//! ```
//!
//! Binary arrays are kept as Base64 text until [`RawMzMLSpectrum::decode`] is
//! called.

mod binary;
mod cv_params;
mod models;
mod streamer;

pub use binary::{ArrayCompression, BinaryDecodeError, Precision, RawBinaryData};
pub use cv_params::{normalize_retention_time, CvParam, MS_CV_ACCESSIONS};
pub use models::{scan_number_from_native_id, MzMLSpectrum, RawMzMLSpectrum};
pub use streamer::{MzMLError, MzMLStreamer, RawSpectrumIterator, DEFAULT_INPUT_BUFFER_SIZE};
