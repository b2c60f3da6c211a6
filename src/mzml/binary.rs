//! `<binaryDataArray>` payloads
//!
//! An array is held as [`RawBinaryData`] while the spectrum is read and is
//! only turned into numbers when a PSM asks for that spectrum.

use std::io::Read;

use base64::prelude::*;
use byteorder::{ByteOrder, LittleEndian};
use flate2::read::ZlibDecoder;

use super::cv_params::MS_CV_ACCESSIONS;

/// Width of the stored floating point values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    /// `MS:1000521`
    Float32,
    /// `MS:1000523`
    #[default]
    Float64,
}

impl Precision {
    fn width(self) -> usize {
        match self {
            Precision::Float32 => 4,
            Precision::Float64 => 8,
        }
    }

    fn read_values(self, bytes: &[u8]) -> Result<Vec<f64>, BinaryDecodeError> {
        let width = self.width();
        if bytes.len() % width != 0 {
            return Err(BinaryDecodeError::Misaligned {
                bytes: bytes.len(),
                width,
            });
        }

        let chunks = bytes.chunks_exact(width);
        Ok(match self {
            Precision::Float32 => chunks.map(|c| LittleEndian::read_f32(c) as f64).collect(),
            Precision::Float64 => chunks.map(LittleEndian::read_f64).collect(),
        })
    }
}

/// Compression applied to the array before Base64 encoding
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ArrayCompression {
    /// `MS:1000576`
    #[default]
    None,
    /// `MS:1000574`
    Zlib,
    /// Any MS-Numpress flavour, identified by its CV accession.
    /// Such arrays are carried through the reader but cannot be decoded.
    Unsupported(String),
}

/// Errors raised while turning a payload into values
#[derive(Debug, thiserror::Error)]
pub enum BinaryDecodeError {
    /// Invalid Base64 payload
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// zlib stream could not be inflated
    #[error("Decompression error: {0}")]
    Inflate(#[from] std::io::Error),

    /// Byte count is not a multiple of the value width
    #[error("{bytes} bytes is not a whole number of {width}-byte values")]
    Misaligned {
        /// Payload size after decompression
        bytes: usize,
        /// Value width in bytes
        width: usize,
    },

    /// Decoded value count differs from `defaultArrayLength`
    #[error("Invalid data length: expected {expected}, got {actual}")]
    InvalidLength {
        /// `defaultArrayLength` of the spectrum
        expected: usize,
        /// Values actually decoded
        actual: usize,
    },

    /// Compression this reader cannot undo
    #[error("Unsupported compression: {0}")]
    UnsupportedCompression(String),
}

/// Undecoded binary array payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawBinaryData {
    /// Base64 text of the `<binary>` element
    pub base64: String,
    /// Value width
    pub precision: Precision,
    /// Compression applied before Base64 encoding
    pub compression: ArrayCompression,
}

impl RawBinaryData {
    /// Record a precision or compression cvParam of the array.
    ///
    /// Returns `false` for accessions that describe neither.
    pub fn apply_cv_accession(&mut self, accession: &str) -> bool {
        match accession {
            MS_CV_ACCESSIONS::FLOAT_32_BIT => self.precision = Precision::Float32,
            MS_CV_ACCESSIONS::FLOAT_64_BIT => self.precision = Precision::Float64,
            MS_CV_ACCESSIONS::NO_COMPRESSION => self.compression = ArrayCompression::None,
            MS_CV_ACCESSIONS::ZLIB_COMPRESSION => self.compression = ArrayCompression::Zlib,
            MS_CV_ACCESSIONS::NUMPRESS_LINEAR
            | MS_CV_ACCESSIONS::NUMPRESS_PIC
            | MS_CV_ACCESSIONS::NUMPRESS_SLOF => {
                self.compression = ArrayCompression::Unsupported(accession.to_string())
            }
            _ => return false,
        }
        true
    }

    /// Decode to `f64` values, checking the count against `expected_length`.
    ///
    /// An empty payload decodes to an empty array regardless of the expected
    /// length.
    pub fn decode(&self, expected_length: usize) -> Result<Vec<f64>, BinaryDecodeError> {
        let text = self.base64.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let bytes = self.inflate(BASE64_STANDARD.decode(text)?)?;
        let values = self.precision.read_values(&bytes)?;

        if values.len() != expected_length {
            return Err(BinaryDecodeError::InvalidLength {
                expected: expected_length,
                actual: values.len(),
            });
        }
        Ok(values)
    }

    fn inflate(&self, bytes: Vec<u8>) -> Result<Vec<u8>, BinaryDecodeError> {
        match &self.compression {
            ArrayCompression::None => Ok(bytes),
            ArrayCompression::Zlib => {
                let mut out = Vec::with_capacity(bytes.len() * 2);
                ZlibDecoder::new(bytes.as_slice()).read_to_end(&mut out)?;
                Ok(out)
            }
            ArrayCompression::Unsupported(accession) => {
                Err(BinaryDecodeError::UnsupportedCompression(accession.clone()))
            }
        }
    }
}
