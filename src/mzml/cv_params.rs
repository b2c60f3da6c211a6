//! Controlled Vocabulary (CV) parameter handling for mzML
//!
//! Only the PSI-MS terms needed to locate and decode the peak arrays of a
//! spectrum are mapped here; all other terms are skipped by the reader.

use serde::{Deserialize, Serialize};

/// A controlled vocabulary parameter from mzML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CvParam {
    /// Accession number (e.g., "MS:1000511")
    pub accession: String,

    /// Human-readable name
    pub name: String,

    /// Optional value
    pub value: Option<String>,

    /// Unit accession
    pub unit_accession: Option<String>,
}

impl CvParam {
    /// Get the value as f64 if possible
    pub fn value_as_f64(&self) -> Option<f64> {
        self.value.as_ref()?.trim().parse().ok()
    }

    /// Get the value as i64 if possible
    pub fn value_as_i64(&self) -> Option<i64> {
        self.value.as_ref()?.trim().parse().ok()
    }
}

/// MS CV accessions read from spectra
#[allow(non_snake_case)]
pub mod MS_CV_ACCESSIONS {
    /// MS level
    pub const MS_LEVEL: &str = "MS:1000511";

    /// Scan start time (retention time)
    pub const SCAN_START_TIME: &str = "MS:1000016";

    /// Selected ion m/z
    pub const SELECTED_ION_MZ: &str = "MS:1000744";

    /// Charge state
    pub const CHARGE_STATE: &str = "MS:1000041";

    /// 32-bit float
    pub const FLOAT_32_BIT: &str = "MS:1000521";

    /// 64-bit float
    pub const FLOAT_64_BIT: &str = "MS:1000523";

    /// zlib compression
    pub const ZLIB_COMPRESSION: &str = "MS:1000574";

    /// No compression
    pub const NO_COMPRESSION: &str = "MS:1000576";

    /// MS-Numpress linear prediction
    pub const NUMPRESS_LINEAR: &str = "MS:1002312";

    /// MS-Numpress positive integer compression
    pub const NUMPRESS_PIC: &str = "MS:1002313";

    /// MS-Numpress short logged float compression
    pub const NUMPRESS_SLOF: &str = "MS:1002314";

    /// m/z array
    pub const MZ_ARRAY: &str = "MS:1000514";

    /// Intensity array
    pub const INTENSITY_ARRAY: &str = "MS:1000515";

    /// Second (UO)
    pub const UNIT_SECOND: &str = "UO:0000010";

    /// Minute (UO)
    pub const UNIT_MINUTE: &str = "UO:0000031";

    /// Millisecond (UO)
    pub const UNIT_MILLISECOND: &str = "UO:0000028";
}

/// Convert retention time to seconds based on unit
pub fn normalize_retention_time(value: f64, unit_accession: Option<&str>) -> f64 {
    match unit_accession {
        Some(MS_CV_ACCESSIONS::UNIT_MINUTE) => value * 60.0,
        Some(MS_CV_ACCESSIONS::UNIT_MILLISECOND) => value / 1000.0,
        _ => value,
    }
}
