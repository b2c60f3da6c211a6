//! Data models for mzML spectra
//!
//! Spectra are first captured as [`RawMzMLSpectrum`] with their Base64
//! payloads untouched, so that spectra nobody asked for are never decoded.

use super::binary::{BinaryDecodeError, RawBinaryData};

/// A decoded spectrum
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MzMLSpectrum {
    /// Spectrum index (0-based)
    pub index: i64,

    /// Native spectrum ID from the file
    pub id: String,

    /// Default array length (number of peaks)
    pub default_array_length: usize,

    /// MS level (1 for MS1, 2 for MS2, etc.)
    pub ms_level: i16,

    /// Retention time in seconds
    pub retention_time: Option<f64>,

    /// Selected ion m/z of the first precursor
    pub precursor_mz: Option<f64>,

    /// Selected ion charge of the first precursor
    pub precursor_charge: Option<i16>,

    /// m/z array
    pub mz_array: Vec<f64>,

    /// Intensity array
    pub intensity_array: Vec<f64>,
}

impl MzMLSpectrum {
    /// Scan number from the native ID, falling back to index + 1
    pub fn scan_number(&self) -> Option<i64> {
        scan_number_or_index(&self.id, self.index)
    }
}

/// A spectrum whose peak arrays have not been decoded yet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMzMLSpectrum {
    /// Spectrum index (0-based)
    pub index: i64,

    /// Native spectrum ID from the file
    pub id: String,

    /// Default array length (number of peaks)
    pub default_array_length: usize,

    /// MS level
    pub ms_level: i16,

    /// Retention time in seconds
    pub retention_time: Option<f64>,

    /// Selected ion m/z of the first precursor
    pub precursor_mz: Option<f64>,

    /// Selected ion charge of the first precursor
    pub precursor_charge: Option<i16>,

    /// m/z payload
    pub mz_data: RawBinaryData,

    /// Intensity payload
    pub intensity_data: RawBinaryData,
}

impl RawMzMLSpectrum {
    /// Scan number from the native ID, falling back to index + 1
    pub fn scan_number(&self) -> Option<i64> {
        scan_number_or_index(&self.id, self.index)
    }

    /// Decode the peak arrays
    pub fn decode(self) -> Result<MzMLSpectrum, BinaryDecodeError> {
        let mz_array = self.mz_data.decode(self.default_array_length)?;
        let intensity_array = self.intensity_data.decode(self.default_array_length)?;

        Ok(MzMLSpectrum {
            index: self.index,
            id: self.id,
            default_array_length: self.default_array_length,
            ms_level: self.ms_level,
            retention_time: self.retention_time,
            precursor_mz: self.precursor_mz,
            precursor_charge: self.precursor_charge,
            mz_array,
            intensity_array,
        })
    }
}

/// Parse a scan number out of a native spectrum identifier.
///
/// Recognized forms:
///
/// ```text
/// controllerType=0 controllerNumber=1 scan=12345   -> 12345
/// scan=12345                                        -> 12345
/// spectrum=12345                                    -> 12345
/// index=41                                          -> 42 (index is 0-based)
/// S12345                                            -> 12345
/// 12345                                             -> 12345
/// ```
pub fn scan_number_from_native_id(id: &str) -> Option<i64> {
    let id = id.trim();
    if let Some(value) = key_value(id, "scan=").or_else(|| key_value(id, "spectrum=")) {
        return Some(value);
    }
    if let Some(index) = key_value(id, "index=") {
        return index.checked_add(1);
    }
    if let Some(rest) = id.strip_prefix('S') {
        return rest.parse().ok();
    }
    id.parse().ok()
}

fn scan_number_or_index(id: &str, index: i64) -> Option<i64> {
    scan_number_from_native_id(id).or_else(|| index.checked_add(1))
}

fn key_value(id: &str, key: &str) -> Option<i64> {
    // Match whole keys only ("scan=" must not hit "subscan=")
    let pos = id
        .match_indices(key)
        .find(|(pos, _)| *pos == 0 || id.as_bytes()[*pos - 1] == b' ')
        .map(|(pos, _)| pos)?;
    let start = pos + key.len();
    let end = id[start..]
        .find(|c: char| !c.is_ascii_digit())
        .map(|i| start + i)
        .unwrap_or(id.len());
    id[start..end].parse().ok()
}
