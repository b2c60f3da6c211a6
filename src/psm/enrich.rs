//! Attaching mzML peaks to PSM records

use std::collections::{HashMap, HashSet};
use std::path::Path;

use log::debug;

use super::{PsmRecord, SpectrumPeaks};
use crate::mzml::{MzMLError, MzMLStreamer};

/// Attach the peaks of each record's spectrum, matched by scan number.
///
/// The mzML file is streamed once; only the spectra some record refers to are
/// decoded. Records whose scan is not in the file keep `spectrum == None`.
/// Returns the number of records that received peaks.
pub fn attach_spectra(records: &mut [PsmRecord], mzml: &Path) -> Result<usize, MzMLError> {
    let mut wanted: HashSet<i64> = records.iter().filter_map(|r| r.scan_number).collect();
    let mut found: HashMap<i64, SpectrumPeaks> = HashMap::with_capacity(wanted.len());

    let streamer = MzMLStreamer::open(mzml)?;
    for raw in streamer.raw_spectra() {
        if wanted.is_empty() {
            break;
        }
        let raw = raw?;
        let Some(scan) = raw.scan_number() else {
            continue;
        };
        if !wanted.remove(&scan) {
            continue;
        }

        let id = raw.id.clone();
        let spectrum = raw
            .decode()
            .map_err(|source| MzMLError::BinaryError { id, source })?;
        found.insert(
            scan,
            SpectrumPeaks {
                mz: spectrum.mz_array,
                intensity: spectrum.intensity_array.into_iter().map(|v| v as f32).collect(),
            },
        );
    }

    if !wanted.is_empty() {
        debug!(
            "{} referenced scans not found in {}",
            wanted.len(),
            mzml.display()
        );
    }

    let mut matched = 0;
    for record in records.iter_mut() {
        if let Some(peaks) = record.scan_number.and_then(|scan| found.get(&scan)) {
            record.spectrum = Some(peaks.clone());
            matched += 1;
        }
    }

    Ok(matched)
}
