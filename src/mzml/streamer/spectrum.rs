use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};

use super::helpers::{get_attribute, parse_cv_param};
use super::{MzMLError, MzMLStreamer};
use crate::mzml::binary::RawBinaryData;
use crate::mzml::cv_params::{normalize_retention_time, CvParam, MS_CV_ACCESSIONS};
use crate::mzml::models::{MzMLSpectrum, RawMzMLSpectrum};

/// Which part of a `<spectrum>` the reader is in
#[derive(Debug, Default)]
struct SpectrumContext {
    in_scan_list: bool,
    in_precursor_list: bool,
    in_binary_data_array: bool,
    binary_cv_params: Vec<CvParam>,
    binary_data: String,
}

impl<R: BufRead> MzMLStreamer<R> {
    /// Read and decode the next spectrum
    pub fn next_spectrum(&mut self) -> Result<Option<MzMLSpectrum>, MzMLError> {
        match self.next_raw_spectrum()? {
            Some(raw) => {
                let id = raw.id.clone();
                raw.decode()
                    .map(Some)
                    .map_err(|source| MzMLError::BinaryError { id, source })
            }
            None => Ok(None),
        }
    }

    /// Read the next spectrum WITHOUT decoding its binary arrays
    pub fn next_raw_spectrum(&mut self) -> Result<Option<RawMzMLSpectrum>, MzMLError> {
        if !self.in_spectrum_list {
            self.read_metadata()?;
            if !self.in_spectrum_list {
                return Ok(None);
            }
        }

        let mut buf = Vec::new();
        loop {
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    if e.name().as_ref() == b"spectrum" {
                        let spectrum = self.parse_raw_spectrum(&e)?;
                        self.current_spectrum_index += 1;
                        return Ok(Some(spectrum));
                    }
                }
                Ok(Event::End(ref e)) => {
                    if e.name().as_ref() == b"spectrumList" {
                        self.in_spectrum_list = false;
                        return Ok(None);
                    }
                }
                Ok(Event::Eof) => {
                    return Err(MzMLError::InvalidStructure(
                        "Unexpected EOF in spectrumList".to_string(),
                    ));
                }
                Err(e) => return Err(MzMLError::XmlError(e)),
                _ => {}
            }
            buf.clear();
        }
    }

    /// Parse a single spectrum element, keeping the Base64 payloads as text
    fn parse_raw_spectrum(
        &mut self,
        start_event: &BytesStart,
    ) -> Result<RawMzMLSpectrum, MzMLError> {
        let mut spectrum = RawMzMLSpectrum {
            index: get_attribute(start_event, "index")?
                .and_then(|s| s.parse().ok())
                .unwrap_or(self.current_spectrum_index),
            id: get_attribute(start_event, "id")?.unwrap_or_default(),
            default_array_length: get_attribute(start_event, "defaultArrayLength")?
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
            ms_level: 1,
            ..Default::default()
        };

        let mut depth = 1;
        let mut ctx = SpectrumContext::default();
        let mut buf = Vec::new();

        loop {
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    depth += 1;
                    match e.name().as_ref() {
                        b"cvParam" => {
                            let cv_param = parse_cv_param(e)?;
                            Self::apply_cv_param(&mut spectrum, &mut ctx, cv_param);
                        }
                        b"scanList" => ctx.in_scan_list = true,
                        b"precursorList" => ctx.in_precursor_list = true,
                        b"binaryDataArray" => {
                            ctx.in_binary_data_array = true;
                            ctx.binary_cv_params.clear();
                            ctx.binary_data.clear();
                        }
                        _ => {}
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    if e.name().as_ref() == b"cvParam" {
                        let cv_param = parse_cv_param(e)?;
                        Self::apply_cv_param(&mut spectrum, &mut ctx, cv_param);
                    }
                }
                Ok(Event::Text(ref t)) => {
                    if ctx.in_binary_data_array {
                        // Base64 may be split over several lines
                        ctx.binary_data.push_str(&t.unescape()?);
                    }
                }
                Ok(Event::End(ref e)) => {
                    depth -= 1;
                    match e.name().as_ref() {
                        b"spectrum" if depth == 0 => break,
                        b"scanList" => ctx.in_scan_list = false,
                        b"precursorList" => ctx.in_precursor_list = false,
                        b"binaryDataArray" => {
                            Self::store_raw_binary_array(&mut spectrum, &mut ctx);
                            ctx.in_binary_data_array = false;
                        }
                        _ => {}
                    }
                }
                Ok(Event::Eof) => {
                    return Err(MzMLError::InvalidStructure(
                        "Unexpected EOF in spectrum".to_string(),
                    ));
                }
                Err(e) => return Err(MzMLError::XmlError(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(spectrum)
    }

    /// Route a cvParam to the part of the spectrum it describes
    fn apply_cv_param(spectrum: &mut RawMzMLSpectrum, ctx: &mut SpectrumContext, cv: CvParam) {
        if ctx.in_binary_data_array {
            ctx.binary_cv_params.push(cv);
            return;
        }

        match cv.accession.as_str() {
            MS_CV_ACCESSIONS::MS_LEVEL => {
                spectrum.ms_level = cv
                    .value_as_i64()
                    .and_then(|v| i16::try_from(v).ok())
                    .unwrap_or(1);
            }
            MS_CV_ACCESSIONS::SCAN_START_TIME if ctx.in_scan_list => {
                if let Some(val) = cv.value_as_f64() {
                    spectrum.retention_time =
                        Some(normalize_retention_time(val, cv.unit_accession.as_deref()));
                }
            }
            MS_CV_ACCESSIONS::SELECTED_ION_MZ if ctx.in_precursor_list => {
                if spectrum.precursor_mz.is_none() {
                    spectrum.precursor_mz = cv.value_as_f64();
                }
            }
            MS_CV_ACCESSIONS::CHARGE_STATE if ctx.in_precursor_list => {
                if spectrum.precursor_charge.is_none() {
                    spectrum.precursor_charge =
                        cv.value_as_i64().and_then(|v| i16::try_from(v).ok());
                }
            }
            _ => {}
        }
    }

    /// Store the finished binary array in the spectrum without decoding it
    fn store_raw_binary_array(spectrum: &mut RawMzMLSpectrum, ctx: &mut SpectrumContext) {
        let mut raw_data = RawBinaryData {
            base64: std::mem::take(&mut ctx.binary_data),
            ..Default::default()
        };
        let mut is_mz = false;
        let mut is_intensity = false;

        for cv in &ctx.binary_cv_params {
            if raw_data.apply_cv_accession(&cv.accession) {
                continue;
            }
            match cv.accession.as_str() {
                MS_CV_ACCESSIONS::MZ_ARRAY => is_mz = true,
                MS_CV_ACCESSIONS::INTENSITY_ARRAY => is_intensity = true,
                _ => {}
            }
        }

        if is_mz {
            spectrum.mz_data = raw_data;
        } else if is_intensity {
            spectrum.intensity_data = raw_data;
        }
        ctx.binary_cv_params.clear();
    }
}
