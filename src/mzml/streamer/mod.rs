//! Streaming mzML reader using quick-xml
//!
//! Pull-based: spectra are produced one at a time from the `<spectrumList>`,
//! so memory use is bounded by the largest single spectrum.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use helpers::get_attribute;

pub use error::MzMLError;

mod error;
mod helpers;
mod spectrum;

#[cfg(test)]
mod tests;

/// Default input buffer size (64 KB)
pub const DEFAULT_INPUT_BUFFER_SIZE: usize = 64 * 1024;

/// Streaming parser for mzML files
pub struct MzMLStreamer<R: BufRead> {
    reader: Reader<R>,
    version: Option<String>,
    run_id: Option<String>,
    metadata_read: bool,
    in_spectrum_list: bool,
    spectrum_count: Option<usize>,
    current_spectrum_index: i64,
}

impl MzMLStreamer<BufReader<File>> {
    /// Open an mzML file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, MzMLError> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::with_capacity(
            DEFAULT_INPUT_BUFFER_SIZE,
            file,
        )))
    }
}

impl<R: BufRead> MzMLStreamer<R> {
    /// Create a new streamer from a BufRead source
    pub fn new(reader: R) -> Self {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);

        Self {
            reader: xml_reader,
            version: None,
            run_id: None,
            metadata_read: false,
            in_spectrum_list: false,
            spectrum_count: None,
            current_spectrum_index: 0,
        }
    }

    /// Advance to the `<spectrumList>`, recording the header attributes on the way.
    ///
    /// A document without an `<mzML>` element is rejected; a run without a
    /// spectrum list simply yields no spectra.
    pub fn read_metadata(&mut self) -> Result<(), MzMLError> {
        if self.metadata_read {
            return Ok(());
        }
        self.metadata_read = true;

        let mut saw_root = false;
        let mut buf = Vec::new();
        loop {
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.name().as_ref() {
                    b"mzML" => {
                        saw_root = true;
                        self.version = get_attribute(e, "version")?;
                    }
                    b"run" => {
                        self.run_id = get_attribute(e, "id")?;
                    }
                    b"spectrumList" => {
                        self.in_spectrum_list = true;
                        self.spectrum_count =
                            get_attribute(e, "count")?.and_then(|s| s.parse().ok());
                        break;
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(MzMLError::XmlError(e)),
                _ => {}
            }
            buf.clear();
        }

        if !saw_root {
            return Err(MzMLError::InvalidStructure(
                "missing <mzML> element".to_string(),
            ));
        }

        Ok(())
    }

    /// mzML version, once the header has been read
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Run id, once the header has been read
    pub fn run_id(&self) -> Option<&str> {
        self.run_id.as_deref()
    }

    /// Spectrum count declared by `<spectrumList count>`
    pub fn spectrum_count(&self) -> Option<usize> {
        self.spectrum_count
    }

    /// Iterate over all spectra as raw (undecoded) data
    pub fn raw_spectra(self) -> RawSpectrumIterator<R> {
        RawSpectrumIterator { streamer: self }
    }
}

/// Iterator over raw (undecoded) spectra in an mzML file
pub struct RawSpectrumIterator<R: BufRead> {
    streamer: MzMLStreamer<R>,
}

impl<R: BufRead> Iterator for RawSpectrumIterator<R> {
    type Item = Result<crate::mzml::RawMzMLSpectrum, MzMLError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.streamer.next_raw_spectrum().transpose()
    }
}
