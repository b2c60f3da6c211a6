//! # PSM Records
//!
//! A [`PsmTable`] holds one [`PsmRecord`] per peptide hit found in an idXML
//! file, optionally enriched with the peaks of the matched mzML spectrum.
//!
//! The [`PsmParser`] trait is the seam the batch pipeline depends on: it turns
//! an identification file (and an optional spectral file) into a table.
//! [`IdXmlParser`] is the implementation backed by this crate's idXML and mzML
//! readers.

mod builder;
mod enrich;
mod error;
pub mod peptide;


use std::path::Path;

use log::{debug, warn};

use crate::idxml::IdXmlReader;

pub use builder::table_from_document;
pub use enrich::attach_spectra;
pub use error::PsmError;
pub use peptide::{Modification, PeptideError, Peptidoform};

/// Peak arrays of the spectrum a PSM was matched to
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpectrumPeaks {
    /// m/z values
    pub mz: Vec<f64>,
    /// Intensities, one per m/z value
    pub intensity: Vec<f32>,
}

impl SpectrumPeaks {
    /// Number of peaks
    pub fn len(&self) -> usize {
        self.mz.len()
    }

    /// Whether the spectrum has no peaks
    pub fn is_empty(&self) -> bool {
        self.mz.is_empty()
    }
}

/// A single peptide-spectrum match
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PsmRecord {
    /// Unmodified sequence
    pub sequence: String,
    /// Modified sequence as written in the identification file
    pub peptidoform: String,
    /// `{position}-{name}` modification entries
    pub modifications: Vec<String>,
    /// Precursor charge
    pub precursor_charge: i16,
    /// Theoretical m/z, when every residue and modification mass is known
    pub calculated_mz: Option<f64>,
    /// Observed precursor m/z
    pub observed_mz: Option<f64>,
    /// Retention time in seconds
    pub rt: Option<f32>,
    /// 1-based rank within the spectrum identification
    pub rank: i32,
    /// Main search engine score
    pub score: Option<f64>,
    /// Name of the main score
    pub score_type: Option<String>,
    /// q-value
    pub q_value: Option<f64>,
    /// Posterior error probability
    pub posterior_error_probability: Option<f64>,
    /// Decoy flag, `None` when the file carries no target/decoy annotation
    pub is_decoy: Option<bool>,
    /// Protein accessions
    pub protein_accessions: Vec<String>,
    /// Stem of the raw file the spectrum came from
    pub reference_file_name: String,
    /// Native spectrum identifier
    pub scan: Option<String>,
    /// Scan number parsed from the native identifier
    pub scan_number: Option<i64>,
    /// Matched spectrum, present only after enrichment
    pub spectrum: Option<SpectrumPeaks>,
}

/// Where a table came from; written to the Parquet footer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableProvenance {
    /// Identification file path
    pub source_file: String,
    /// Spectral file used for enrichment
    pub spectral_file: Option<String>,
    /// Search engine name and version
    pub search_engine: Option<String>,
}

/// PSM records converted from one identification file
#[derive(Debug, Clone, Default)]
pub struct PsmTable {
    records: Vec<PsmRecord>,
    provenance: TableProvenance,
}

impl PsmTable {
    /// Create a table from records and their provenance
    pub fn new(records: Vec<PsmRecord>, provenance: TableProvenance) -> Self {
        Self {
            records,
            provenance,
        }
    }

    /// The records, in file order
    pub fn records(&self) -> &[PsmRecord] {
        &self.records
    }

    /// Mutable access to the records
    pub fn records_mut(&mut self) -> &mut [PsmRecord] {
        &mut self.records
    }

    /// Consume the table, returning its records
    pub fn into_records(self) -> Vec<PsmRecord> {
        self.records
    }

    /// Number of PSM records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Provenance of the table
    pub fn provenance(&self) -> &TableProvenance {
        &self.provenance
    }

    /// Number of records carrying spectrum peaks
    pub fn enriched_count(&self) -> usize {
        self.records.iter().filter(|r| r.spectrum.is_some()).count()
    }
}

/// Turns an identification file into a [`PsmTable`].
///
/// `spectral_data` enables enrichment from `spectral`; it has no effect when
/// no spectral file is given.
pub trait PsmParser: Send + Sync {
    /// Parse one identification file
    fn parse(
        &self,
        identification: &Path,
        spectral: Option<&Path>,
        spectral_data: bool,
    ) -> Result<PsmTable, PsmError>;
}

/// idXML parser with optional mzML enrichment
#[derive(Debug, Clone, Copy, Default)]
pub struct IdXmlParser;

impl PsmParser for IdXmlParser {
    fn parse(
        &self,
        identification: &Path,
        spectral: Option<&Path>,
        spectral_data: bool,
    ) -> Result<PsmTable, PsmError> {
        let document = IdXmlReader::open(identification)?.read_document()?;
        let mut table = table_from_document(&document, identification);

        if spectral_data {
            match spectral {
                Some(mzml) => {
                    let matched = attach_spectra(&mut table.records, mzml)?;
                    debug!(
                        "Attached spectra from {} to {}/{} PSMs",
                        mzml.display(),
                        matched,
                        table.len()
                    );
                    table.provenance.spectral_file = Some(mzml.display().to_string());
                }
                None => warn!(
                    "Spectral data requested for {} but no mzML file was given",
                    identification.display()
                ),
            }
        }

        Ok(table)
    }
}
