//! Column names as constants for type safety

/// Unmodified amino acid sequence
pub const SEQUENCE: &str = "sequence";
/// Modified sequence in the notation found in the idXML file
pub const PEPTIDOFORM: &str = "peptidoform";
/// Modifications as `{position}-{name}` entries (position 0 is the N-terminus)
pub const MODIFICATIONS: &str = "modifications";
/// Precursor charge state of the hit
pub const PRECURSOR_CHARGE: &str = "precursor_charge";
/// Theoretical m/z computed from the peptidoform
pub const CALCULATED_MZ: &str = "calculated_mz";
/// Observed precursor m/z
pub const OBSERVED_MZ: &str = "observed_mz";
/// Retention time in seconds
pub const RT: &str = "rt";
/// 1-based rank of the hit within its spectrum identification
pub const RANK: &str = "rank";
/// Main search engine score
pub const SCORE: &str = "score";
/// Name of the main score
pub const SCORE_TYPE: &str = "score_type";
/// q-value, when reported
pub const Q_VALUE: &str = "q_value";
/// Posterior error probability, when reported
pub const POSTERIOR_ERROR_PROBABILITY: &str = "posterior_error_probability";
/// Decoy flag
pub const IS_DECOY: &str = "is_decoy";
/// Accessions of the proteins the peptide maps to
pub const PROTEIN_ACCESSIONS: &str = "protein_accessions";
/// Stem of the raw file the spectrum came from
pub const REFERENCE_FILE_NAME: &str = "reference_file_name";
/// Native spectrum identifier
pub const SCAN: &str = "scan";
/// Scan number parsed from the native identifier
pub const SCAN_NUMBER: &str = "scan_number";

// Spectral enrichment columns (null unless an mzML file was attached)
/// Number of peaks in the matched spectrum
pub const NUMBER_PEAKS: &str = "number_peaks";
/// m/z values of the matched spectrum
pub const MZ_ARRAY: &str = "mz_array";
/// Intensities of the matched spectrum
pub const INTENSITY_ARRAY: &str = "intensity_array";

/// Name of the child field inside list columns
pub const LIST_ITEM: &str = "item";
