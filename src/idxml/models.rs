//! Data models for idXML documents

use serde::{Deserialize, Serialize};

/// A `<UserParam>` element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserParam {
    /// Declared value type (`string`, `float`, `int`, `stringList`, ...)
    pub value_type: Option<String>,
    /// Parameter name
    pub name: String,
    /// Raw value
    pub value: String,
}

/// Ordered list of user parameters with name lookups
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserParams(pub Vec<UserParam>);

impl UserParams {
    /// Value of the first parameter with this name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// Value of the first parameter with any of these names, parsed as f64
    pub fn get_f64(&self, names: &[&str]) -> Option<f64> {
        names
            .iter()
            .find_map(|name| self.get(name))
            .and_then(|v| v.trim().parse().ok())
    }

    /// Append a parameter
    pub fn push(&mut self, param: UserParam) {
        self.0.push(param);
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Search engine settings (`<SearchParameters>`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchParameters {
    /// Element id referenced by identification runs
    pub id: String,
    /// Sequence database
    pub db: Option<String>,
    /// Digestion enzyme
    pub enzyme: Option<String>,
    /// `monoisotopic` or `average`
    pub mass_type: Option<String>,
    /// Searched charge states
    pub charges: Option<String>,
    /// Fixed modification names
    pub fixed_modifications: Vec<String>,
    /// Variable modification names
    pub variable_modifications: Vec<String>,
    /// Remaining parameters
    pub user_params: UserParams,
}

/// A `<ProteinHit>`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProteinHit {
    /// Element id referenced by `protein_refs`
    pub id: String,
    /// Protein accession
    pub accession: String,
    /// Protein score
    pub score: Option<f64>,
    /// Additional parameters (e.g. `target_decoy`)
    pub user_params: UserParams,
}

/// Protein-level results of a run (`<ProteinIdentification>`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProteinIdentification {
    /// Score name
    pub score_type: Option<String>,
    /// Whether larger scores are better
    pub higher_score_better: bool,
    /// Protein hits
    pub hits: Vec<ProteinHit>,
    /// Run-level parameters (e.g. `spectra_data`)
    pub user_params: UserParams,
}

impl ProteinIdentification {
    /// First raw file listed in the `spectra_data` parameter
    ///
    /// OpenMS writes the value as a bracketed list: `[/data/run1.mzML]`.
    pub fn primary_spectra_data(&self) -> Option<&str> {
        let value = self.user_params.get("spectra_data")?;
        value
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .split(',')
            .map(str::trim)
            .find(|s| !s.is_empty())
    }
}

/// A `<PeptideHit>`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeptideHit {
    /// Hit score, interpreted by the parent's `score_type`
    pub score: Option<f64>,
    /// Modified sequence in OpenMS notation
    pub sequence: String,
    /// Precursor charge
    pub charge: i16,
    /// Preceding residue in the protein
    pub aa_before: Option<String>,
    /// Following residue in the protein
    pub aa_after: Option<String>,
    /// Ids of the protein hits this peptide maps to
    pub protein_refs: Vec<String>,
    /// Additional scores and annotations
    pub user_params: UserParams,
}

/// Hits for one spectrum (`<PeptideIdentification>`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeptideIdentification {
    /// Score name of the hits
    pub score_type: Option<String>,
    /// Whether larger scores are better
    pub higher_score_better: bool,
    /// Precursor m/z
    pub mz: Option<f64>,
    /// Retention time in seconds
    pub rt: Option<f64>,
    /// Native id of the identified spectrum
    pub spectrum_reference: Option<String>,
    /// Hits in rank order
    pub hits: Vec<PeptideHit>,
    /// Additional parameters
    pub user_params: UserParams,
}

/// One search engine run (`<IdentificationRun>`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentificationRun {
    /// Search engine name
    pub search_engine: Option<String>,
    /// Search engine version
    pub search_engine_version: Option<String>,
    /// Run date
    pub date: Option<String>,
    /// Id of the [`SearchParameters`] used
    pub search_parameters_ref: Option<String>,
    /// Protein-level results
    pub protein_identification: Option<ProteinIdentification>,
    /// Spectrum-level results
    pub peptide_identifications: Vec<PeptideIdentification>,
}

/// A parsed idXML document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdXmlDocument {
    /// idXML schema version
    pub version: Option<String>,
    /// Search parameter sets
    pub search_parameters: Vec<SearchParameters>,
    /// Identification runs
    pub runs: Vec<IdentificationRun>,
}

impl IdXmlDocument {
    /// Total number of peptide hits across all runs
    pub fn peptide_hit_count(&self) -> usize {
        self.runs
            .iter()
            .flat_map(|run| run.peptide_identifications.iter())
            .map(|id| id.hits.len())
            .sum()
    }
}
