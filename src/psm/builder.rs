//! Flattening of an idXML document into PSM records

use std::collections::HashMap;
use std::path::Path;

use log::debug;

use super::{PsmRecord, PsmTable, TableProvenance};
use crate::idxml::{IdXmlDocument, IdentificationRun, PeptideHit, PeptideIdentification};
use crate::mzml::scan_number_from_native_id;
use crate::psm::Peptidoform;

const Q_VALUE_PARAMS: &[&str] = &["q-value", "q-value_score", "MS:1001491"];
const PEP_PARAMS: &[&str] = &["Posterior Error Probability_score", "MS:1001493", "pep"];

/// Build a table with one record per peptide hit, in document order.
///
/// `source` is the identification file; its stem names the spectra when the
/// run carries no `spectra_data` parameter.
pub fn table_from_document(document: &IdXmlDocument, source: &Path) -> PsmTable {
    let fallback_reference = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut records = Vec::with_capacity(document.peptide_hit_count());
    for run in &document.runs {
        let context = RunContext::new(run, &fallback_reference);
        for identification in &run.peptide_identifications {
            for (i, hit) in identification.hits.iter().enumerate() {
                records.push(context.record(identification, hit, i + 1));
            }
        }
    }

    let provenance = TableProvenance {
        source_file: source.display().to_string(),
        spectral_file: None,
        search_engine: document.runs.first().and_then(search_engine_label),
    };

    PsmTable::new(records, provenance)
}

/// Per-run lookups shared by all of its hits
struct RunContext<'a> {
    accessions: HashMap<&'a str, &'a str>,
    reference_file_name: String,
}

impl<'a> RunContext<'a> {
    fn new(run: &'a IdentificationRun, fallback_reference: &str) -> Self {
        let proteins = run.protein_identification.as_ref();
        let accessions = proteins
            .map(|p| {
                p.hits
                    .iter()
                    .map(|h| (h.id.as_str(), h.accession.as_str()))
                    .collect()
            })
            .unwrap_or_default();
        let reference_file_name = proteins
            .and_then(|p| p.primary_spectra_data())
            .map(path_stem)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| fallback_reference.to_string());

        Self {
            accessions,
            reference_file_name,
        }
    }

    fn record(
        &self,
        identification: &PeptideIdentification,
        hit: &PeptideHit,
        rank: usize,
    ) -> PsmRecord {
        let (sequence, modifications, calculated_mz) = match Peptidoform::parse(&hit.sequence) {
            Ok(peptide) => (
                peptide.stripped_sequence().to_string(),
                peptide.modification_labels(),
                peptide.theoretical_mz(hit.charge),
            ),
            Err(e) => {
                debug!("Keeping unparsable peptidoform '{}' as-is: {}", hit.sequence, e);
                (hit.sequence.clone(), Vec::new(), None)
            }
        };

        let score_type = identification.score_type.as_deref();
        let q_value = if score_type.is_some_and(is_q_value_score) {
            hit.score
        } else {
            hit.user_params.get_f64(Q_VALUE_PARAMS)
        };
        let posterior_error_probability = if score_type.is_some_and(is_pep_score) {
            hit.score
        } else {
            hit.user_params.get_f64(PEP_PARAMS)
        };

        let protein_accessions = hit
            .protein_refs
            .iter()
            .map(|r| {
                self.accessions
                    .get(r.as_str())
                    .map_or_else(|| r.clone(), |a| (*a).to_string())
            })
            .collect();

        let scan = identification.spectrum_reference.clone();
        let scan_number = scan.as_deref().and_then(scan_number_from_native_id);

        PsmRecord {
            sequence,
            peptidoform: hit.sequence.clone(),
            modifications,
            precursor_charge: hit.charge,
            calculated_mz,
            observed_mz: identification.mz,
            rt: identification.rt.map(|rt| rt as f32),
            rank: i32::try_from(rank).unwrap_or(i32::MAX),
            score: hit.score,
            score_type: identification.score_type.clone(),
            q_value,
            posterior_error_probability,
            is_decoy: decoy_flag(hit.user_params.get("target_decoy")),
            protein_accessions,
            reference_file_name: self.reference_file_name.clone(),
            scan,
            scan_number,
            spectrum: None,
        }
    }
}

/// `target_decoy` value to decoy flag; unknown or missing is `None`
fn decoy_flag(value: Option<&str>) -> Option<bool> {
    match value?.trim() {
        "decoy" => Some(true),
        "target" | "target+decoy" => Some(false),
        _ => None,
    }
}

fn is_q_value_score(score_type: &str) -> bool {
    score_type.eq_ignore_ascii_case("q-value") || score_type == "MS:1001491"
}

fn is_pep_score(score_type: &str) -> bool {
    score_type
        .to_ascii_lowercase()
        .starts_with("posterior error probability")
        || score_type.eq_ignore_ascii_case("pep")
        || score_type == "MS:1001493"
}

/// "name version" of a run's search engine
fn search_engine_label(run: &IdentificationRun) -> Option<String> {
    let name = run.search_engine.as_deref()?;
    Some(match run.search_engine_version.as_deref() {
        Some(version) if !version.is_empty() => format!("{} {}", name, version),
        _ => name.to_string(),
    })
}

/// File stem of a path written by any platform
fn path_stem(path: &str) -> String {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match name.rfind('.') {
        Some(dot) if dot > 0 => name[..dot].to_string(),
        _ => name.to_string(),
    }
}
