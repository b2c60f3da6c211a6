use std::io::Cursor;

use super::*;

const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<IdXML version="1.5">
  <SearchParameters id="SP_0" db="/db/human.fasta" enzyme="trypsin" mass_type="monoisotopic" charges="2,3,4">
    <FixedModification name="Carbamidomethyl (C)" />
    <VariableModification name="Oxidation (M)" />
    <UserParam type="string" name="fragment_tolerance" value="0.02" />
  </SearchParameters>
  <IdentificationRun date="2024-03-01T10:00:00" search_engine="Comet" search_engine_version="2023.01" search_parameters_ref="SP_0">
    <ProteinIdentification score_type="q-value" higher_score_better="false">
      <ProteinHit id="PH_0" accession="sp|P12345|TEST_HUMAN" score="0.0">
        <UserParam type="string" name="target_decoy" value="target" />
      </ProteinHit>
      <ProteinHit id="PH_1" accession="DECOY_sp|P12345|TEST_HUMAN" score="0.5" />
      <UserParam type="stringList" name="spectra_data" value="[/data/run_a.mzML]" />
    </ProteinIdentification>
    <PeptideIdentification score_type="q-value" higher_score_better="false" MZ="400.6872" RT="1234.5" spectrum_reference="controllerType=0 controllerNumber=1 scan=42">
      <PeptideHit score="0.001" sequence="PEPTIDE" charge="2" aa_before="K" aa_after="G" protein_refs="PH_0">
        <UserParam type="string" name="target_decoy" value="target" />
        <UserParam type="float" name="Posterior Error Probability_score" value="0.0005" />
      </PeptideHit>
      <PeptideHit score="0.2" sequence="PEPM(Oxidation)TIDE" charge="2" protein_refs="PH_0 PH_1">
        <UserParam type="string" name="target_decoy" value="target+decoy" />
      </PeptideHit>
      <UserParam type="string" name="spectrum_id" value="42" />
    </PeptideIdentification>
    <PeptideIdentification score_type="q-value" higher_score_better="false" MZ="500.25" RT="2000.0" spectrum_reference="index=7">
      <PeptideHit score="0.04" sequence="DECOYPEPK" charge="3" protein_refs="PH_1" />
    </PeptideIdentification>
  </IdentificationRun>
</IdXML>
"#;

fn parse(xml: &str) -> Result<IdXmlDocument, IdXmlError> {
    IdXmlReader::new(Cursor::new(xml.as_bytes())).read_document()
}

#[test]
fn test_parse_document_structure() {
    let doc = parse(SAMPLE).unwrap();
    assert_eq!(doc.version.as_deref(), Some("1.5"));
    assert_eq!(doc.search_parameters.len(), 1);
    assert_eq!(doc.runs.len(), 1);
    assert_eq!(doc.peptide_hit_count(), 3);

    let params = &doc.search_parameters[0];
    assert_eq!(params.id, "SP_0");
    assert_eq!(params.enzyme.as_deref(), Some("trypsin"));
    assert_eq!(params.fixed_modifications, vec!["Carbamidomethyl (C)"]);
    assert_eq!(params.variable_modifications, vec!["Oxidation (M)"]);
    assert_eq!(params.user_params.get("fragment_tolerance"), Some("0.02"));
}

#[test]
fn test_parse_run_and_proteins() {
    let doc = parse(SAMPLE).unwrap();
    let run = &doc.runs[0];
    assert_eq!(run.search_engine.as_deref(), Some("Comet"));
    assert_eq!(run.search_engine_version.as_deref(), Some("2023.01"));

    let proteins = run.protein_identification.as_ref().unwrap();
    assert_eq!(proteins.hits.len(), 2);
    assert_eq!(proteins.hits[0].accession, "sp|P12345|TEST_HUMAN");
    assert_eq!(proteins.hits[0].user_params.get("target_decoy"), Some("target"));
    assert_eq!(proteins.hits[1].score, Some(0.5));
    assert_eq!(proteins.primary_spectra_data(), Some("/data/run_a.mzML"));
}

#[test]
fn test_parse_peptide_hits() {
    let doc = parse(SAMPLE).unwrap();
    let ids = &doc.runs[0].peptide_identifications;
    assert_eq!(ids.len(), 2);

    let first = &ids[0];
    assert_eq!(first.mz, Some(400.6872));
    assert_eq!(first.rt, Some(1234.5));
    assert!(!first.higher_score_better);
    assert_eq!(first.user_params.get("spectrum_id"), Some("42"));
    assert_eq!(first.hits.len(), 2);

    let top = &first.hits[0];
    assert_eq!(top.sequence, "PEPTIDE");
    assert_eq!(top.charge, 2);
    assert_eq!(top.aa_before.as_deref(), Some("K"));
    assert_eq!(top.protein_refs, vec!["PH_0"]);
    assert_eq!(
        top.user_params
            .get_f64(&["Posterior Error Probability_score"]),
        Some(0.0005)
    );

    assert_eq!(first.hits[1].protein_refs, vec!["PH_0", "PH_1"]);
    assert_eq!(ids[1].spectrum_reference.as_deref(), Some("index=7"));
    assert_eq!(ids[1].hits[0].charge, 3);
}

#[test]
fn test_escaped_attribute_values() {
    let xml = r#"<IdXML><IdentificationRun search_engine="A&amp;B">
        <PeptideIdentification><PeptideHit sequence="PEPK" charge="1" /></PeptideIdentification>
        </IdentificationRun></IdXML>"#;
    let doc = parse(xml).unwrap();
    assert_eq!(doc.runs[0].search_engine.as_deref(), Some("A&B"));
}

#[test]
fn test_empty_document() {
    let doc = parse(r#"<IdXML version="1.5"></IdXML>"#).unwrap();
    assert!(doc.runs.is_empty());
    assert_eq!(doc.peptide_hit_count(), 0);
}

#[test]
fn test_missing_root_is_error() {
    assert!(matches!(
        parse("this is not xml"),
        Err(IdXmlError::InvalidStructure(_))
    ));
    assert!(matches!(
        parse("<mzML></mzML>"),
        Err(IdXmlError::InvalidStructure(_))
    ));
}

#[test]
fn test_truncated_document_is_error() {
    let truncated = &SAMPLE[..SAMPLE.len() / 2];
    assert!(parse(truncated).is_err());
}

#[test]
fn test_missing_required_attribute() {
    let xml = r#"<IdXML><IdentificationRun><PeptideIdentification>
        <PeptideHit charge="2" /></PeptideIdentification></IdentificationRun></IdXML>"#;
    assert!(matches!(parse(xml), Err(IdXmlError::MissingAttribute(_))));
}

#[test]
fn test_invalid_numeric_attribute() {
    let xml = r#"<IdXML><IdentificationRun><PeptideIdentification MZ="abc">
        </PeptideIdentification></IdentificationRun></IdXML>"#;
    assert!(matches!(
        parse(xml),
        Err(IdXmlError::InvalidAttributeValue(_))
    ));

    let xml = r#"<IdXML><IdentificationRun><PeptideIdentification>
        <PeptideHit sequence="PEPK" charge="two" /></PeptideIdentification></IdentificationRun></IdXML>"#;
    assert!(matches!(
        parse(xml),
        Err(IdXmlError::InvalidAttributeValue(_))
    ));
}

#[test]
fn test_peptide_identification_outside_run() {
    let xml = r#"<IdXML><PeptideIdentification /></IdXML>"#;
    assert!(matches!(parse(xml), Err(IdXmlError::InvalidStructure(_))));
}

#[test]
fn test_unknown_elements_are_skipped() {
    let xml = r#"<IdXML><Extra><Nested a="1" /></Extra><IdentificationRun>
        <PeptideIdentification><PeptideHit sequence="PEPK" charge="1"><Custom /></PeptideHit>
        </PeptideIdentification></IdentificationRun></IdXML>"#;
    let doc = parse(xml).unwrap();
    assert_eq!(doc.peptide_hit_count(), 1);
}

#[test]
fn test_open_missing_file() {
    assert!(matches!(
        IdXmlReader::open("/nonexistent/file.idXML"),
        Err(IdXmlError::IoError(_))
    ));
}
