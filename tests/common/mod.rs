//! Shared idXML / mzML fixtures for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// m/z [100.0, 200.0] as 64-bit little endian, base64
const MZ_BINARY: &str = "AAAAAAAAWUAAAAAAAABpQA==";
/// intensity [100.0, 200.0] as 32-bit little endian, base64
const INTENSITY_BINARY: &str = "AADIQgAASEM=";

/// idXML with one peptide identification per scan, each with two hits
pub fn idxml(run: &str, scans: &[u32]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<IdXML version="1.5">
  <IdentificationRun search_engine="Comet" search_engine_version="2023.01">
    <ProteinIdentification score_type="q-value" higher_score_better="false">
      <ProteinHit id="PH_0" accession="sp|P12345|TEST_HUMAN" />
"#,
    );
    xml.push_str(&format!(
        "      <UserParam type=\"stringList\" name=\"spectra_data\" value=\"[/raw/{run}.mzML]\" />\n"
    ));
    xml.push_str("    </ProteinIdentification>\n");
    for scan in scans {
        xml.push_str(&format!(
            r#"    <PeptideIdentification score_type="q-value" higher_score_better="false" MZ="400.6872" RT="{rt}" spectrum_reference="controllerType=0 controllerNumber=1 scan={scan}">
      <PeptideHit score="0.001" sequence="PEPTIDE" charge="2" protein_refs="PH_0">
        <UserParam type="string" name="target_decoy" value="target" />
      </PeptideHit>
      <PeptideHit score="0.05" sequence="PEPM(Oxidation)TIDE" charge="2" protein_refs="PH_0">
        <UserParam type="string" name="target_decoy" value="decoy" />
      </PeptideHit>
    </PeptideIdentification>
"#,
            rt = f64::from(*scan) * 10.0,
        ));
    }
    xml.push_str("  </IdentificationRun>\n</IdXML>\n");
    xml
}

/// mzML with one two-peak MS2 spectrum per scan
pub fn mzml(run: &str, scans: &[u32]) -> String {
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<mzML xmlns="http://psi.hupo.org/ms/mzml" version="1.1.0">
  <run id="{run}">
    <spectrumList count="{}">
"#,
        scans.len()
    );
    for (index, scan) in scans.iter().enumerate() {
        xml.push_str(&format!(
            r#"      <spectrum index="{index}" id="controllerType=0 controllerNumber=1 scan={scan}" defaultArrayLength="2">
        <cvParam cvRef="MS" accession="MS:1000511" name="ms level" value="2"/>
        <binaryDataArrayList count="2">
          <binaryDataArray>
            <cvParam cvRef="MS" accession="MS:1000523" name="64-bit float"/>
            <cvParam cvRef="MS" accession="MS:1000514" name="m/z array"/>
            <binary>{MZ_BINARY}</binary>
          </binaryDataArray>
          <binaryDataArray>
            <cvParam cvRef="MS" accession="MS:1000521" name="32-bit float"/>
            <cvParam cvRef="MS" accession="MS:1000515" name="intensity array"/>
            <binary>{INTENSITY_BINARY}</binary>
          </binaryDataArray>
        </binaryDataArrayList>
      </spectrum>
"#
        ));
    }
    xml.push_str("    </spectrumList>\n  </run>\n</mzML>\n");
    xml
}

/// Write `content` to `dir/name`
pub fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Write `{stem}.idXML` with hits for `scans`
pub fn write_idxml(dir: &Path, stem: &str, scans: &[u32]) -> PathBuf {
    write(dir, &format!("{stem}.idXML"), &idxml(stem, scans))
}

/// Write `{stem}.mzML` with spectra for `scans`
pub fn write_mzml(dir: &Path, stem: &str, scans: &[u32]) -> PathBuf {
    write(dir, &format!("{stem}.mzML"), &mzml(stem, scans))
}

/// Write a truncated idXML file
pub fn write_malformed_idxml(dir: &Path, stem: &str) -> PathBuf {
    write(
        dir,
        &format!("{stem}.idXML"),
        "<?xml version=\"1.0\"?>\n<IdXML><IdentificationRun><PeptideIdentification>",
    )
}

/// Comma-separated list of paths
pub fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Number of entries in a directory
pub fn entry_count(dir: &Path) -> usize {
    fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}
