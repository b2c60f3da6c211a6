use super::*;
use std::io::Cursor;

use crate::mzml::scan_number_from_native_id;

const MINIMAL_MZML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<mzML xmlns="http://psi.hupo.org/ms/mzml" version="1.1.0">
  <run id="test_run">
    <spectrumList count="2">
      <spectrum index="0" id="controllerType=0 controllerNumber=1 scan=1" defaultArrayLength="2">
        <cvParam cvRef="MS" accession="MS:1000511" name="ms level" value="1"/>
        <scanList count="1">
          <scan>
            <cvParam cvRef="MS" accession="MS:1000016" name="scan start time" value="1.0" unitCvRef="UO" unitAccession="UO:0000031" unitName="minute"/>
          </scan>
        </scanList>
        <binaryDataArrayList count="2">
          <binaryDataArray>
            <cvParam cvRef="MS" accession="MS:1000523" name="64-bit float"/>
            <cvParam cvRef="MS" accession="MS:1000576" name="no compression"/>
            <cvParam cvRef="MS" accession="MS:1000514" name="m/z array"/>
            <binary>AAAAAAAAWUAAAAAAAABpQA==</binary>
          </binaryDataArray>
          <binaryDataArray>
            <cvParam cvRef="MS" accession="MS:1000521" name="32-bit float"/>
            <cvParam cvRef="MS" accession="MS:1000576" name="no compression"/>
            <cvParam cvRef="MS" accession="MS:1000515" name="intensity array"/>
            <binary>AADIQgAASEM=</binary>
          </binaryDataArray>
        </binaryDataArrayList>
      </spectrum>
      <spectrum index="1" id="controllerType=0 controllerNumber=1 scan=2" defaultArrayLength="0">
        <cvParam cvRef="MS" accession="MS:1000511" name="ms level" value="2"/>
        <precursorList count="1">
          <precursor>
            <selectedIonList count="1">
              <selectedIon>
                <cvParam cvRef="MS" accession="MS:1000744" name="selected ion m/z" value="445.34"/>
                <cvParam cvRef="MS" accession="MS:1000041" name="charge state" value="2"/>
              </selectedIon>
            </selectedIonList>
          </precursor>
        </precursorList>
        <binaryDataArrayList count="2">
          <binaryDataArray>
            <cvParam cvRef="MS" accession="MS:1000514" name="m/z array"/>
            <binary></binary>
          </binaryDataArray>
          <binaryDataArray>
            <cvParam cvRef="MS" accession="MS:1000515" name="intensity array"/>
            <binary></binary>
          </binaryDataArray>
        </binaryDataArrayList>
      </spectrum>
    </spectrumList>
  </run>
</mzML>"#;

fn streamer(xml: &str) -> MzMLStreamer<Cursor<&[u8]>> {
    MzMLStreamer::new(Cursor::new(xml.as_bytes()))
}

#[test]
fn test_parse_minimal_mzml() {
    let mut streamer = streamer(MINIMAL_MZML);

    let spectrum = streamer.next_spectrum().unwrap().unwrap();
    assert_eq!(streamer.version(), Some("1.1.0"));
    assert_eq!(streamer.run_id(), Some("test_run"));
    assert_eq!(streamer.spectrum_count(), Some(2));

    assert_eq!(spectrum.index, 0);
    assert_eq!(spectrum.scan_number(), Some(1));
    assert_eq!(spectrum.ms_level, 1);
    assert!((spectrum.retention_time.unwrap() - 60.0).abs() < 0.001);
    assert_eq!(spectrum.mz_array.len(), 2);
    assert!((spectrum.mz_array[0] - 100.0).abs() < 0.001);
    assert!((spectrum.mz_array[1] - 200.0).abs() < 0.001);
    assert!((spectrum.intensity_array[1] - 200.0).abs() < 0.001);

    let ms2 = streamer.next_spectrum().unwrap().unwrap();
    assert_eq!(ms2.ms_level, 2);
    assert_eq!(ms2.precursor_mz, Some(445.34));
    assert_eq!(ms2.precursor_charge, Some(2));
    assert!(ms2.mz_array.is_empty());

    assert!(streamer.next_spectrum().unwrap().is_none());
}

#[test]
fn test_raw_spectra_iterator() {
    let raw: Vec<_> = streamer(MINIMAL_MZML)
        .raw_spectra()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(raw.len(), 2);
    assert_eq!(raw[1].scan_number(), Some(2));
    assert!(!raw[0].mz_data.base64.is_empty());
}

#[test]
fn test_missing_mzml_root_is_error() {
    let mut streamer = streamer("<IdXML></IdXML>");
    assert!(matches!(
        streamer.next_raw_spectrum(),
        Err(MzMLError::InvalidStructure(_))
    ));
}

#[test]
fn test_truncated_file_is_error() {
    let cut = MINIMAL_MZML.find("<binaryDataArrayList").unwrap();
    let mut streamer = streamer(&MINIMAL_MZML[..cut]);
    assert!(streamer.next_raw_spectrum().is_err());
}

#[test]
fn test_bad_binary_is_error() {
    let xml = MINIMAL_MZML.replace("AADIQgAASEM=", "AADIQg==");
    let mut streamer = streamer(&xml);
    assert!(matches!(
        streamer.next_spectrum(),
        Err(MzMLError::BinaryError { .. })
    ));
}

#[test]
fn test_empty_spectrum_list() {
    let xml = r#"<mzML version="1.1.0"><run id="r"><spectrumList count="0"></spectrumList></run></mzML>"#;
    assert!(streamer(xml).next_spectrum().unwrap().is_none());

    let xml = r#"<mzML version="1.1.0"><run id="r"></run></mzML>"#;
    assert!(streamer(xml).next_spectrum().unwrap().is_none());
}

#[test]
fn test_scan_number_extraction() {
    assert_eq!(
        scan_number_from_native_id("controllerType=0 controllerNumber=1 scan=12345"),
        Some(12345)
    );
    assert_eq!(scan_number_from_native_id("scan=999"), Some(999));
    assert_eq!(scan_number_from_native_id("index=41"), Some(42));
    assert_eq!(scan_number_from_native_id("spectrum=7"), Some(7));
    assert_eq!(scan_number_from_native_id("S12"), Some(12));
    assert_eq!(scan_number_from_native_id("88"), Some(88));
    assert_eq!(scan_number_from_native_id("subscan=3"), None);
    assert_eq!(scan_number_from_native_id("frame"), None);

    let spectrum = crate::mzml::MzMLSpectrum {
        index: 9,
        id: "unnamed".to_string(),
        ..Default::default()
    };
    assert_eq!(spectrum.scan_number(), Some(10));
}

#[test]
fn test_scan_number_saturated_index() {
    assert_eq!(
        scan_number_from_native_id("index=9223372036854775807"),
        None
    );

    let spectrum = crate::mzml::MzMLSpectrum {
        index: i64::MAX,
        id: "unnamed".to_string(),
        ..Default::default()
    };
    assert_eq!(spectrum.scan_number(), None);

    let xml = MINIMAL_MZML.replacen("index=\"0\"", "index=\"9223372036854775807\"", 1);
    let raw = streamer(&xml).next_raw_spectrum().unwrap().unwrap();
    assert_eq!(raw.index, i64::MAX);
}
