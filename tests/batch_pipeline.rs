//! End-to-end tests for batch conversion
//!
//! Each test builds idXML / mzML fixtures in a scratch directory, runs the
//! batch converter and reads the merged Parquet output back.

mod common;

use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, Int64Array, ListArray, StringArray};
use arrow::record_batch::RecordBatch;
use idxml_psm::batch::{
    BatchConfig, BatchConverter, BatchError, BatchEvent, BatchInputs, InputSource,
    PairingStrategy, RecordingObserver,
};
use idxml_psm::reader::PsmReader;
use idxml_psm::schema::{KEY_MERGED_FROM, MZ_ARRAY, REFERENCE_FILE_NAME, SCAN_NUMBER};
use tempfile::tempdir;

use common::*;

fn read_batches(path: &Path) -> Vec<RecordBatch> {
    PsmReader::open(path).unwrap().read_all().unwrap()
}

fn string_column(batches: &[RecordBatch], name: &str) -> Vec<String> {
    batches
        .iter()
        .flat_map(|batch| {
            let column = batch
                .column_by_name(name)
                .unwrap()
                .as_any()
                .downcast_ref::<StringArray>()
                .unwrap()
                .clone();
            (0..column.len())
                .map(|i| column.value(i).to_string())
                .collect::<Vec<_>>()
        })
        .collect()
}

fn scan_numbers(batches: &[RecordBatch]) -> Vec<Option<i64>> {
    batches
        .iter()
        .flat_map(|batch| {
            let column = batch
                .column_by_name(SCAN_NUMBER)
                .unwrap()
                .as_any()
                .downcast_ref::<Int64Array>()
                .unwrap()
                .clone();
            column.iter().collect::<Vec<_>>()
        })
        .collect()
}

/// Per row: whether the spectrum arrays are present
fn enriched_rows(batches: &[RecordBatch]) -> Vec<bool> {
    batches
        .iter()
        .flat_map(|batch| {
            let column = batch
                .column_by_name(MZ_ARRAY)
                .unwrap()
                .as_any()
                .downcast_ref::<ListArray>()
                .unwrap()
                .clone();
            (0..column.len())
                .map(|i| column.is_valid(i))
                .collect::<Vec<_>>()
        })
        .collect()
}

#[test]
fn test_folder_without_spectra() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    let scratch = tempdir().unwrap();
    write_idxml(input.path(), "c", &[5]);
    write_idxml(input.path(), "a", &[1, 2]);
    write_idxml(input.path(), "b", &[3]);

    let config = BatchConfig::new(output.path()).with_temp_root(scratch.path());
    let report = BatchConverter::new(config)
        .run(&BatchInputs::new(
            InputSource::Directory(input.path().to_path_buf()),
            None,
        ))
        .unwrap();

    // two hits per identification
    assert_eq!(report.converted, 3);
    assert_eq!(report.records, 8);
    assert_eq!(report.enriched, 0);

    let batches = read_batches(&report.output);
    let references = string_column(&batches, REFERENCE_FILE_NAME);
    assert_eq!(references, vec!["a", "a", "a", "a", "b", "b", "c", "c"]);
    assert!(enriched_rows(&batches).iter().all(|e| !e));
    assert_eq!(entry_count(scratch.path()), 0);
    assert_eq!(entry_count(output.path()), 1);
}

#[test]
fn test_explicit_lists_pair_by_index() {
    let ids = tempdir().unwrap();
    let spectra = tempdir().unwrap();
    let output = tempdir().unwrap();
    let id_files = vec![
        write_idxml(ids.path(), "first", &[10]),
        write_idxml(ids.path(), "second", &[20]),
    ];
    // stems deliberately differ from the idXML stems
    let mzml_files = vec![
        write_mzml(spectra.path(), "x", &[10]),
        write_mzml(spectra.path(), "y", &[20]),
    ];

    let inputs = BatchInputs::from_options(
        None,
        Some(&join_paths(&id_files)),
        None,
        Some(&join_paths(&mzml_files)),
    )
    .unwrap();
    let config = BatchConfig::new(output.path()).with_temp_root(output.path().join("tmp"));
    let report = BatchConverter::new(config).run(&inputs).unwrap();

    assert_eq!(report.strategy, PairingStrategy::Index);
    assert_eq!(report.records, 4);
    assert_eq!(report.enriched, 4);

    let batches = read_batches(&report.output);
    assert!(enriched_rows(&batches).iter().all(|e| *e));
    assert_eq!(scan_numbers(&batches), vec![Some(10), Some(10), Some(20), Some(20)]);
}

#[test]
fn test_folder_pairs_by_stem_and_tolerates_missing_spectra() {
    let ids = tempdir().unwrap();
    let spectra = tempdir().unwrap();
    let output = tempdir().unwrap();
    write_idxml(ids.path(), "a", &[1]);
    write_idxml(ids.path(), "b", &[1]);
    write_mzml(spectra.path(), "a", &[1]);

    let observer = Arc::new(RecordingObserver::new());
    let config = BatchConfig::new(output.path()).with_temp_root(output.path().join("tmp"));
    let report = BatchConverter::new(config)
        .with_observer(observer.clone())
        .run(&BatchInputs::new(
            InputSource::Directory(ids.path().to_path_buf()),
            Some(InputSource::Directory(spectra.path().to_path_buf())),
        ))
        .unwrap();

    assert_eq!(report.strategy, PairingStrategy::Stem);
    assert!(report.failures.is_empty());

    let batches = read_batches(&report.output);
    assert_eq!(enriched_rows(&batches), vec![true, true, false, false]);
    assert!(observer
        .events()
        .iter()
        .any(|e| matches!(e, BatchEvent::EntryUnpaired { index: 1, .. })));
}

#[test]
fn test_malformed_file_is_skipped() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    let scratch = tempdir().unwrap();
    write_idxml(input.path(), "a", &[1]);
    let broken = write_malformed_idxml(input.path(), "b");
    write_idxml(input.path(), "c", &[2]);

    let config = BatchConfig::new(output.path()).with_temp_root(scratch.path());
    let report = BatchConverter::new(config)
        .run(&BatchInputs::new(
            InputSource::Directory(input.path().to_path_buf()),
            None,
        ))
        .unwrap();

    assert_eq!(report.converted, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].identification, broken);

    let references = string_column(&read_batches(&report.output), REFERENCE_FILE_NAME);
    assert_eq!(references, vec!["a", "a", "c", "c"]);
    assert_eq!(entry_count(scratch.path()), 0);
}

#[test]
fn test_all_malformed_is_empty_result() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    let scratch = tempdir().unwrap();
    write_malformed_idxml(input.path(), "a");
    write_malformed_idxml(input.path(), "b");

    let config = BatchConfig::new(output.path()).with_temp_root(scratch.path());
    let err = BatchConverter::new(config)
        .run(&BatchInputs::new(
            InputSource::Directory(input.path().to_path_buf()),
            None,
        ))
        .unwrap_err();

    assert!(matches!(err, BatchError::EmptyResult { attempted: 2, .. }));
    assert_eq!(entry_count(scratch.path()), 0);
    assert_eq!(entry_count(output.path()), 0);
}

#[test]
fn test_folder_and_list_is_configuration_error() {
    let input = tempdir().unwrap();
    let file = write_idxml(input.path(), "a", &[1]);

    let err = BatchInputs::from_options(
        Some(input.path().to_path_buf()),
        Some(&file.display().to_string()),
        None,
        None,
    )
    .unwrap_err();

    assert!(err.is_configuration());
}

#[test]
fn test_runs_are_idempotent() {
    let ids = tempdir().unwrap();
    let spectra = tempdir().unwrap();
    let output = tempdir().unwrap();
    write_idxml(ids.path(), "a", &[3, 1]);
    write_idxml(ids.path(), "b", &[2]);
    write_mzml(spectra.path(), "a", &[1, 2, 3]);

    let inputs = BatchInputs::new(
        InputSource::Directory(ids.path().to_path_buf()),
        Some(InputSource::Directory(spectra.path().to_path_buf())),
    );
    let config = BatchConfig::new(output.path()).with_temp_root(output.path().join("tmp"));
    let converter = BatchConverter::new(config);

    let first = read_batches(&converter.run(&inputs).unwrap().output);
    let second = read_batches(&converter.run(&inputs).unwrap().output);

    assert_eq!(first, second);
    assert_eq!(
        scan_numbers(&first),
        vec![Some(3), Some(3), Some(1), Some(1), Some(2), Some(2)]
    );
}

#[test]
fn test_merged_output_records_sources_in_order() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    let files = vec![
        write_idxml(input.path(), "z", &[1]),
        write_idxml(input.path(), "m", &[1]),
        write_idxml(input.path(), "a", &[1]),
    ];

    let config = BatchConfig::new(output.path())
        .with_output_prefix("study")
        .with_temp_root(output.path().join("tmp"));
    let report = BatchConverter::new(config)
        .run(&BatchInputs::new(InputSource::List(files.clone()), None))
        .unwrap();

    let reader = PsmReader::open(&report.output).unwrap();
    reader.validate().unwrap();
    let sources: Vec<String> =
        serde_json::from_str(&reader.metadata()[KEY_MERGED_FROM]).unwrap();
    let expected: Vec<String> = files.iter().map(|f| f.display().to_string()).collect();
    assert_eq!(sources, expected);

    let references = string_column(&reader.read_all().unwrap(), REFERENCE_FILE_NAME);
    assert_eq!(references, vec!["z", "z", "m", "m", "a", "a"]);
}
