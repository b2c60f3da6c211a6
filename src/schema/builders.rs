use std::collections::HashMap;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, FieldRef, Schema, SchemaBuilder};

use super::columns;
use super::constants::{KEY_FORMAT_VERSION, PSM_FORMAT_VERSION};

/// Creates a Field with CV term metadata annotation
fn field_with_cv(name: &str, data_type: DataType, nullable: bool, cv_accession: &str) -> Field {
    let mut metadata = HashMap::new();
    metadata.insert("cv_accession".to_string(), cv_accession.to_string());
    Field::new(name, data_type, nullable).with_metadata(metadata)
}

/// Child field used by every list column.
///
/// The writer builds list arrays against this exact field so that the batch
/// data types match the schema.
pub fn list_item_field(data_type: DataType) -> FieldRef {
    Arc::new(Field::new(columns::LIST_ITEM, data_type, true))
}

/// Creates the PSM Arrow schema.
///
/// One row per peptide hit. The spectral columns are always present and are
/// null for rows that were not enriched, so every converted file shares the
/// same schema whether or not an mzML file was attached.
///
/// # Example
///
/// ```
/// use idxml_psm::schema::create_psm_schema;
///
/// let schema = create_psm_schema();
/// assert_eq!(schema.fields().len(), 20);
/// ```
pub fn create_psm_schema() -> Schema {
    let mut builder = SchemaBuilder::new();

    // Peptide identity
    builder.push(field_with_cv(
        columns::SEQUENCE,
        DataType::Utf8,
        false,
        "MS:1000888", // stripped peptide sequence
    ));
    builder.push(field_with_cv(
        columns::PEPTIDOFORM,
        DataType::Utf8,
        false,
        "MS:1000889", // peptidoform sequence
    ));
    builder.push(Field::new(
        columns::MODIFICATIONS,
        DataType::List(list_item_field(DataType::Utf8)),
        true,
    ));
    builder.push(field_with_cv(
        columns::PRECURSOR_CHARGE,
        DataType::Int16,
        false,
        "MS:1000041", // charge state
    ));
    builder.push(Field::new(columns::CALCULATED_MZ, DataType::Float64, true));
    builder.push(field_with_cv(
        columns::OBSERVED_MZ,
        DataType::Float64,
        true,
        "MS:1000744", // selected ion m/z
    ));
    builder.push(field_with_cv(
        columns::RT,
        DataType::Float32,
        true,
        "MS:1000016", // scan start time
    ));

    // Scoring
    builder.push(Field::new(columns::RANK, DataType::Int32, false));
    builder.push(Field::new(columns::SCORE, DataType::Float64, true));
    builder.push(Field::new(columns::SCORE_TYPE, DataType::Utf8, true));
    builder.push(field_with_cv(
        columns::Q_VALUE,
        DataType::Float64,
        true,
        "MS:1002354", // PSM-level q-value
    ));
    builder.push(field_with_cv(
        columns::POSTERIOR_ERROR_PROBABILITY,
        DataType::Float64,
        true,
        "MS:1001493", // posterior error probability
    ));
    builder.push(field_with_cv(
        columns::IS_DECOY,
        DataType::Boolean,
        true,
        "MS:1002217", // decoy peptide
    ));
    builder.push(field_with_cv(
        columns::PROTEIN_ACCESSIONS,
        DataType::List(list_item_field(DataType::Utf8)),
        true,
        "MS:1000885", // protein accession
    ));

    // Spectrum reference
    builder.push(Field::new(
        columns::REFERENCE_FILE_NAME,
        DataType::Utf8,
        false,
    ));
    builder.push(field_with_cv(
        columns::SCAN,
        DataType::Utf8,
        true,
        "MS:1000767", // native spectrum identifier
    ));
    builder.push(Field::new(columns::SCAN_NUMBER, DataType::Int64, true));

    // Spectral enrichment
    builder.push(Field::new(columns::NUMBER_PEAKS, DataType::Int32, true));
    builder.push(field_with_cv(
        columns::MZ_ARRAY,
        DataType::List(list_item_field(DataType::Float64)),
        true,
        "MS:1000514", // m/z array
    ));
    builder.push(field_with_cv(
        columns::INTENSITY_ARRAY,
        DataType::List(list_item_field(DataType::Float32)),
        true,
        "MS:1000515", // intensity array
    ));

    let mut schema = builder.finish();
    schema
        .metadata
        .insert(KEY_FORMAT_VERSION.to_string(), PSM_FORMAT_VERSION.to_string());
    schema
}

/// Creates the PSM schema wrapped in an Arc for sharing
pub fn create_psm_schema_arc() -> Arc<Schema> {
    Arc::new(create_psm_schema())
}
