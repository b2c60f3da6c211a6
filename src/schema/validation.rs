use arrow::datatypes::{DataType, Schema};

use super::columns;

/// Validates that a schema is compatible with the PSM format.
///
/// Returns `Ok(())` if the schema contains all required columns with correct types,
/// or an error describing the incompatibility.
pub fn validate_schema(schema: &Schema) -> Result<(), SchemaValidationError> {
    let required_columns = [
        (columns::SEQUENCE, DataType::Utf8),
        (columns::PEPTIDOFORM, DataType::Utf8),
        (columns::PRECURSOR_CHARGE, DataType::Int16),
        (columns::RANK, DataType::Int32),
        (columns::REFERENCE_FILE_NAME, DataType::Utf8),
    ];

    for (name, expected_type) in required_columns {
        match schema.field_with_name(name) {
            Ok(field) => {
                if field.data_type() != &expected_type {
                    return Err(SchemaValidationError::TypeMismatch {
                        column: name.to_string(),
                        expected: format!("{:?}", expected_type),
                        found: format!("{:?}", field.data_type()),
                    });
                }
            }
            Err(_) => {
                return Err(SchemaValidationError::MissingColumn(name.to_string()));
            }
        }
    }

    Ok(())
}

/// Compares the fields of two schemas, ignoring schema and field metadata.
///
/// Returns a description of the first difference, or `None` when names, types
/// and nullability agree column by column.
pub fn schema_difference(expected: &Schema, found: &Schema) -> Option<String> {
    if expected.fields().len() != found.fields().len() {
        return Some(format!(
            "expected {} columns, found {}",
            expected.fields().len(),
            found.fields().len()
        ));
    }

    for (want, got) in expected.fields().iter().zip(found.fields().iter()) {
        if want.name() != got.name() {
            return Some(format!(
                "expected column '{}', found '{}'",
                want.name(),
                got.name()
            ));
        }
        if want.data_type() != got.data_type() {
            return Some(format!(
                "column '{}': expected {:?}, found {:?}",
                want.name(),
                want.data_type(),
                got.data_type()
            ));
        }
        if want.is_nullable() != got.is_nullable() {
            return Some(format!(
                "column '{}': nullability differs",
                want.name()
            ));
        }
    }

    None
}

/// Errors that can occur during schema validation
#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    /// A required column is missing from the schema
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A column has an incorrect data type
    #[error("Type mismatch for column '{column}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Name of the column with the type mismatch
        column: String,
        /// Expected data type
        expected: String,
        /// Actual data type found
        found: String,
    },
}
