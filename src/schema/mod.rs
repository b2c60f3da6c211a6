//! # PSM Schema Definition
//!
//! This module defines the Apache Arrow schema shared by every PSM Parquet file
//! this crate writes, both the per-file intermediates and the merged output.
//!
//! ## Schema Columns
//!
//! | Column | Type | Description | CV Term |
//! |--------|------|-------------|---------|
//! | sequence | Utf8 | Unmodified sequence | MS:1000888 |
//! | peptidoform | Utf8 | Modified sequence as written in idXML | MS:1000889 |
//! | modifications | List<Utf8> (nullable) | `{position}-{name}` entries | |
//! | precursor_charge | Int16 | Charge state | MS:1000041 |
//! | calculated_mz | Float64 (nullable) | Theoretical m/z | |
//! | observed_mz | Float64 (nullable) | Precursor m/z | MS:1000744 |
//! | rt | Float32 (nullable) | Retention time in seconds | MS:1000016 |
//! | rank | Int32 | 1-based hit rank | |
//! | score | Float64 (nullable) | Main search engine score | |
//! | score_type | Utf8 (nullable) | Main score name | |
//! | q_value | Float64 (nullable) | q-value | MS:1002354 |
//! | posterior_error_probability | Float64 (nullable) | PEP | MS:1001493 |
//! | is_decoy | Boolean (nullable) | Decoy flag | MS:1002217 |
//! | protein_accessions | List<Utf8> (nullable) | Protein accessions | MS:1000885 |
//! | reference_file_name | Utf8 | Raw file stem | |
//! | scan | Utf8 (nullable) | Native spectrum id | MS:1000767 |
//! | scan_number | Int64 (nullable) | Scan number | |
//! | number_peaks | Int32 (nullable) | Peaks in matched spectrum | |
//! | mz_array | List<Float64> (nullable) | Spectrum m/z values | MS:1000514 |
//! | intensity_array | List<Float32> (nullable) | Spectrum intensities | MS:1000515 |

mod builders;
/// PSM column name constants.
pub mod columns;
mod constants;
mod validation;


pub use builders::{create_psm_schema, create_psm_schema_arc, list_item_field};
pub use columns::*;
pub use constants::*;
pub use validation::{schema_difference, validate_schema, SchemaValidationError};
