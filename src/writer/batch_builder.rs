use std::sync::Arc;

use arrow::array::{
    ArrayRef, BooleanBuilder, Float32Builder, Float64Builder, Int16Builder, Int32Builder,
    Int64Builder, ListBuilder, StringBuilder,
};
use arrow::datatypes::{DataType, SchemaRef};
use arrow::record_batch::RecordBatch;

use crate::psm::PsmRecord;
use crate::schema::list_item_field;

use super::error::WriterError;

/// Column builders for one record batch, in schema order
struct PsmColumnBuilders {
    sequence: StringBuilder,
    peptidoform: StringBuilder,
    modifications: ListBuilder<StringBuilder>,
    precursor_charge: Int16Builder,
    calculated_mz: Float64Builder,
    observed_mz: Float64Builder,
    rt: Float32Builder,
    rank: Int32Builder,
    score: Float64Builder,
    score_type: StringBuilder,
    q_value: Float64Builder,
    posterior_error_probability: Float64Builder,
    is_decoy: BooleanBuilder,
    protein_accessions: ListBuilder<StringBuilder>,
    reference_file_name: StringBuilder,
    scan: StringBuilder,
    scan_number: Int64Builder,
    number_peaks: Int32Builder,
    mz_array: ListBuilder<Float64Builder>,
    intensity_array: ListBuilder<Float32Builder>,
}

impl PsmColumnBuilders {
    fn with_capacity(rows: usize) -> Self {
        let string_list = || {
            ListBuilder::with_capacity(StringBuilder::new(), rows)
                .with_field(list_item_field(DataType::Utf8))
        };

        Self {
            sequence: StringBuilder::with_capacity(rows, rows * 16),
            peptidoform: StringBuilder::with_capacity(rows, rows * 24),
            modifications: string_list(),
            precursor_charge: Int16Builder::with_capacity(rows),
            calculated_mz: Float64Builder::with_capacity(rows),
            observed_mz: Float64Builder::with_capacity(rows),
            rt: Float32Builder::with_capacity(rows),
            rank: Int32Builder::with_capacity(rows),
            score: Float64Builder::with_capacity(rows),
            score_type: StringBuilder::new(),
            q_value: Float64Builder::with_capacity(rows),
            posterior_error_probability: Float64Builder::with_capacity(rows),
            is_decoy: BooleanBuilder::with_capacity(rows),
            protein_accessions: string_list(),
            reference_file_name: StringBuilder::new(),
            scan: StringBuilder::new(),
            scan_number: Int64Builder::with_capacity(rows),
            number_peaks: Int32Builder::with_capacity(rows),
            mz_array: ListBuilder::with_capacity(Float64Builder::new(), rows)
                .with_field(list_item_field(DataType::Float64)),
            intensity_array: ListBuilder::with_capacity(Float32Builder::new(), rows)
                .with_field(list_item_field(DataType::Float32)),
        }
    }

    fn append(&mut self, record: &PsmRecord) -> Result<(), WriterError> {
        self.sequence.append_value(&record.sequence);
        self.peptidoform.append_value(&record.peptidoform);
        append_strings(&mut self.modifications, &record.modifications);
        self.precursor_charge.append_value(record.precursor_charge);
        self.calculated_mz.append_option(record.calculated_mz);
        self.observed_mz.append_option(record.observed_mz);
        self.rt.append_option(record.rt);
        self.rank.append_value(record.rank);
        self.score.append_option(record.score);
        self.score_type.append_option(record.score_type.as_deref());
        self.q_value.append_option(record.q_value);
        self.posterior_error_probability
            .append_option(record.posterior_error_probability);
        self.is_decoy.append_option(record.is_decoy);
        append_strings(&mut self.protein_accessions, &record.protein_accessions);
        self.reference_file_name
            .append_value(&record.reference_file_name);
        self.scan.append_option(record.scan.as_deref());
        self.scan_number.append_option(record.scan_number);

        match &record.spectrum {
            Some(peaks) => {
                if peaks.mz.len() != peaks.intensity.len() {
                    return Err(WriterError::InvalidData(format!(
                        "scan {:?}: {} m/z values but {} intensities",
                        record.scan,
                        peaks.mz.len(),
                        peaks.intensity.len()
                    )));
                }
                let count = i32::try_from(peaks.len()).map_err(|_| {
                    WriterError::InvalidData(format!("too many peaks: {}", peaks.len()))
                })?;
                self.number_peaks.append_value(count);
                self.mz_array.values().append_slice(&peaks.mz);
                self.mz_array.append(true);
                self.intensity_array.values().append_slice(&peaks.intensity);
                self.intensity_array.append(true);
            }
            None => {
                self.number_peaks.append_null();
                self.mz_array.append_null();
                self.intensity_array.append_null();
            }
        }

        Ok(())
    }

    fn finish(mut self) -> Vec<ArrayRef> {
        vec![
            Arc::new(self.sequence.finish()),
            Arc::new(self.peptidoform.finish()),
            Arc::new(self.modifications.finish()),
            Arc::new(self.precursor_charge.finish()),
            Arc::new(self.calculated_mz.finish()),
            Arc::new(self.observed_mz.finish()),
            Arc::new(self.rt.finish()),
            Arc::new(self.rank.finish()),
            Arc::new(self.score.finish()),
            Arc::new(self.score_type.finish()),
            Arc::new(self.q_value.finish()),
            Arc::new(self.posterior_error_probability.finish()),
            Arc::new(self.is_decoy.finish()),
            Arc::new(self.protein_accessions.finish()),
            Arc::new(self.reference_file_name.finish()),
            Arc::new(self.scan.finish()),
            Arc::new(self.scan_number.finish()),
            Arc::new(self.number_peaks.finish()),
            Arc::new(self.mz_array.finish()),
            Arc::new(self.intensity_array.finish()),
        ]
    }
}

/// Empty lists are stored as null
fn append_strings(builder: &mut ListBuilder<StringBuilder>, values: &[String]) {
    if values.is_empty() {
        builder.append_null();
        return;
    }
    for value in values {
        builder.values().append_value(value);
    }
    builder.append(true);
}

/// Build a record batch of PSM rows against `schema`
pub fn build_record_batch(
    schema: &SchemaRef,
    records: &[PsmRecord],
) -> Result<RecordBatch, WriterError> {
    let mut builders = PsmColumnBuilders::with_capacity(records.len());
    for record in records {
        builders.append(record)?;
    }
    Ok(RecordBatch::try_new(schema.clone(), builders.finish())?)
}
