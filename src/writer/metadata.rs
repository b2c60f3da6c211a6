use std::collections::HashMap;

use chrono::Utc;
use serde::Serialize;

use crate::psm::TableProvenance;
use crate::schema::{
    KEY_CONVERTER_INFO, KEY_CREATED_AT, KEY_FORMAT_VERSION, KEY_SEARCH_ENGINE, KEY_SOURCE_FILE,
    KEY_SPECTRAL_FILE, PSM_FORMAT_VERSION,
};

use super::error::WriterError;

/// Converter software info stored under `psm:converter_info`
#[derive(Debug, Clone, Serialize)]
struct ConverterInfo {
    name: &'static str,
    version: &'static str,
}

/// Footer keys common to every file this crate writes
pub fn base_footer_metadata() -> Result<HashMap<String, String>, WriterError> {
    let converter = ConverterInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    };

    let mut metadata = HashMap::new();
    metadata.insert(
        KEY_FORMAT_VERSION.to_string(),
        PSM_FORMAT_VERSION.to_string(),
    );
    metadata.insert(KEY_CREATED_AT.to_string(), Utc::now().to_rfc3339());
    metadata.insert(
        KEY_CONVERTER_INFO.to_string(),
        serde_json::to_string(&converter)?,
    );
    Ok(metadata)
}

/// Footer key-value metadata for a single converted table
pub fn footer_metadata(
    provenance: &TableProvenance,
) -> Result<HashMap<String, String>, WriterError> {
    let mut metadata = base_footer_metadata()?;
    metadata.insert(
        KEY_SOURCE_FILE.to_string(),
        provenance.source_file.clone(),
    );
    if let Some(spectral) = &provenance.spectral_file {
        metadata.insert(KEY_SPECTRAL_FILE.to_string(), spectral.clone());
    }
    if let Some(engine) = &provenance.search_engine {
        metadata.insert(KEY_SEARCH_ENGINE.to_string(), engine.clone());
    }
    Ok(metadata)
}
