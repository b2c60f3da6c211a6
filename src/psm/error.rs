use crate::idxml::IdXmlError;
use crate::mzml::MzMLError;

/// Errors that can occur while building a PSM table
#[derive(Debug, thiserror::Error)]
pub enum PsmError {
    /// The identification file could not be parsed
    #[error("idXML parsing error: {0}")]
    IdXml(#[from] IdXmlError),

    /// The spectral file could not be read
    #[error("mzML read error: {0}")]
    Spectral(#[from] MzMLError),
}
