use quick_xml::events::BytesStart;

use super::MzMLError;
use crate::mzml::cv_params::CvParam;

/// Get an attribute value by name
pub(super) fn get_attribute(e: &BytesStart, name: &str) -> Result<Option<String>, MzMLError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| MzMLError::XmlError(quick_xml::Error::from(e)))?;
        if attr.key.as_ref() == name.as_bytes() {
            let value = std::str::from_utf8(&attr.value)?.to_string();
            return Ok(Some(value));
        }
    }
    Ok(None)
}

/// Parse a cvParam element
pub(super) fn parse_cv_param(e: &BytesStart) -> Result<CvParam, MzMLError> {
    Ok(CvParam {
        accession: get_attribute(e, "accession")?.unwrap_or_default(),
        name: get_attribute(e, "name")?.unwrap_or_default(),
        value: get_attribute(e, "value")?,
        unit_accession: get_attribute(e, "unitAccession")?,
    })
}
