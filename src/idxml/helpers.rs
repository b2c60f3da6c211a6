use quick_xml::events::BytesStart;

use super::IdXmlError;

/// Get an attribute value by name, unescaping XML entities
pub(super) fn get_attribute(e: &BytesStart, name: &str) -> Result<Option<String>, IdXmlError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| IdXmlError::XmlError(quick_xml::Error::from(e)))?;
        if attr.key.as_ref() == name.as_bytes() {
            let raw = std::str::from_utf8(&attr.value)?;
            let value = quick_xml::escape::unescape(raw).map_err(quick_xml::Error::from)?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Get an attribute that must be present
pub(super) fn required_attribute(
    e: &BytesStart,
    element: &str,
    name: &str,
) -> Result<String, IdXmlError> {
    get_attribute(e, name)?
        .ok_or_else(|| IdXmlError::MissingAttribute(format!("{}/@{}", element, name)))
}

/// Parse an optional floating point attribute; empty values count as absent
pub(super) fn optional_f64(e: &BytesStart, name: &str) -> Result<Option<f64>, IdXmlError> {
    match get_attribute(e, name)? {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| IdXmlError::InvalidAttributeValue(format!("{}=\"{}\"", name, value))),
        _ => Ok(None),
    }
}

/// Parse an optional boolean attribute (`true`/`1`)
pub(super) fn optional_bool(e: &BytesStart, name: &str) -> Result<bool, IdXmlError> {
    Ok(matches!(
        get_attribute(e, name)?.as_deref().map(str::trim),
        Some("true") | Some("1")
    ))
}
