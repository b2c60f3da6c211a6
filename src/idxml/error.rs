/// Errors that can occur during idXML parsing
#[derive(Debug, thiserror::Error)]
pub enum IdXmlError {
    /// Error parsing XML
    #[error("XML parsing error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid idXML document structure
    #[error("Invalid idXML structure: {0}")]
    InvalidStructure(String),

    /// Required XML attribute is missing
    #[error("Missing required attribute: {0}")]
    MissingAttribute(String),

    /// Invalid value for an XML attribute
    #[error("Invalid attribute value: {0}")]
    InvalidAttributeValue(String),

    /// UTF-8 encoding error in text content
    #[error("UTF-8 encoding error: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),
}
