//! # idXML Parser Module
//!
//! Pull parsing of OpenMS idXML identification files into an in-memory
//! [`IdXmlDocument`]. idXML files hold search results for a single run and
//! comfortably fit in memory, unlike the spectra they refer to.
//!
//! ## idXML Structure
//!
//! ```text
//! IdXML
//! ├── SearchParameters*
//! │   ├── FixedModification*
//! │   ├── VariableModification*
//! │   └── UserParam*
//! └── IdentificationRun*
//!     ├── ProteinIdentification
//!     │   ├── ProteinHit*
//!     │   │   └── UserParam*
//!     │   └── UserParam* (spectra_data, ...)
//!     └── PeptideIdentification* (one per spectrum)
//!         ├── PeptideHit* (rank order)
//!         │   └── UserParam* (target_decoy, q-value, PEP, ...)
//!         └── UserParam*
//! ```
//!
//! `UserParam` elements are attached to the innermost enclosing element the
//! model keeps; elements the model does not know are skipped.

mod error;
mod helpers;
mod models;
mod reader;

#[cfg(test)]
mod tests;

pub use error::IdXmlError;
pub use models::*;
pub use reader::{IdXmlReader, DEFAULT_INPUT_BUFFER_SIZE};
