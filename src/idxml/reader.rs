//! Pull parser for idXML documents using quick-xml

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::helpers::{get_attribute, optional_bool, optional_f64, required_attribute};
use super::models::{
    IdXmlDocument, IdentificationRun, PeptideHit, PeptideIdentification, ProteinHit,
    ProteinIdentification, SearchParameters, UserParam, UserParams,
};
use super::IdXmlError;

/// Default input buffer size (64 KB)
pub const DEFAULT_INPUT_BUFFER_SIZE: usize = 64 * 1024;

/// Element currently open, used to route `<UserParam>` children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Element {
    Root,
    SearchParameters,
    Run,
    ProteinIdentification,
    ProteinHit,
    PeptideIdentification,
    PeptideHit,
    Other,
}

/// Reader for idXML files
pub struct IdXmlReader<R: BufRead> {
    reader: Reader<R>,
}

impl IdXmlReader<BufReader<File>> {
    /// Open an idXML file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, IdXmlError> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::with_capacity(
            DEFAULT_INPUT_BUFFER_SIZE,
            file,
        )))
    }
}

impl<R: BufRead> IdXmlReader<R> {
    /// Create a new reader from a BufRead source
    pub fn new(reader: R) -> Self {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);
        Self { reader: xml_reader }
    }

    /// Read the whole document
    pub fn read_document(mut self) -> Result<IdXmlDocument, IdXmlError> {
        let mut document = IdXmlDocument::default();
        let mut stack: Vec<Element> = Vec::new();
        let mut root_closed = false;
        let mut buf = Vec::new();

        loop {
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let element = open_element(&mut document, &stack, e)?;
                    stack.push(element);
                }
                Ok(Event::Empty(ref e)) => {
                    open_element(&mut document, &stack, e)?;
                }
                Ok(Event::End(_)) => {
                    if stack.pop() == Some(Element::Root) {
                        root_closed = true;
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(IdXmlError::XmlError(e)),
                _ => {}
            }
            buf.clear();
        }

        if !root_closed {
            return Err(IdXmlError::InvalidStructure(if stack.is_empty() {
                "missing <IdXML> root element".to_string()
            } else {
                "unexpected end of file inside <IdXML>".to_string()
            }));
        }

        Ok(document)
    }
}

/// Handle a start or empty element, returning its kind
fn open_element(
    document: &mut IdXmlDocument,
    stack: &[Element],
    e: &BytesStart,
) -> Result<Element, IdXmlError> {
    let parent = stack.last().copied();

    if parent.is_none() {
        return if e.name().as_ref() == b"IdXML" {
            document.version = get_attribute(e, "version")?;
            Ok(Element::Root)
        } else {
            Err(IdXmlError::InvalidStructure(format!(
                "expected <IdXML> root element, found <{}>",
                String::from_utf8_lossy(e.name().as_ref())
            )))
        };
    }

    match e.name().as_ref() {
        b"SearchParameters" => {
            document.search_parameters.push(SearchParameters {
                id: get_attribute(e, "id")?.unwrap_or_default(),
                db: get_attribute(e, "db")?,
                enzyme: get_attribute(e, "enzyme")?,
                mass_type: get_attribute(e, "mass_type")?,
                charges: get_attribute(e, "charges")?,
                ..Default::default()
            });
            Ok(Element::SearchParameters)
        }
        b"FixedModification" | b"VariableModification" => {
            let fixed = e.name().as_ref() == b"FixedModification";
            let name = required_attribute(e, "Modification", "name")?;
            if let Some(params) = document.search_parameters.last_mut() {
                if fixed {
                    params.fixed_modifications.push(name);
                } else {
                    params.variable_modifications.push(name);
                }
            }
            Ok(Element::Other)
        }
        b"IdentificationRun" => {
            document.runs.push(IdentificationRun {
                search_engine: get_attribute(e, "search_engine")?,
                search_engine_version: get_attribute(e, "search_engine_version")?,
                date: get_attribute(e, "date")?,
                search_parameters_ref: get_attribute(e, "search_parameters_ref")?,
                ..Default::default()
            });
            Ok(Element::Run)
        }
        b"ProteinIdentification" => {
            current_run(document, "ProteinIdentification")?.protein_identification =
                Some(ProteinIdentification {
                    score_type: get_attribute(e, "score_type")?,
                    higher_score_better: optional_bool(e, "higher_score_better")?,
                    ..Default::default()
                });
            Ok(Element::ProteinIdentification)
        }
        b"ProteinHit" => {
            let hit = ProteinHit {
                id: get_attribute(e, "id")?.unwrap_or_default(),
                accession: required_attribute(e, "ProteinHit", "accession")?,
                score: optional_f64(e, "score")?,
                user_params: UserParams::default(),
            };
            current_run(document, "ProteinHit")?
                .protein_identification
                .as_mut()
                .ok_or_else(|| {
                    IdXmlError::InvalidStructure(
                        "<ProteinHit> outside <ProteinIdentification>".to_string(),
                    )
                })?
                .hits
                .push(hit);
            Ok(Element::ProteinHit)
        }
        b"PeptideIdentification" => {
            let identification = PeptideIdentification {
                score_type: get_attribute(e, "score_type")?,
                higher_score_better: optional_bool(e, "higher_score_better")?,
                mz: optional_f64(e, "MZ")?,
                rt: optional_f64(e, "RT")?,
                spectrum_reference: get_attribute(e, "spectrum_reference")?,
                ..Default::default()
            };
            current_run(document, "PeptideIdentification")?
                .peptide_identifications
                .push(identification);
            Ok(Element::PeptideIdentification)
        }
        b"PeptideHit" => {
            let hit = parse_peptide_hit(e)?;
            current_run(document, "PeptideHit")?
                .peptide_identifications
                .last_mut()
                .ok_or_else(|| {
                    IdXmlError::InvalidStructure(
                        "<PeptideHit> outside <PeptideIdentification>".to_string(),
                    )
                })?
                .hits
                .push(hit);
            Ok(Element::PeptideHit)
        }
        b"UserParam" => {
            let param = UserParam {
                value_type: get_attribute(e, "type")?,
                name: required_attribute(e, "UserParam", "name")?,
                value: get_attribute(e, "value")?.unwrap_or_default(),
            };
            if let Some(params) = user_params_for(document, parent) {
                params.push(param);
            }
            Ok(Element::Other)
        }
        _ => Ok(Element::Other),
    }
}

fn parse_peptide_hit(e: &BytesStart) -> Result<PeptideHit, IdXmlError> {
    let sequence = required_attribute(e, "PeptideHit", "sequence")?;
    let charge_text = required_attribute(e, "PeptideHit", "charge")?;
    let charge = charge_text.trim().parse::<i16>().map_err(|_| {
        IdXmlError::InvalidAttributeValue(format!("charge=\"{}\"", charge_text))
    })?;

    Ok(PeptideHit {
        score: optional_f64(e, "score")?,
        sequence,
        charge,
        aa_before: get_attribute(e, "aa_before")?,
        aa_after: get_attribute(e, "aa_after")?,
        protein_refs: get_attribute(e, "protein_refs")?
            .map(|refs| refs.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default(),
        user_params: UserParams::default(),
    })
}

fn current_run<'a>(
    document: &'a mut IdXmlDocument,
    element: &str,
) -> Result<&'a mut IdentificationRun, IdXmlError> {
    document.runs.last_mut().ok_or_else(|| {
        IdXmlError::InvalidStructure(format!("<{}> outside <IdentificationRun>", element))
    })
}

/// The parameter list a `<UserParam>` inside `parent` belongs to
fn user_params_for(
    document: &mut IdXmlDocument,
    parent: Option<Element>,
) -> Option<&mut UserParams> {
    match parent? {
        Element::SearchParameters => document
            .search_parameters
            .last_mut()
            .map(|p| &mut p.user_params),
        Element::ProteinIdentification => document
            .runs
            .last_mut()?
            .protein_identification
            .as_mut()
            .map(|p| &mut p.user_params),
        Element::ProteinHit => document
            .runs
            .last_mut()?
            .protein_identification
            .as_mut()?
            .hits
            .last_mut()
            .map(|h| &mut h.user_params),
        Element::PeptideIdentification => document
            .runs
            .last_mut()?
            .peptide_identifications
            .last_mut()
            .map(|p| &mut p.user_params),
        Element::PeptideHit => document
            .runs
            .last_mut()?
            .peptide_identifications
            .last_mut()?
            .hits
            .last_mut()
            .map(|h| &mut h.user_params),
        Element::Root | Element::Run | Element::Other => None,
    }
}
