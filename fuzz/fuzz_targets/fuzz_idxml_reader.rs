#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;
use std::path::Path;

use idxml_psm::idxml::IdXmlReader;
use idxml_psm::psm::table_from_document;

fuzz_target!(|data: &[u8]| {
    if let Ok(document) = IdXmlReader::new(Cursor::new(data)).read_document() {
        // Peptidoform parsing and mass calculation run on every hit
        let _ = table_from_document(&document, Path::new("fuzz.idXML"));
    }
});
