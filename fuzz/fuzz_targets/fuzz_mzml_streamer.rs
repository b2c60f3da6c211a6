#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

use idxml_psm::mzml::MzMLStreamer;

fuzz_target!(|data: &[u8]| {
    // Malformed input must surface as an error, never a panic
    let mut streamer = MzMLStreamer::new(Cursor::new(data));
    if streamer.read_metadata().is_err() {
        return;
    }

    for _ in 0..100 {
        match streamer.next_spectrum() {
            Ok(Some(_spectrum)) => {}
            Ok(None) | Err(_) => break,
        }
    }
});
