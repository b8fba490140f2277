//! Fuzz target for annotation XML parsing.
//!
//! This fuzzer feeds arbitrary byte sequences to the diagram XML parser,
//! checking for panics, crashes, or hangs.

#![no_main]

use diagcat::model::io_xml::from_diagram_xml_slice;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid excessive memory usage.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_diagram_xml_slice(data);
});
