#![no_main]

use diagverify_core::{events_from_json, DiagnosticEvent};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let _ = events_from_json(text);
    if let Ok(event) = DiagnosticEvent::from_json(text) {
        // Out-of-range floats saturate to infinity, which JSON cannot carry.
        if !event.float_values.values().all(|v| v.is_finite()) {
            return;
        }
        let encoded = event.to_json().expect("encode accepted frame");
        let decoded = DiagnosticEvent::from_json(&encoded).expect("decode re-encoded frame");
        assert_eq!(event, decoded);
    }
});
