//! Tracing contract: a verify pass emits one structured summary event.

use diagverify_core::{DiagnosticEvent, DiagnosticVerifier};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone)]
struct MockWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl std::io::Write for MockWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for MockWriter {
    type Writer = MockWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn setup_capture() -> (MockWriter, tracing::subscriber::DefaultGuard) {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let writer = MockWriter { buf: buf.clone() };

    let subscriber = tracing_subscriber::fmt()
        .with_writer(writer.clone())
        .with_max_level(tracing::Level::DEBUG)
        .json()
        .finish();

    (writer, tracing::subscriber::set_default(subscriber))
}

fn summary_fields(output: &str) -> Option<serde_json::Value> {
    output
        .lines()
        .filter_map(|l| serde_json::from_str::<serde_json::Value>(l.trim()).ok())
        .filter_map(|v| v.get("fields").cloned())
        .find(|f| f["message"] == "diagnostic verification complete")
}

#[test]
fn test_verify_emits_summary_counts() {
    let (writer, _guard) = setup_capture();

    let truth = vec![
        DiagnosticEvent::live().with_int_value(7, 1),
        DiagnosticEvent::live().with_int_value(7, 2),
    ];
    let mut verifier = DiagnosticVerifier::new(Some(truth));
    verifier.receive_event(DiagnosticEvent::live().with_int_value(7, 1));
    verifier.receive_event(DiagnosticEvent::live().with_int_value(7, 3));
    verifier.receive_event(DiagnosticEvent::freeze());
    let _ = verifier.verify();

    let output = String::from_utf8(writer.buf.lock().unwrap().clone()).unwrap();
    let fields = summary_fields(&output).expect("summary event missing");
    assert_eq!(fields["truth"], 2);
    assert_eq!(fields["received"], 3);
    assert_eq!(fields["cost"], 2);
    assert_eq!(fields["mismatched"], 1);
    assert_eq!(fields["missing"], 0);
    assert_eq!(fields["extra"], 1);
}

#[test]
fn test_trace_level_events_filtered_at_debug() {
    let (writer, _guard) = setup_capture();

    let mut verifier = DiagnosticVerifier::new(None);
    verifier.receive_event(DiagnosticEvent::live());

    let output = String::from_utf8(writer.buf.lock().unwrap().clone()).unwrap();
    assert!(output.contains("diagnostic verifier created"));
    assert!(!output.contains("diagnostic event received"));
}
