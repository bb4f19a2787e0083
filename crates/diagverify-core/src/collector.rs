//! Shared handle for feeding a verifier from a listener thread.

use crate::result::{VerificationOutcome, VerificationResult};
use crate::types::DiagnosticEvent;
use crate::verifier::DiagnosticVerifier;
use std::sync::{Arc, Mutex, MutexGuard};

/// Collector for live diagnostic events.
///
/// NOTE: This is thread-safe and can be cloned into a platform callback while
/// another thread calls [`EventCollector::verify`]. Appends are serialized by
/// the inner lock.
#[derive(Debug, Clone)]
pub struct EventCollector {
    inner: Arc<Mutex<DiagnosticVerifier>>,
}

impl EventCollector {
    pub fn new(verifier: DiagnosticVerifier) -> Self {
        Self {
            inner: Arc::new(Mutex::new(verifier)),
        }
    }

    // Appends are a single push; a poisoned lock still holds a consistent list.
    fn lock(&self) -> MutexGuard<'_, DiagnosticVerifier> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn receive_event(&self, event: DiagnosticEvent) {
        self.lock().receive_event(event);
    }

    pub fn received_count(&self) -> usize {
        self.lock().received_count()
    }

    pub fn verify(&self) -> [VerificationResult; 3] {
        self.lock().verify()
    }

    pub fn verify_detailed(&self) -> VerificationOutcome {
        self.lock().verify_detailed()
    }

    /// Take the verifier back. If other clones are still alive they keep the
    /// shared verifier and the caller gets a snapshot of its current state.
    pub fn finish(self) -> DiagnosticVerifier {
        Arc::try_unwrap(self.inner)
            .map(|m| m.into_inner().unwrap_or_else(|e| e.into_inner()))
            .unwrap_or_else(|a| a.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }
}

impl From<DiagnosticVerifier> for EventCollector {
    fn from(verifier: DiagnosticVerifier) -> Self {
        Self::new(verifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let collector = EventCollector::new(DiagnosticVerifier::new(None));
        let listener = collector.clone();
        listener.receive_event(DiagnosticEvent::live());
        assert_eq!(collector.received_count(), 1);
        assert!(!collector.verify()[2].success);
    }

    #[test]
    fn finish_with_outstanding_clone() {
        let collector = EventCollector::new(DiagnosticVerifier::new(None));
        let other = collector.clone();
        other.receive_event(DiagnosticEvent::freeze());
        let verifier = collector.finish();
        assert_eq!(verifier.received_count(), 1);
        other.receive_event(DiagnosticEvent::freeze());
        assert_eq!(verifier.received_count(), 1);
    }
}
