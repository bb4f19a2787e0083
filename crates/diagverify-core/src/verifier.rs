//! Truth-versus-received verification of diagnostic event sequences.

use crate::align::{align, EditOp};
use crate::canonical::{canonicalize, CanonicalEvent};
use crate::config::VerifierConfig;
use crate::result::{Discrepancy, VerificationOutcome, VerificationResult};
use crate::types::DiagnosticEvent;

/// Compares a fixed truth sequence against events received during a session.
///
/// Both sequences are held in canonical form. The truth sequence is fixed at
/// construction; received events are appended in arrival order. Create one
/// verifier per session.
#[derive(Debug, Clone)]
pub struct DiagnosticVerifier {
    config: VerifierConfig,
    truth: Vec<CanonicalEvent>,
    received: Vec<CanonicalEvent>,
}

impl DiagnosticVerifier {
    /// Build a verifier over `truth`. `None` is treated as an empty sequence.
    pub fn new(truth: Option<Vec<DiagnosticEvent>>) -> Self {
        Self::with_config(truth, VerifierConfig::default())
    }

    pub fn with_config(truth: Option<Vec<DiagnosticEvent>>, config: VerifierConfig) -> Self {
        let truth: Vec<CanonicalEvent> = truth
            .unwrap_or_default()
            .into_iter()
            .map(|ev| prepare(&config, ev))
            .collect();
        tracing::debug!(
            truth = truth.len(),
            strip_vendor_sensors = config.strip_vendor_sensors,
            "diagnostic verifier created"
        );
        Self {
            config,
            truth,
            received: Vec::new(),
        }
    }

    /// Canonicalize `event` and append it to the received sequence.
    pub fn receive_event(&mut self, event: DiagnosticEvent) {
        let event = prepare(&self.config, event);
        tracing::trace!(index = self.received.len(), "diagnostic event received");
        self.received.push(event);
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    pub fn truth_events(&self) -> &[CanonicalEvent] {
        &self.truth
    }

    pub fn received_events(&self) -> &[CanonicalEvent] {
        &self.received
    }

    pub fn received_count(&self) -> usize {
        self.received.len()
    }

    /// Align truth against everything received so far and classify each difference.
    ///
    /// Recomputed from scratch on every call.
    pub fn verify_detailed(&self) -> VerificationOutcome {
        let script = align(&self.truth, &self.received, |t, r| t == r);

        let mut discrepancies = Vec::with_capacity(script.cost());
        let (mut i, mut j) = (0usize, 0usize);
        for op in script.chronological() {
            match op {
                EditOp::Modify => discrepancies.push(Discrepancy::Mismatched {
                    truth_index: i,
                    expected: self.truth[i].clone(),
                    actual: self.received[j].clone(),
                }),
                EditOp::Delete => discrepancies.push(Discrepancy::Missing {
                    truth_index: i,
                    event: self.truth[i].clone(),
                }),
                EditOp::Add => discrepancies.push(Discrepancy::Extra {
                    received_index: j,
                    event: self.received[j].clone(),
                }),
                EditOp::Keep => {}
            }
            let (di, dj) = op.consumes();
            i += di;
            j += dj;
        }

        let counts = script.counts();
        tracing::debug!(
            truth = self.truth.len(),
            received = self.received.len(),
            cost = script.cost(),
            mismatched = counts.modify,
            missing = counts.delete,
            extra = counts.add,
            "diagnostic verification complete"
        );

        VerificationOutcome {
            truth_count: self.truth.len(),
            received_count: self.received.len(),
            cost: script.cost(),
            discrepancies,
        }
    }

    /// The three named results: mismatched, missing, extra.
    pub fn verify(&self) -> [VerificationResult; 3] {
        self.verify_detailed().results()
    }
}

fn prepare(config: &VerifierConfig, event: DiagnosticEvent) -> CanonicalEvent {
    if config.strip_vendor_sensors {
        canonicalize(event.without_vendor_sensors(config.vendor_bounds))
    } else {
        canonicalize(event)
    }
}
