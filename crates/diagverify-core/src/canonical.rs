//! Event canonicalization.
//!
//! Truth data and live captures legitimately differ in capture time and in
//! how "no trouble code" is encoded (`None` vs `Some("")`). Canonical form
//! erases both so comparison reduces to content.

use crate::types::DiagnosticEvent;
use serde::Serialize;
use std::fmt;
use std::ops::Deref;

/// Timestamp carried by every canonical event.
pub const CANONICAL_TIMESTAMP: i64 = 0;

/// A [`DiagnosticEvent`] in canonical form. Only [`canonicalize`] builds one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CanonicalEvent(DiagnosticEvent);

impl CanonicalEvent {
    pub fn as_event(&self) -> &DiagnosticEvent {
        &self.0
    }

    pub fn into_inner(self) -> DiagnosticEvent {
        self.0
    }
}

impl Deref for CanonicalEvent {
    type Target = DiagnosticEvent;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for CanonicalEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Canonicalize one event: zero the timestamp, fold an empty DTC into `None`.
///
/// Idempotent; every other field passes through unchanged.
pub fn canonicalize(mut event: DiagnosticEvent) -> CanonicalEvent {
    event.timestamp = CANONICAL_TIMESTAMP;
    if event.dtc.as_deref() == Some("") {
        event.dtc = None;
    }
    CanonicalEvent(event)
}
