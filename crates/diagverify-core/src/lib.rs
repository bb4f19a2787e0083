pub mod align;
pub mod canonical;
pub mod collector;
pub mod config;
pub mod error;
pub mod result;
pub mod types;
pub mod verifier;

// Convenience re-exports
pub use align::{align, edit_distance, EditOp, EditScript, OpCounts};
pub use canonical::{canonicalize, CanonicalEvent};
pub use collector::EventCollector;
pub use config::{VerifierConfig, VerifierConfigOverrides};
pub use error::{EventError, EventResult};
pub use result::{
    Discrepancy, VerificationOutcome, VerificationResult, TEST_EXTRA_EVENT, TEST_MISMATCHED_EVENT,
    TEST_MISSING_EVENT,
};
pub use types::{events_from_json, DiagnosticEvent, FrameKind, VendorBounds};
pub use verifier::DiagnosticVerifier;
