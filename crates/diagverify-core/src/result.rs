//! Verification results handed to the report writer.

use crate::canonical::CanonicalEvent;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TEST_MISMATCHED_EVENT: &str = "test_mismatched_event";
pub const TEST_MISSING_EVENT: &str = "test_missing_event";
pub const TEST_EXTRA_EVENT: &str = "test_extra_event";

/// Outcome of one named check. `success` holds iff `error_message` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub test_case: String,
    pub success: bool,
    pub error_message: String,
}

impl VerificationResult {
    /// Build a result from the lines of one discrepancy group.
    pub fn from_lines<I, S>(test_case: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: fmt::Display,
    {
        let mut error_message = String::new();
        for line in lines {
            error_message.push_str(&line.to_string());
            error_message.push('\n');
        }
        Self {
            test_case: test_case.into(),
            success: error_message.is_empty(),
            error_message,
        }
    }

    pub fn passed(test_case: impl Into<String>) -> Self {
        Self::from_lines(test_case, std::iter::empty::<&str>())
    }
}

/// One classified difference between the truth and received sequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Discrepancy {
    Mismatched {
        truth_index: usize,
        expected: CanonicalEvent,
        actual: CanonicalEvent,
    },
    Missing {
        truth_index: usize,
        event: CanonicalEvent,
    },
    Extra {
        received_index: usize,
        event: CanonicalEvent,
    },
}

impl Discrepancy {
    /// Name of the check this discrepancy fails.
    pub fn test_case(&self) -> &'static str {
        match self {
            Discrepancy::Mismatched { .. } => TEST_MISMATCHED_EVENT,
            Discrepancy::Missing { .. } => TEST_MISSING_EVENT,
            Discrepancy::Extra { .. } => TEST_EXTRA_EVENT,
        }
    }
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discrepancy::Mismatched {
                truth_index,
                expected,
                actual,
            } => write!(
                f,
                "mismatched pair at truth index {}: expected={}, actual={}",
                truth_index, expected, actual
            ),
            Discrepancy::Missing { truth_index, event } => {
                write!(f, "missing event at truth index {}: {}", truth_index, event)
            }
            Discrepancy::Extra {
                received_index,
                event,
            } => write!(
                f,
                "extra event at received index {}: {}",
                received_index, event
            ),
        }
    }
}

/// Full output of one verification pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationOutcome {
    pub truth_count: usize,
    pub received_count: usize,
    /// Edit-script cost (number of discrepancies).
    pub cost: usize,
    /// Discrepancies in chronological order.
    pub discrepancies: Vec<Discrepancy>,
}

impl VerificationOutcome {
    pub fn is_clean(&self) -> bool {
        self.discrepancies.is_empty()
    }

    pub fn mismatched(&self) -> impl Iterator<Item = &Discrepancy> {
        self.of(TEST_MISMATCHED_EVENT)
    }

    pub fn missing(&self) -> impl Iterator<Item = &Discrepancy> {
        self.of(TEST_MISSING_EVENT)
    }

    pub fn extra(&self) -> impl Iterator<Item = &Discrepancy> {
        self.of(TEST_EXTRA_EVENT)
    }

    fn of<'a>(&'a self, test_case: &'a str) -> impl Iterator<Item = &'a Discrepancy> + 'a {
        self.discrepancies
            .iter()
            .filter(move |d| d.test_case() == test_case)
    }

    /// The three named results, in mismatched / missing / extra order.
    pub fn results(&self) -> [VerificationResult; 3] {
        [
            VerificationResult::from_lines(TEST_MISMATCHED_EVENT, self.mismatched()),
            VerificationResult::from_lines(TEST_MISSING_EVENT, self.missing()),
            VerificationResult::from_lines(TEST_EXTRA_EVENT, self.extra()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::canonicalize;
    use crate::types::DiagnosticEvent;

    #[test]
    fn success_tracks_message() {
        let ok = VerificationResult::passed(TEST_EXTRA_EVENT);
        assert!(ok.success);
        assert!(ok.error_message.is_empty());

        let failed = VerificationResult::from_lines(TEST_EXTRA_EVENT, ["one", "two"]);
        assert!(!failed.success);
        assert_eq!(failed.error_message, "one\ntwo\n");
    }

    #[test]
    fn serializes_with_report_field_names() {
        let v = serde_json::to_value(VerificationResult::passed(TEST_MISSING_EVENT)).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "testCase": "test_missing_event",
                "success": true,
                "errorMessage": "",
            })
        );
    }

    #[test]
    fn discrepancy_lines() {
        let ev = canonicalize(DiagnosticEvent::live().with_int_value(1, 2));
        let missing = Discrepancy::Missing {
            truth_index: 4,
            event: ev.clone(),
        };
        assert_eq!(
            missing.to_string(),
            "missing event at truth index 4: live frame {timestamp: 0, dtc: none, int: {1=2}, float: {}}"
        );
        let extra = Discrepancy::Extra {
            received_index: 0,
            event: ev,
        };
        assert!(extra.to_string().starts_with("extra event at received index 0: "));
        assert_eq!(extra.test_case(), TEST_EXTRA_EVENT);
    }
}
