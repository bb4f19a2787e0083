//! Verifier configuration.

use crate::types::VendorBounds;
use serde::{Deserialize, Serialize};

/// Settings applied to every event a verifier sees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VerifierConfig {
    /// Drop vendor-range sensors from truth and received events before comparison.
    pub strip_vendor_sensors: bool,
    pub vendor_bounds: VendorBounds,
}

/// Partial overrides for [`VerifierConfig`], for JSON or YAML config files.
/// Unknown keys cause deserialization to fail.
/// Merge with `VerifierConfig::default().apply(overrides)`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifierConfigOverrides {
    pub strip_vendor_sensors: Option<bool>,
    pub int_vendor_start: Option<i32>,
    pub float_vendor_start: Option<i32>,
}

impl VerifierConfig {
    /// Apply overrides onto these settings. Only `Some` values override.
    pub fn apply(self, overrides: VerifierConfigOverrides) -> Self {
        Self {
            strip_vendor_sensors: overrides
                .strip_vendor_sensors
                .unwrap_or(self.strip_vendor_sensors),
            vendor_bounds: VendorBounds {
                int_vendor_start: overrides
                    .int_vendor_start
                    .unwrap_or(self.vendor_bounds.int_vendor_start),
                float_vendor_start: overrides
                    .float_vendor_start
                    .unwrap_or(self.vendor_bounds.float_vendor_start),
            },
        }
    }

    pub fn with_vendor_stripping(mut self, bounds: VendorBounds) -> Self {
        self.strip_vendor_sensors = true;
        self.vendor_bounds = bounds;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FLOAT_VENDOR_START, INT_VENDOR_START};

    #[test]
    fn defaults_keep_vendor_sensors() {
        let cfg = VerifierConfig::default();
        assert!(!cfg.strip_vendor_sensors);
        assert_eq!(cfg.vendor_bounds.int_vendor_start, INT_VENDOR_START);
        assert_eq!(cfg.vendor_bounds.float_vendor_start, FLOAT_VENDOR_START);
    }

    #[test]
    fn partial_override_from_json() {
        let overrides: VerifierConfigOverrides =
            serde_json::from_str(r#"{"strip_vendor_sensors": true, "int_vendor_start": 40}"#)
                .unwrap();
        let cfg = VerifierConfig::default().apply(overrides);
        assert!(cfg.strip_vendor_sensors);
        assert_eq!(cfg.vendor_bounds.int_vendor_start, 40);
        assert_eq!(cfg.vendor_bounds.float_vendor_start, FLOAT_VENDOR_START);
    }

    #[test]
    fn unknown_override_key_rejected() {
        let res: Result<VerifierConfigOverrides, _> =
            serde_json::from_str(r#"{"tolerance": 0.01}"#);
        assert!(res.is_err());
    }
}
