//! Diagnostic event model.
//!
//! One [`DiagnosticEvent`] is a single OBD2 snapshot: either a live frame
//! streamed while the vehicle runs, or a freeze frame stored alongside a
//! diagnostic trouble code (DTC).

use crate::error::{EventError, EventResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// First integer sensor id reserved for vendor extensions.
pub const INT_VENDOR_START: i32 = 32;

/// First float sensor id reserved for vendor extensions.
pub const FLOAT_VENDOR_START: i32 = 71;

/// Whether a frame was sampled live or stored as a freeze frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameKind {
    Live,
    Freeze,
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameKind::Live => write!(f, "live"),
            FrameKind::Freeze => write!(f, "freeze"),
        }
    }
}

/// Sensor id boundaries separating standard OBD2 sensors from vendor ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorBounds {
    pub int_vendor_start: i32,
    pub float_vendor_start: i32,
}

impl Default for VendorBounds {
    fn default() -> Self {
        Self {
            int_vendor_start: INT_VENDOR_START,
            float_vendor_start: FLOAT_VENDOR_START,
        }
    }
}

/// A single diagnostic snapshot.
///
/// Equality is structural: frame kind, timestamp, both sensor tables (as sets
/// of id/value pairs) and the DTC. Float values compare by bit pattern, so
/// `0.0` and `-0.0` differ and a NaN equals an identical NaN.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "EventWire", into = "EventWire")]
pub struct DiagnosticEvent {
    pub frame_kind: FrameKind,
    /// Capture time in nanoseconds since boot.
    pub timestamp: i64,
    pub int_values: BTreeMap<i32, i32>,
    pub float_values: BTreeMap<i32, f32>,
    pub dtc: Option<String>,
}

impl DiagnosticEvent {
    fn with_kind(frame_kind: FrameKind) -> Self {
        Self {
            frame_kind,
            timestamp: 0,
            int_values: BTreeMap::new(),
            float_values: BTreeMap::new(),
            dtc: None,
        }
    }

    /// Start an empty live frame.
    pub fn live() -> Self {
        Self::with_kind(FrameKind::Live)
    }

    /// Start an empty freeze frame.
    pub fn freeze() -> Self {
        Self::with_kind(FrameKind::Freeze)
    }

    pub fn at_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Set an integer sensor, replacing any previous value for `id`.
    pub fn with_int_value(mut self, id: i32, value: i32) -> Self {
        self.int_values.insert(id, value);
        self
    }

    /// Set a float sensor, replacing any previous value for `id`.
    pub fn with_float_value(mut self, id: i32, value: f32) -> Self {
        self.float_values.insert(id, value);
        self
    }

    pub fn with_dtc(mut self, dtc: impl Into<String>) -> Self {
        self.dtc = Some(dtc.into());
        self
    }

    pub fn is_live(&self) -> bool {
        self.frame_kind == FrameKind::Live
    }

    pub fn is_freeze(&self) -> bool {
        self.frame_kind == FrameKind::Freeze
    }

    /// True when the frame carries no sensor data (and, for a freeze frame, no DTC).
    pub fn is_empty_frame(&self) -> bool {
        let no_sensors = self.int_values.is_empty() && self.float_values.is_empty();
        match self.frame_kind {
            FrameKind::Live => no_sensors,
            FrameKind::Freeze => no_sensors && self.dtc.as_deref().unwrap_or("").is_empty(),
        }
    }

    pub fn is_earlier_than(&self, other: &DiagnosticEvent) -> bool {
        self.timestamp < other.timestamp
    }

    pub fn int_value(&self, id: i32) -> Option<i32> {
        self.int_values.get(&id).copied()
    }

    pub fn float_value(&self, id: i32) -> Option<f32> {
        self.float_values.get(&id).copied()
    }

    pub fn int_value_or(&self, id: i32, default: i32) -> i32 {
        self.int_value(id).unwrap_or(default)
    }

    pub fn float_value_or(&self, id: i32, default: f32) -> f32 {
        self.float_value(id).unwrap_or(default)
    }

    /// Copy of this frame with every vendor-range sensor removed.
    pub fn without_vendor_sensors(&self, bounds: VendorBounds) -> Self {
        Self {
            frame_kind: self.frame_kind,
            timestamp: self.timestamp,
            int_values: self
                .int_values
                .range(..bounds.int_vendor_start)
                .map(|(k, v)| (*k, *v))
                .collect(),
            float_values: self
                .float_values
                .range(..bounds.float_vendor_start)
                .map(|(k, v)| (*k, *v))
                .collect(),
            dtc: self.dtc.clone(),
        }
    }

    /// Decode one frame from its JSON object form.
    pub fn from_json(json: &str) -> EventResult<Self> {
        let wire: EventWire = serde_json::from_str(json)?;
        Self::try_from(wire)
    }

    /// Encode this frame as a JSON object.
    pub fn to_json(&self) -> EventResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Decode a JSON array of frames, preserving array order.
pub fn events_from_json(json: &str) -> EventResult<Vec<DiagnosticEvent>> {
    let wires: Vec<EventWire> = serde_json::from_str(json)?;
    wires.into_iter().map(DiagnosticEvent::try_from).collect()
}

impl PartialEq for DiagnosticEvent {
    fn eq(&self, other: &Self) -> bool {
        self.frame_kind == other.frame_kind
            && self.timestamp == other.timestamp
            && self.dtc == other.dtc
            && self.int_values == other.int_values
            && self.float_values.len() == other.float_values.len()
            && self
                .float_values
                .iter()
                .zip(other.float_values.iter())
                .all(|((ka, va), (kb, vb))| ka == kb && va.to_bits() == vb.to_bits())
    }
}

impl Eq for DiagnosticEvent {}

impl fmt::Display for DiagnosticEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} frame {{timestamp: {}, dtc: ", self.frame_kind, self.timestamp)?;
        match &self.dtc {
            Some(code) => write!(f, "{:?}", code)?,
            None => write!(f, "none")?,
        }
        write!(f, ", int: {{")?;
        for (n, (id, value)) in self.int_values.iter().enumerate() {
            if n > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", id, value)?;
        }
        write!(f, "}}, float: {{")?;
        for (n, (id, value)) in self.float_values.iter().enumerate() {
            if n > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", id, value)?;
        }
        write!(f, "}}}}")
    }
}

// -- JSON wire layout --

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SensorEntry<V> {
    id: i32,
    value: V,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct EventWire {
    #[serde(rename = "type")]
    frame_kind: FrameKind,
    #[serde(default)]
    timestamp: i64,
    #[serde(rename = "intValues", default)]
    int_values: Vec<SensorEntry<i32>>,
    #[serde(rename = "floatValues", default)]
    float_values: Vec<SensorEntry<f32>>,
    #[serde(rename = "stringValue", default, skip_serializing_if = "Option::is_none")]
    dtc: Option<String>,
}

fn collect_unique<V>(
    table: &'static str,
    entries: Vec<SensorEntry<V>>,
) -> Result<BTreeMap<i32, V>, EventError> {
    let mut out = BTreeMap::new();
    for entry in entries {
        if out.insert(entry.id, entry.value).is_some() {
            return Err(EventError::DuplicateSensor {
                table,
                id: entry.id,
            });
        }
    }
    Ok(out)
}

impl TryFrom<EventWire> for DiagnosticEvent {
    type Error = EventError;

    fn try_from(wire: EventWire) -> Result<Self, Self::Error> {
        Ok(Self {
            frame_kind: wire.frame_kind,
            timestamp: wire.timestamp,
            int_values: collect_unique("intValues", wire.int_values)?,
            float_values: collect_unique("floatValues", wire.float_values)?,
            dtc: wire.dtc,
        })
    }
}

impl From<DiagnosticEvent> for EventWire {
    fn from(event: DiagnosticEvent) -> Self {
        Self {
            frame_kind: event.frame_kind,
            timestamp: event.timestamp,
            int_values: event
                .int_values
                .into_iter()
                .map(|(id, value)| SensorEntry { id, value })
                .collect(),
            float_values: event
                .float_values
                .into_iter()
                .map(|(id, value)| SensorEntry { id, value })
                .collect(),
            dtc: event.dtc,
        }
    }
}
