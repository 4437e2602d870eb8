//! Canonical station telemetry: one [`Measurement`] per provider sensor name,
//! collected into a [`StationSnapshot`] for TMS and weather targets.

use crate::types::language::Language;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A sensor value. Digitraffic reports numbers for most sensors, but some
/// sensors and all translated codes end up as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MeasurementValue {
    Number(f64),
    Text(String),
}

impl MeasurementValue {
    /// Converts a raw JSON value. Returns `None` for null, arrays and objects.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_f64().map(MeasurementValue::Number),
            serde_json::Value::String(s) => Some(MeasurementValue::Text(s.clone())),
            serde_json::Value::Bool(b) => Some(MeasurementValue::Number(if *b { 1.0 } else { 0.0 })),
            _ => None,
        }
    }

    /// Numeric view of the value; numeric strings such as `"12.5"` are accepted.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MeasurementValue::Number(n) => Some(*n),
            MeasurementValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for MeasurementValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasurementValue::Number(n) => write!(f, "{}", n),
            MeasurementValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<MeasurementValue> for serde_json::Value {
    fn from(value: MeasurementValue) -> Self {
        match value {
            MeasurementValue::Number(n) => serde_json::Value::from(n),
            MeasurementValue::Text(s) => serde_json::Value::String(s),
        }
    }
}

/// A single normalized sensor reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// The provider's sensor name, original casing preserved (e.g. `"KESKITUULI"`).
    pub key: String,
    /// Provider sensor id, if reported.
    pub sensor_id: Option<i64>,
    pub value: MeasurementValue,
    /// Harmonized unit, see [`crate::resolve_unit`].
    pub unit: Option<String>,
    pub measured_at: Option<DateTime<Utc>>,
    pub window_start: Option<DateTime<Utc>>,
    pub window_end: Option<DateTime<Utc>>,
    pub description_fi: Option<String>,
    pub description_en: Option<String>,
}

impl Measurement {
    /// The provider's free-text description in `language`, if any.
    pub fn description(&self, language: Language) -> Option<&String> {
        match language {
            Language::Fi => self.description_fi.as_ref(),
            Language::En => self.description_en.as_ref(),
        }
    }
}

/// The latest normalized telemetry of one TMS or weather station.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StationSnapshot {
    /// Station name from the station metadata, when available.
    pub label: Option<String>,
    pub measurements: HashMap<String, Measurement>,
    /// Raw sensor constants (TMS only), e.g. `VVAPAAS1`.
    pub constants: HashMap<String, MeasurementValue>,
    pub data_updated_at: Option<DateTime<Utc>>,
}

/// A value looked up from a station snapshot, either a constant or a measurement.
#[derive(Debug, Clone, PartialEq)]
pub enum StationReading<'a> {
    Constant(&'a MeasurementValue),
    Measurement(&'a Measurement),
}

impl StationReading<'_> {
    pub fn value(&self) -> &MeasurementValue {
        match self {
            StationReading::Constant(value) => value,
            StationReading::Measurement(m) => &m.value,
        }
    }
}

impl StationSnapshot {
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty() && self.constants.is_empty()
    }

    /// Finds a measurement by key.
    ///
    /// Tries an exact match, then a case-insensitive match, then a substring
    /// match in either direction to tolerate provider key drift. When several
    /// keys contain the requested one, the shortest (then alphabetically first)
    /// wins so the result does not depend on map order.
    pub fn find_measurement(&self, key: &str) -> Option<&Measurement> {
        if let Some(m) = self.measurements.get(key) {
            return Some(m);
        }

        let wanted = key.to_lowercase();
        if let Some(m) = self
            .measurements
            .iter()
            .find(|(k, _)| k.to_lowercase() == wanted)
            .map(|(_, m)| m)
        {
            return Some(m);
        }

        if wanted.is_empty() {
            return None;
        }
        self.measurements
            .iter()
            .filter(|(k, _)| {
                let candidate = k.to_lowercase();
                candidate.contains(&wanted) || wanted.contains(&candidate)
            })
            .min_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
            .map(|(_, m)| m)
    }

    /// Looks up a TMS-style reading: constants first, then measurements.
    pub fn reading(&self, key: &str) -> Option<StationReading<'_>> {
        if let Some(value) = self.constants.get(key) {
            return Some(StationReading::Constant(value));
        }
        self.find_measurement(key).map(StationReading::Measurement)
    }
}
