//! Deterministic synthetic data, used whenever live acquisition fails.
//!
//! Every value is a function of the target id (plus the measurement key or
//! language) through a stable FNV-1a hash, so the same id always yields the
//! same data in every process. The generator performs no I/O and cannot fail.

use crate::fetch::payloads::{RawMeasurement, SensorConstant};
use crate::normalize::profiles::{
    LAM_MEASUREMENTS, PRESENT_WEATHER_KEY, TMS_CONSTANT_KEYS, WEATHER_SENSOR_PROFILES,
};
use crate::sections::catalogue::find_section;
use crate::types::condition::{ConditionSnapshot, ConditionsReport, ForecastEntry};
use crate::types::language::Language;
use crate::types::measurement::MeasurementValue;
use chrono::{DateTime, TimeDelta, Timelike, Utc};

pub const CONDITION_PHRASES_EN: [&str; 7] = [
    "Clear",
    "Cloudy",
    "Light snow",
    "Light rain",
    "Wet",
    "Slippery",
    "Icy",
];

pub const CONDITION_PHRASES_FI: [&str; 7] = [
    "Selkeää",
    "Pilvistä",
    "Heikkoa lumisadetta",
    "Heikkoa vesisadetta",
    "Märkää",
    "Liukasta",
    "Jäistä",
];

pub const MOCK_FORECAST_ENTRIES: usize = 12;
const FORECAST_CADENCE_HOURS: i64 = 2;

/// Present-weather codes the mock picks from (clear, mist, rain, snow, drizzle, light snow).
const MOCK_WMO_CODES: [i64; 6] = [0, 10, 21, 22, 61, 71];

/// `(key fragment, base, steps, step)`: a key containing the fragment gets
/// `base + (hash % steps) * step`. First match wins.
const VALUE_RANGES: [(&str, f64, u64, f64); 17] = [
    ("VVAPAAS", 60.0, 41, 1.0),
    ("KESKINOPEUS", 50.0, 51, 1.0),
    ("OHITUKSET_60MIN", 0.0, 1500, 1.0),
    ("OHITUKSET", 0.0, 130, 1.0),
    ("DERIVAATTA", -2.0, 41, 0.1),
    ("KOSTEUS", 40.0, 61, 1.0),
    ("ILMANPAINE", 970.0, 71, 1.0),
    ("TUULENSUUNTA", 0.0, 360, 1.0),
    ("TUULI", 0.0, 181, 0.1),
    ("SADESUMMA", 0.0, 101, 0.1),
    ("SADE_INTENSITEETTI", 0.0, 51, 0.1),
    ("NÄKYVYYS", 0.1, 200, 0.1),
    ("JÄÄN_MÄÄRÄ", 0.0, 21, 0.1),
    ("JOHTAVUUS", 0.0, 101, 1.0),
    ("PISTE", -25.0, 301, 0.1),
    ("ILMA", -25.0, 451, 0.1),
    ("_1", -20.0, 351, 0.1),
];

/// Free-flow speed and lane constants of a TMS station, `(key, base, steps)`.
const CONSTANT_RANGES: [(&str, f64, u64); 4] = [
    ("VVAPAAS1", 70.0, 51),
    ("VVAPAAS2", 70.0, 51),
    ("MS1", 1.0, 3),
    ("MS2", 1.0, 3),
];

/// 64-bit FNV-1a over the UTF-8 bytes of `text`.
///
/// # Examples
///
/// ```
/// use digitraffic_road::stable_hash;
///
/// assert_eq!(stable_hash(""), 0xcbf2_9ce4_8422_2325);
/// assert_eq!(stable_hash("E18_0_50"), stable_hash("E18_0_50"));
/// ```
pub fn stable_hash(text: &str) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    text.bytes().fold(OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(PRIME)
    })
}

pub fn condition_phrases(language: Language) -> &'static [&'static str] {
    match language {
        Language::Fi => &CONDITION_PHRASES_FI,
        Language::En => &CONDITION_PHRASES_EN,
    }
}

fn pick<T: Copy>(items: &[T], hash: u64) -> T {
    items[(hash % items.len() as u64) as usize]
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// The first even UTC hour boundary strictly after `now`.
fn next_even_hour(now: DateTime<Utc>) -> DateTime<Utc> {
    let hour_start = now
        - TimeDelta::minutes(i64::from(now.minute()))
        - TimeDelta::seconds(i64::from(now.second()))
        - TimeDelta::nanoseconds(i64::from(now.nanosecond()));
    let step = if hour_start.hour() % 2 == 0 { 2 } else { 1 };
    hour_start + TimeDelta::hours(step)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MockGenerator;

impl MockGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn conditions(&self, id: &str, language: Language) -> ConditionSnapshot {
        self.conditions_at(id, language, Utc::now())
    }

    /// The mock condition of `id`, observed at `now`.
    ///
    /// Known catalogue ids are labelled with their location, others with the id itself.
    pub fn conditions_at(&self, id: &str, language: Language, now: DateTime<Utc>) -> ConditionSnapshot {
        let hash = stable_hash(id);
        ConditionSnapshot {
            location_label: find_section(id)
                .map(|section| section.location.to_string())
                .unwrap_or_else(|| id.to_string()),
            condition_text: pick(condition_phrases(language), hash).to_string(),
            reliability: Some(90 + (hash % 10) as u8),
            observed_at: now,
        }
    }

    pub fn forecast(&self, id: &str, language: Language) -> Vec<ForecastEntry> {
        self.forecast_at(id, language, Utc::now())
    }

    /// Twelve entries two hours apart, starting at the next even hour after `now`.
    pub fn forecast_at(&self, _id: &str, language: Language, now: DateTime<Utc>) -> Vec<ForecastEntry> {
        let phrases = condition_phrases(language);
        let start = next_even_hour(now);
        (0..MOCK_FORECAST_ENTRIES)
            .map(|index| ForecastEntry {
                time: start + TimeDelta::hours(FORECAST_CADENCE_HOURS * index as i64),
                condition_text: phrases[index % phrases.len()].to_string(),
            })
            .collect()
    }

    pub fn conditions_report(&self, id: &str, language: Language) -> ConditionsReport {
        self.conditions_report_at(id, language, Utc::now())
    }

    pub fn conditions_report_at(
        &self,
        id: &str,
        language: Language,
        now: DateTime<Utc>,
    ) -> ConditionsReport {
        ConditionsReport {
            current: self.conditions_at(id, language, now),
            forecast: self.forecast_at(id, language, now),
        }
    }

    /// A plausible value for sensor `key` of station `id`.
    pub fn measurement(&self, id: &str, key: &str) -> MeasurementValue {
        let hash = stable_hash(&format!("{}/{}", id, key));
        let upper = key.to_uppercase();

        if upper == PRESENT_WEATHER_KEY {
            return MeasurementValue::Number(pick(&MOCK_WMO_CODES, hash) as f64);
        }
        if let Some((_, base, steps)) = CONSTANT_RANGES.iter().find(|(k, _, _)| *k == upper) {
            return MeasurementValue::Number(base + (hash % steps) as f64);
        }
        let (base, steps, step) = VALUE_RANGES
            .iter()
            .find(|(fragment, _, _, _)| upper.contains(fragment))
            .map(|(_, base, steps, step)| (*base, *steps, *step))
            .unwrap_or((0.0, 100, 1.0));
        MeasurementValue::Number(round_tenths(base + (hash % steps) as f64 * step))
    }

    /// The TMS sensor constants of station `id`.
    pub fn tms_constants(&self, id: &str) -> Vec<SensorConstant> {
        TMS_CONSTANT_KEYS
            .iter()
            .map(|key| SensorConstant {
                name: key.to_string(),
                value: self.measurement(id, key).into(),
            })
            .collect()
    }

    /// The LAM `sensorValues` of TMS station `id` as the provider would report them.
    pub fn tms_measurements(&self, id: &str, now: DateTime<Utc>) -> Vec<RawMeasurement> {
        LAM_MEASUREMENTS
            .iter()
            .enumerate()
            .map(|(index, (key, _))| {
                let unit = if key.contains("VVAPAAS") {
                    Some("***")
                } else if key.starts_with("KESKINOPEUS") {
                    Some("km/h")
                } else {
                    None
                };
                let window = if key.contains("60MIN") {
                    TimeDelta::minutes(60)
                } else {
                    TimeDelta::minutes(5)
                };
                RawMeasurement {
                    id: Some(5000 + index as i64),
                    name: key.to_string(),
                    value: self.measurement(id, key).into(),
                    unit: unit.map(str::to_string),
                    measured_time: Some(now),
                    time_window_start: Some(now - window),
                    time_window_end: Some(now),
                    ..Default::default()
                }
            })
            .collect()
    }

    /// The `sensorValues` of road-weather station `id`, one per known weather sensor.
    pub fn weather_measurements(&self, id: &str, now: DateTime<Utc>) -> Vec<RawMeasurement> {
        WEATHER_SENSOR_PROFILES
            .iter()
            .enumerate()
            .map(|(index, profile)| {
                let mut raw = RawMeasurement {
                    id: Some(index as i64 + 1),
                    name: profile.key.to_string(),
                    value: self.measurement(id, profile.key).into(),
                    unit: profile.unit.map(str::to_string),
                    measured_time: Some(now),
                    ..Default::default()
                };
                if profile.use_description {
                    let hash = stable_hash(&format!("{}/{}", id, profile.key));
                    let phrase = (hash % CONDITION_PHRASES_EN.len() as u64) as usize;
                    raw.value = serde_json::Value::from(phrase as u64);
                    raw.sensor_value_description_fi = Some(CONDITION_PHRASES_FI[phrase].to_string());
                    raw.sensor_value_description_en = Some(CONDITION_PHRASES_EN[phrase].to_string());
                }
                raw
            })
            .collect()
    }
}
