use crate::fetch::payloads::{
    ForecastKind, RawForecast, RawForecastSection, RawMeasurement, SensorConstant,
    StationDataResponse,
};
use crate::normalize::code_tables::{translate_code, translate_wmo_code, CodeDomain};
use crate::normalize::display::measurement_display_name;
use crate::normalize::profiles::{is_duplicate_channel, uses_description, PRESENT_WEATHER_KEY};
use crate::normalize::units::resolve_unit;
use crate::translation::{NoTranslations, TranslationLookup};
use crate::types::condition::{ConditionSnapshot, ConditionsReport, ForecastEntry};
use crate::types::language::Language;
use crate::types::measurement::{Measurement, MeasurementValue, StationSnapshot};
use chrono::{DateTime, Utc};
use log::debug;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Forecast entries kept per section.
pub const MAX_FORECAST_ENTRIES: usize = 12;

/// A measurement prepared for display: translated value and the unit to show with it.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayReading {
    pub value: MeasurementValue,
    pub unit: Option<String>,
}

/// Converts raw Digitraffic payloads into canonical records.
#[derive(Clone)]
pub struct Normalizer {
    lookup: Arc<dyn TranslationLookup>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Arc::new(NoTranslations))
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer").finish_non_exhaustive()
    }
}

impl Normalizer {
    pub fn new(lookup: Arc<dyn TranslationLookup>) -> Self {
        Self { lookup }
    }

    /// Builds the key to measurement map of a `sensorValues` array.
    ///
    /// Duplicate-channel keys are dropped first. Keys are unique ignoring
    /// case; the first occurrence wins and keeps its original casing.
    /// Entries without a name or with a null value are skipped.
    pub fn normalize_measurements(&self, raw: &[RawMeasurement]) -> HashMap<String, Measurement> {
        let mut seen = HashSet::new();
        let mut measurements = HashMap::with_capacity(raw.len());

        for entry in raw {
            let key = entry.name.trim();
            if key.is_empty() || is_duplicate_channel(key) {
                continue;
            }
            if !seen.insert(key.to_uppercase()) {
                debug!("Skipping repeated sensor key {}", key);
                continue;
            }
            let Some(value) = MeasurementValue::from_json(&entry.value) else {
                debug!("Skipping sensor {} without a value", key);
                continue;
            };
            measurements.insert(
                key.to_string(),
                Measurement {
                    key: key.to_string(),
                    sensor_id: entry.id,
                    value,
                    unit: resolve_unit(key, entry.unit.as_deref()),
                    measured_at: entry.measured_time,
                    window_start: entry.time_window_start,
                    window_end: entry.time_window_end,
                    description_fi: non_empty(entry.sensor_value_description_fi.as_deref()),
                    description_en: non_empty(entry.sensor_value_description_en.as_deref()),
                },
            );
        }
        measurements
    }

    pub fn normalize_constants(&self, raw: &[SensorConstant]) -> HashMap<String, MeasurementValue> {
        raw.iter()
            .filter(|constant| !constant.name.trim().is_empty())
            .filter_map(|constant| {
                MeasurementValue::from_json(&constant.value)
                    .map(|value| (constant.name.trim().to_string(), value))
            })
            .collect()
    }

    /// Translates a road-condition code; unknown codes become a placeholder text.
    pub fn normalize_condition(&self, code: &str, language: Language) -> String {
        translate_code(CodeDomain::RoadCondition, code, language)
    }

    pub fn translate_wmo(&self, value: &MeasurementValue, language: Language) -> String {
        translate_wmo_code(value, language)
    }

    pub fn display_name(&self, key: &str, language: Language) -> String {
        measurement_display_name(key, language, self.lookup.as_ref())
    }

    /// The value to show for a measurement.
    ///
    /// Present weather is translated from its WMO code. Description-flagged
    /// keys show the description in `language`, then in the other language,
    /// then the raw value, and never carry a unit.
    pub fn display(&self, measurement: &Measurement, language: Language) -> DisplayReading {
        if measurement.key == PRESENT_WEATHER_KEY {
            return DisplayReading {
                value: MeasurementValue::Text(self.translate_wmo(&measurement.value, language)),
                unit: None,
            };
        }

        if uses_description(&measurement.key) {
            let value = measurement
                .description(language)
                .or_else(|| measurement.description(language.other()))
                .map(|text| MeasurementValue::Text(text.clone()))
                .unwrap_or_else(|| measurement.value.clone());
            return DisplayReading { value, unit: None };
        }

        DisplayReading {
            value: measurement.value.clone(),
            unit: measurement.unit.clone(),
        }
    }

    /// Builds the conditions report of one forecast section.
    ///
    /// The current condition comes from the `OBSERVATION` entry (or the first
    /// entry when there is none); the forecast is every timed `FORECAST` entry
    /// in chronological order, at most [`MAX_FORECAST_ENTRIES`]. Returns `None`
    /// when the section carries no entries at all.
    pub fn conditions_report(
        &self,
        section: &RawForecastSection,
        language: Language,
        now: DateTime<Utc>,
    ) -> Option<ConditionsReport> {
        let observation = section
            .forecasts
            .iter()
            .find(|f| f.kind == ForecastKind::Observation)
            .or_else(|| section.forecasts.first())?;

        let location_label = [&section.section_name, &section.description]
            .into_iter()
            .flatten()
            .map(|label| label.trim())
            .find(|label| !label.is_empty())
            .unwrap_or(section.id.as_str())
            .to_string();

        let current = ConditionSnapshot {
            location_label,
            condition_text: self.forecast_condition_text(observation, language),
            reliability: observation.reliability.as_ref().and_then(reliability_percent),
            observed_at: observation.time.unwrap_or(now),
        };

        let mut timed: Vec<(DateTime<Utc>, &RawForecast)> = section
            .forecasts
            .iter()
            .filter(|f| f.kind == ForecastKind::Forecast)
            .filter_map(|f| f.time.map(|time| (time, f)))
            .collect();
        timed.sort_by_key(|(time, _)| *time);

        let forecast = timed
            .into_iter()
            .take(MAX_FORECAST_ENTRIES)
            .map(|(time, f)| ForecastEntry {
                time,
                condition_text: self.forecast_condition_text(f, language),
            })
            .collect();

        Some(ConditionsReport { current, forecast })
    }

    fn forecast_condition_text(&self, forecast: &RawForecast, language: Language) -> String {
        let code = forecast
            .overall_road_condition
            .as_deref()
            .or_else(|| {
                forecast
                    .forecast_condition_reason
                    .as_ref()
                    .and_then(|reason| reason.road_condition.as_deref())
            })
            .unwrap_or("CONDITION_COULD_NOT_BE_RESOLVED");
        self.normalize_condition(code, language)
    }

    /// Builds a station snapshot from the data payload and (TMS only) its sensor constants.
    pub fn station_snapshot(
        &self,
        label: Option<String>,
        constants: &[SensorConstant],
        data: &StationDataResponse,
    ) -> StationSnapshot {
        StationSnapshot {
            label,
            measurements: self.normalize_measurements(&data.sensor_values),
            constants: self.normalize_constants(constants),
            data_updated_at: data.data_updated_time,
        }
    }
}

fn non_empty(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Numeric reliabilities (or numeric strings) clamped to 0-100. Status words
/// such as `"SUCCESSFUL"` carry no percentage.
fn reliability_percent(value: &serde_json::Value) -> Option<u8> {
    let number = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number
        .is_finite()
        .then(|| number.round().clamp(0.0, 100.0) as u8)
}
