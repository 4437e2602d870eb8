//! Serde structures for the raw Digitraffic payloads.
//!
//! Only the fields the normalizer uses are modelled; everything else in the
//! provider's responses is ignored. Optional fields default so that partially
//! populated payloads still parse.

use crate::types::road_section::SectionFeature;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection<P> {
    #[serde(default = "Vec::new")]
    pub features: Vec<Feature<P>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature<P> {
    pub properties: P,
}

/// `GET /api/weather/v1/forecast-sections`
pub type SectionMetadata = FeatureCollection<SectionFeature>;

/// `GET /api/weather/v1/forecast-sections/{id}/forecasts`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSectionsResponse {
    #[serde(default)]
    pub forecast_sections: Vec<RawForecastSection>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawForecastSection {
    pub id: String,
    #[serde(default)]
    pub section_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub forecasts: Vec<RawForecast>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForecastKind {
    Observation,
    Forecast,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawForecast {
    #[serde(rename = "type")]
    pub kind: ForecastKind,
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub overall_road_condition: Option<String>,
    #[serde(default)]
    pub reliability: Option<serde_json::Value>,
    #[serde(default)]
    pub forecast_condition_reason: Option<RawConditionReason>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConditionReason {
    #[serde(default)]
    pub road_condition: Option<String>,
}

/// `GET /api/tms/v1/stations/{id}` (a single GeoJSON feature)
pub type StationMetadata = Feature<StationProperties>;

#[derive(Debug, Clone, Deserialize)]
pub struct StationProperties {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub names: HashMap<String, String>,
}

/// `GET /api/tms/v1/stations/{id}/sensor-constants`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorConstantsResponse {
    #[serde(default)]
    pub sensor_constant_values: Vec<SensorConstant>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SensorConstant {
    pub name: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

/// `GET /api/tms/v1/stations/{id}/data` and `GET /api/weather/v1/stations/{id}/data`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDataResponse {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub data_updated_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sensor_values: Vec<RawMeasurement>,
}

/// One entry of a `sensorValues` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMeasurement {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: serde_json::Value,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub measured_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub time_window_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub time_window_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sensor_value_description_fi: Option<String>,
    #[serde(default)]
    pub sensor_value_description_en: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_forecast_sections() -> Result<(), serde_json::Error> {
        let json = r#"{
            "dataUpdatedTime": "2024-01-10T08:05:00Z",
            "forecastSections": [{
                "id": "00003_250_00000_1_0",
                "forecasts": [
                    {"type": "OBSERVATION", "time": "2024-01-10T08:00:00Z",
                     "overallRoadCondition": "NORMAL_CONDITION", "reliability": "SUCCESSFUL",
                     "forecastConditionReason": {"roadCondition": "DRY"}},
                    {"type": "FORECAST", "time": "2024-01-10T10:00:00Z",
                     "overallRoadCondition": "POOR_CONDITION"},
                    {"type": "SOMETHING_NEW"}
                ]
            }]
        }"#;
        let response: ForecastSectionsResponse = serde_json::from_str(json)?;
        let section = &response.forecast_sections[0];
        assert_eq!(section.id, "00003_250_00000_1_0");
        assert_eq!(section.forecasts.len(), 3);
        assert_eq!(section.forecasts[0].kind, ForecastKind::Observation);
        assert_eq!(section.forecasts[2].kind, ForecastKind::Other);
        assert_eq!(
            section.forecasts[0]
                .forecast_condition_reason
                .as_ref()
                .and_then(|r| r.road_condition.as_deref()),
            Some("DRY")
        );
        Ok(())
    }

    #[test]
    fn parses_sensor_values() -> Result<(), serde_json::Error> {
        let json = r#"{
            "id": 1013,
            "dataUpdatedTime": "2024-01-10T08:05:00Z",
            "sensorValues": [{
                "id": 1, "stationId": 1013, "name": "ILMA", "shortName": "Ilma",
                "measuredTime": "2024-01-10T08:00:00Z", "value": -3.4, "unit": "°C"
            }, {
                "id": 27, "name": "KELI_1", "value": 1, "unit": "***",
                "sensorValueDescriptionFi": "Kuiva", "sensorValueDescriptionEn": "Dry"
            }]
        }"#;
        let data: StationDataResponse = serde_json::from_str(json)?;
        assert_eq!(data.sensor_values.len(), 2);
        assert_eq!(data.sensor_values[0].unit.as_deref(), Some("°C"));
        assert_eq!(
            data.sensor_values[1].sensor_value_description_en.as_deref(),
            Some("Dry")
        );
        Ok(())
    }
}
