//! Digitraffic road API URL construction.
//!
//! All endpoints live under one base URL (`https://tie.digitraffic.fi` in
//! production), which tests and mirrors can override.

pub const DEFAULT_BASE_URL: &str = "https://tie.digitraffic.fi";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Forecast-section metadata: a feature collection with `properties.id`
    /// and `properties.description`.
    pub fn forecast_sections(&self) -> String {
        format!("{}/api/weather/v1/forecast-sections", self.base_url)
    }

    /// Observation and forecasts of one forecast section.
    pub fn section_forecasts(&self, section_id: &str) -> String {
        format!(
            "{}/api/weather/v1/forecast-sections/{}/forecasts",
            self.base_url, section_id
        )
    }

    pub fn tms_station(&self, station_id: &str) -> String {
        format!("{}/api/tms/v1/stations/{}", self.base_url, station_id)
    }

    pub fn tms_sensor_constants(&self, station_id: &str) -> String {
        format!(
            "{}/api/tms/v1/stations/{}/sensor-constants",
            self.base_url, station_id
        )
    }

    pub fn tms_data(&self, station_id: &str) -> String {
        format!("{}/api/tms/v1/stations/{}/data", self.base_url, station_id)
    }

    pub fn weather_station_data(&self, station_id: &str) -> String {
        format!(
            "{}/api/weather/v1/stations/{}/data",
            self.base_url, station_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_urls_from_base() {
        let endpoints = Endpoints::new("http://localhost:8080/");
        assert_eq!(
            endpoints.forecast_sections(),
            "http://localhost:8080/api/weather/v1/forecast-sections"
        );
        assert_eq!(
            endpoints.section_forecasts("00003_250_00000_1_0"),
            "http://localhost:8080/api/weather/v1/forecast-sections/00003_250_00000_1_0/forecasts"
        );
        assert_eq!(
            endpoints.tms_sensor_constants("23001"),
            "http://localhost:8080/api/tms/v1/stations/23001/sensor-constants"
        );
        assert_eq!(
            endpoints.weather_station_data("1013"),
            "http://localhost:8080/api/weather/v1/stations/1013/data"
        );
    }

    #[test]
    fn default_points_at_production() {
        assert_eq!(
            Endpoints::default().tms_data("23001"),
            "https://tie.digitraffic.fi/api/tms/v1/stations/23001/data"
        );
    }
}
