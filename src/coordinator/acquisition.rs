use crate::coordinator::error::AcquisitionError;
use crate::fetch::endpoints::Endpoints;
use crate::fetch::http_fetcher::{fetch_as, Fetch};
use crate::fetch::payloads::{
    ForecastSectionsResponse, SensorConstantsResponse, StationDataResponse, StationMetadata,
};
use crate::mock::generator::MockGenerator;
use crate::normalize::normalizer::Normalizer;
use crate::sections::directory::SectionDirectory;
use crate::sections::resolver::{is_native_section_id, Resolution, SectionResolver};
use crate::types::language::Language;
use crate::types::monitor_target::{MonitorKind, MonitorTarget};
use crate::types::snapshot::SnapshotData;
use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;

/// Everything one acquisition needs: transport, URLs, section metadata,
/// normalization and the mock fallback. Cheap to clone.
pub struct AcquisitionClient<F: Fetch> {
    fetcher: Arc<F>,
    endpoints: Endpoints,
    directory: Arc<SectionDirectory<F>>,
    normalizer: Normalizer,
    resolver: SectionResolver,
    mock: MockGenerator,
}

impl<F: Fetch> Clone for AcquisitionClient<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: self.fetcher.clone(),
            endpoints: self.endpoints.clone(),
            directory: self.directory.clone(),
            normalizer: self.normalizer.clone(),
            resolver: self.resolver,
            mock: self.mock,
        }
    }
}

impl<F: Fetch> AcquisitionClient<F> {
    pub fn new(
        fetcher: Arc<F>,
        endpoints: Endpoints,
        directory: Arc<SectionDirectory<F>>,
        normalizer: Normalizer,
    ) -> Self {
        Self {
            fetcher,
            endpoints,
            directory,
            normalizer,
            resolver: SectionResolver::default(),
            mock: MockGenerator::new(),
        }
    }

    /// The same client with a different resolver threshold.
    pub fn with_resolver(mut self, resolver: SectionResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Resolves free-text section input. Native ids never touch the metadata endpoint.
    pub async fn resolve_section(&self, input: &str) -> Resolution {
        if is_native_section_id(input.trim()) {
            return self.resolver.resolve(input, &[]);
        }
        let features = self.directory.features().await;
        let resolution = self.resolver.resolve(input, &features);
        match &resolution {
            Resolution::Matched { id, score } => {
                info!("Resolved section '{}' to {} (overlap {})", input, id, score)
            }
            Resolution::Native(_) => {}
            Resolution::Unresolved => debug!("No forecast section matches '{}'", input),
        }
        resolution
    }

    /// The provider id a target's data is fetched with.
    ///
    /// Station ids must be numeric; anything else is unresolved.
    pub async fn resolve_target_id(&self, target: &MonitorTarget) -> Result<String, AcquisitionError> {
        let unresolved = || AcquisitionError::Unresolved {
            input: target.id().to_string(),
        };
        match target.kind() {
            MonitorKind::Conditions => self
                .resolve_section(target.id())
                .await
                .id()
                .map(str::to_string)
                .ok_or_else(unresolved),
            MonitorKind::Tms | MonitorKind::Weather => {
                let id = target.id();
                if id.chars().all(|c| c.is_ascii_digit()) {
                    Ok(id.to_string())
                } else {
                    Err(unresolved())
                }
            }
        }
    }

    /// Runs the provider-specific fetches for `id` and normalizes the result.
    pub async fn fetch_live(
        &self,
        target: &MonitorTarget,
        id: &str,
    ) -> Result<SnapshotData, AcquisitionError> {
        match target.kind() {
            MonitorKind::Conditions => self.fetch_conditions(id, target.language()).await,
            MonitorKind::Tms => self.fetch_tms(id, target.language()).await,
            MonitorKind::Weather => self.fetch_weather(id).await,
        }
    }

    async fn fetch_conditions(
        &self,
        id: &str,
        language: Language,
    ) -> Result<SnapshotData, AcquisitionError> {
        let url = self.endpoints.section_forecasts(id);
        let response: ForecastSectionsResponse = fetch_as(self.fetcher.as_ref(), &url).await?;
        let section = response
            .forecast_sections
            .iter()
            .find(|section| section.id == id)
            .ok_or_else(|| AcquisitionError::SectionNotFound { id: id.to_string() })?;
        let report = self
            .normalizer
            .conditions_report(section, language, Utc::now())
            .ok_or_else(|| AcquisitionError::NoConditions { id: id.to_string() })?;
        Ok(SnapshotData::Conditions(report))
    }

    async fn fetch_tms(&self, id: &str, language: Language) -> Result<SnapshotData, AcquisitionError> {
        let fetcher = self.fetcher.as_ref();
        let station_url = self.endpoints.tms_station(id);
        let constants_url = self.endpoints.tms_sensor_constants(id);
        let data_url = self.endpoints.tms_data(id);
        let (station, constants, data) = tokio::try_join!(
            fetch_as::<StationMetadata, F>(fetcher, &station_url),
            fetch_as::<SensorConstantsResponse, F>(fetcher, &constants_url),
            fetch_as::<StationDataResponse, F>(fetcher, &data_url),
        )?;

        let properties = station.properties;
        let label = properties
            .names
            .get(language.code())
            .cloned()
            .or(properties.name);
        Ok(SnapshotData::Station(self.normalizer.station_snapshot(
            label,
            &constants.sensor_constant_values,
            &data,
        )))
    }

    async fn fetch_weather(&self, id: &str) -> Result<SnapshotData, AcquisitionError> {
        let url = self.endpoints.weather_station_data(id);
        let data: StationDataResponse = fetch_as(self.fetcher.as_ref(), &url).await?;
        Ok(SnapshotData::Station(
            self.normalizer.station_snapshot(None, &[], &data),
        ))
    }

    /// Mock data for `target`, generated for the resolved id when there is one.
    pub fn fallback(&self, target: &MonitorTarget, resolved_id: Option<&str>) -> SnapshotData {
        let id = resolved_id.unwrap_or(target.id());
        let now = Utc::now();
        match target.kind() {
            MonitorKind::Conditions => {
                SnapshotData::Conditions(self.mock.conditions_report_at(id, target.language(), now))
            }
            MonitorKind::Tms => {
                let data = StationDataResponse {
                    data_updated_time: Some(now),
                    sensor_values: self.mock.tms_measurements(id, now),
                    ..Default::default()
                };
                SnapshotData::Station(self.normalizer.station_snapshot(
                    Some(id.to_string()),
                    &self.mock.tms_constants(id),
                    &data,
                ))
            }
            MonitorKind::Weather => {
                let data = StationDataResponse {
                    data_updated_time: Some(now),
                    sensor_values: self.mock.weather_measurements(id, now),
                    ..Default::default()
                };
                SnapshotData::Station(self.normalizer.station_snapshot(
                    Some(id.to_string()),
                    &[],
                    &data,
                ))
            }
        }
    }
}
