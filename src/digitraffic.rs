//! The main entry point: a configured connection to the Digitraffic road API
//! that hands out one [`PollingCoordinator`] per monitored target.

use crate::coordinator::acquisition::AcquisitionClient;
use crate::coordinator::polling::{PollingCoordinator, DEFAULT_UPDATE_INTERVAL};
use crate::error::DigitrafficError;
use crate::fetch::endpoints::{Endpoints, DEFAULT_BASE_URL};
use crate::fetch::http_fetcher::{Fetch, HttpFetcher, DEFAULT_REQUEST_TIMEOUT};
use crate::normalize::normalizer::Normalizer;
use crate::sections::catalogue;
use crate::sections::directory::{SectionDirectory, DEFAULT_METADATA_MAX_AGE};
use crate::sections::resolver::{Resolution, SectionResolver};
use crate::translation::TranslationLookup;
use crate::types::error::ConfigurationError;
use crate::types::monitor_target::MonitorTarget;
use crate::types::road_section::{RoadSection, SectionFeature};
use crate::utils::{ensure_cache_dir_exists, get_cache_dir};
use bon::bon;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Shared transport, section metadata and normalization for any number of
/// monitored targets.
///
/// Every coordinator created by [`Digitraffic::monitor`] shares the same HTTP
/// client and forecast-section metadata, so the metadata is fetched at most
/// once per `metadata_max_age` regardless of how many targets are configured.
///
/// # Examples
///
/// ```rust,no_run
/// # use digitraffic_road::{Digitraffic, DigitrafficError, Language, MonitorKind, MonitorTarget};
/// # #[tokio::main]
/// # async fn main() -> Result<(), DigitrafficError> {
/// let client = Digitraffic::builder().build().await?;
///
/// let target = MonitorTarget::new(MonitorKind::Tms, "23001", Language::En)?;
/// let coordinator = client.monitor().target(target).call()?;
/// coordinator.start();
///
/// let mut updates = coordinator.subscribe();
/// updates.changed().await.ok();
/// println!("{:?}", updates.borrow().snapshot);
/// # Ok(())
/// # }
/// ```
pub struct Digitraffic<F: Fetch = HttpFetcher> {
    client: AcquisitionClient<F>,
    directory: Arc<SectionDirectory<F>>,
}

#[bon]
impl Digitraffic<HttpFetcher> {
    /// Creates a client backed by [`HttpFetcher`].
    ///
    /// # Arguments
    ///
    /// * `.base_url(String)`: Optional. API root. Defaults to `https://tie.digitraffic.fi`.
    /// * `.cache_folder(PathBuf)`: Optional. Where section metadata is cached. Defaults to the
    ///   system cache directory joined with `digitraffic_road_cache`.
    /// * `.disk_cache(bool)`: Optional. Set to `false` to keep section metadata in memory only.
    /// * `.request_timeout(Duration)`: Optional. Per-request timeout. Defaults to 10 seconds.
    /// * `.metadata_max_age(Duration)`: Optional. Defaults to 24 hours.
    /// * `.translations(Arc<dyn TranslationLookup>)`: Optional. Display-name lookup service.
    ///
    /// # Errors
    ///
    /// Returns [`DigitrafficError::CacheDirResolution`] or [`DigitrafficError::CacheDirCreation`]
    /// when the cache folder cannot be determined or created, and [`DigitrafficError::Fetch`]
    /// when the HTTP client cannot be built.
    #[builder]
    pub async fn new(
        #[builder(into)] base_url: Option<String>,
        cache_folder: Option<PathBuf>,
        disk_cache: Option<bool>,
        request_timeout: Option<Duration>,
        metadata_max_age: Option<Duration>,
        translations: Option<Arc<dyn TranslationLookup>>,
    ) -> Result<Self, DigitrafficError> {
        let cache_folder = if disk_cache.unwrap_or(true) {
            let folder = match cache_folder {
                Some(folder) => folder,
                None => get_cache_dir().map_err(DigitrafficError::CacheDirResolution)?,
            };
            ensure_cache_dir_exists(&folder)
                .await
                .map_err(|e| DigitrafficError::CacheDirCreation(folder.clone(), e))?;
            Some(folder)
        } else {
            None
        };

        let fetcher = HttpFetcher::with_timeout(request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT))?;
        let normalizer = translations.map(Normalizer::new).unwrap_or_default();
        Ok(Self::with_fetcher(
            fetcher,
            Endpoints::new(base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string())),
            cache_folder.as_deref(),
            metadata_max_age.unwrap_or(DEFAULT_METADATA_MAX_AGE),
            normalizer,
        ))
    }
}

#[bon]
impl<F: Fetch> Digitraffic<F> {
    /// Creates a client over any [`Fetch`] implementation.
    pub fn with_fetcher(
        fetcher: F,
        endpoints: Endpoints,
        cache_folder: Option<&Path>,
        metadata_max_age: Duration,
        normalizer: Normalizer,
    ) -> Self {
        let fetcher = Arc::new(fetcher);
        let directory = Arc::new(SectionDirectory::new(
            fetcher.clone(),
            endpoints.clone(),
            cache_folder,
            metadata_max_age,
        ));
        Self {
            client: AcquisitionClient::new(fetcher, endpoints, directory.clone(), normalizer),
            directory,
        }
    }

    /// Creates a coordinator for one target. It does nothing until
    /// [`PollingCoordinator::start`] or [`PollingCoordinator::refresh`] is called.
    ///
    /// # Arguments
    ///
    /// * `.target(MonitorTarget)`: **Required.**
    /// * `.update_interval(Duration)`: Optional. Defaults to 60 seconds. Must be non-zero.
    /// * `.min_overlap(usize)`: Optional. Tokens a section description must share with a
    ///   free-text target to match. Defaults to 1.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidUpdateInterval`] for a zero interval.
    #[builder]
    pub fn monitor(
        &self,
        target: MonitorTarget,
        update_interval: Option<Duration>,
        min_overlap: Option<usize>,
    ) -> Result<PollingCoordinator<F>, ConfigurationError> {
        let resolver = min_overlap
            .map(SectionResolver::with_min_overlap)
            .unwrap_or_default();
        PollingCoordinator::new(
            target,
            self.client.clone().with_resolver(resolver),
            update_interval.unwrap_or(DEFAULT_UPDATE_INTERVAL),
        )
    }

    /// Resolves a section title or id against the provider's metadata.
    pub async fn resolve_section(&self, input: &str) -> Resolution {
        self.client.resolve_section(input).await
    }

    /// The provider's forecast-section metadata, empty when unavailable.
    pub async fn section_features(&self) -> Arc<Vec<SectionFeature>> {
        self.directory.features().await
    }

    /// Searches the built-in road-section catalogue.
    pub fn search_sections(&self, query: &str) -> Vec<&'static RoadSection> {
        catalogue::search_sections(query)
    }

    pub fn normalizer(&self) -> &Normalizer {
        self.client.normalizer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::polling::CycleOutcome;
    use crate::fetch::stub::StubFetcher;
    use crate::types::language::Language;
    use crate::types::monitor_target::MonitorKind;
    use serde_json::json;

    fn digitraffic(fetcher: StubFetcher, cache_folder: Option<&Path>) -> Digitraffic<StubFetcher> {
        Digitraffic::with_fetcher(
            fetcher,
            Endpoints::default(),
            cache_folder,
            DEFAULT_METADATA_MAX_AGE,
            Normalizer::default(),
        )
    }

    #[tokio::test]
    async fn monitor_applies_defaults_and_overrides() -> Result<(), Box<dyn std::error::Error>> {
        let client = digitraffic(StubFetcher::new(), None);
        let target = MonitorTarget::new(MonitorKind::Weather, "1013", Language::Fi)?;

        let coordinator = client.monitor().target(target.clone()).call()?;
        assert_eq!(coordinator.update_interval(), DEFAULT_UPDATE_INTERVAL);
        assert_eq!(coordinator.target(), &target);

        let fast = client
            .monitor()
            .target(target.clone())
            .update_interval(Duration::from_secs(5))
            .call()?;
        assert_eq!(fast.update_interval(), Duration::from_secs(5));

        assert!(client
            .monitor()
            .target(target)
            .update_interval(Duration::ZERO)
            .call()
            .is_err());
        Ok(())
    }

    #[tokio::test]
    async fn min_overlap_controls_matching() -> Result<(), Box<dyn std::error::Error>> {
        let endpoints = Endpoints::default();
        let fetcher = StubFetcher::new();
        fetcher.json(
            endpoints.forecast_sections(),
            json!({"features": [
                {"properties": {"id": "00004_101_03169_2_0", "description": "Tie 4: Kemintie 4.421"}}
            ]}),
        );
        let client = digitraffic(fetcher, None);
        let target = MonitorTarget::new(MonitorKind::Conditions, "Kemintie Oulu", Language::Fi)?;

        let strict = client.monitor().target(target.clone()).min_overlap(2).call()?;
        assert_eq!(strict.refresh().await, CycleOutcome::Fallback);
        assert_eq!(strict.resolved_id(), None);

        let lenient = client.monitor().target(target).call()?;
        lenient.refresh().await;
        assert_eq!(lenient.resolved_id().as_deref(), Some("00004_101_03169_2_0"));
        Ok(())
    }

    #[tokio::test]
    async fn metadata_is_shared_between_coordinators() -> Result<(), Box<dyn std::error::Error>> {
        let endpoints = Endpoints::default();
        let fetcher = StubFetcher::new();
        fetcher.json(
            endpoints.forecast_sections(),
            json!({"features": [
                {"properties": {"id": "00003_250_00000_1_0", "description": "Valtatie 3 3.250"}}
            ]}),
        );
        let cache = tempfile::tempdir()?;
        let client = digitraffic(fetcher, Some(cache.path()));

        for language in [Language::Fi, Language::En] {
            let target = MonitorTarget::new(MonitorKind::Conditions, "valtatie 3", language)?;
            let coordinator = client.monitor().target(target).call()?;
            coordinator.refresh().await;
            assert_eq!(coordinator.resolved_id().as_deref(), Some("00003_250_00000_1_0"));
        }
        assert_eq!(client.section_features().await.len(), 1);
        assert!(cache.path().join("forecast_sections.bin").exists());
        Ok(())
    }

    #[tokio::test]
    async fn resolves_and_searches_sections() {
        let client = digitraffic(StubFetcher::new(), None);
        assert_eq!(
            client.resolve_section("00003_250_00000_1_0").await,
            Resolution::Native("00003_250_00000_1_0".to_string())
        );
        assert_eq!(client.resolve_section("Kemintie").await, Resolution::Unresolved);
        assert!(!client.search_sections("E18").is_empty());
    }

    #[tokio::test]
    async fn builder_creates_cache_folder() -> Result<(), Box<dyn std::error::Error>> {
        let root = tempfile::tempdir()?;
        let folder = root.path().join("digitraffic");
        let client = Digitraffic::builder()
            .base_url("http://127.0.0.1:9")
            .cache_folder(folder.clone())
            .request_timeout(Duration::from_millis(200))
            .build()
            .await?;
        assert!(folder.is_dir());
        assert_eq!(client.search_sections("vt4").len(), 3);
        Ok(())
    }
}
