use crate::fetch::endpoints::Endpoints;
use crate::fetch::http_fetcher::{fetch_as, Fetch};
use crate::fetch::payloads::SectionMetadata;
use crate::sections::error::SectionDirectoryError;
use crate::types::road_section::SectionFeature;
use bincode::config::{Configuration, Fixint, LittleEndian};
use log::{debug, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

const BINCODE_CACHE_FILE_NAME: &str = "forecast_sections.bin";
const BINCODE_CONFIG: Configuration<LittleEndian, Fixint> =
    bincode::config::standard().with_fixed_int_encoding();

/// Metadata older than this is fetched again.
pub const DEFAULT_METADATA_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

struct Loaded {
    features: Arc<Vec<SectionFeature>>,
    at: Instant,
}

/// The provider's forecast-section metadata, fetched lazily and kept in memory
/// and (optionally) in a bincode file in the cache folder.
pub struct SectionDirectory<F: Fetch> {
    fetcher: Arc<F>,
    endpoints: Endpoints,
    cache_file: Option<PathBuf>,
    max_age: Duration,
    loaded: Mutex<Option<Loaded>>,
}

impl<F: Fetch> SectionDirectory<F> {
    pub fn new(
        fetcher: Arc<F>,
        endpoints: Endpoints,
        cache_dir: Option<&Path>,
        max_age: Duration,
    ) -> Self {
        Self {
            fetcher,
            endpoints,
            cache_file: cache_dir.map(|dir| dir.join(BINCODE_CACHE_FILE_NAME)),
            max_age,
            loaded: Mutex::new(None),
        }
    }

    /// The metadata feature list, or an empty list when it cannot be obtained.
    ///
    /// Empty results are not remembered, so the next call tries again.
    pub async fn features(&self) -> Arc<Vec<SectionFeature>> {
        match self.load().await {
            Ok(features) => features,
            Err(e) => {
                warn!("Forecast-section metadata unavailable: {}", e);
                Arc::new(Vec::new())
            }
        }
    }

    pub async fn load(&self) -> Result<Arc<Vec<SectionFeature>>, SectionDirectoryError> {
        {
            let loaded = self.loaded.lock().await;
            if let Some(loaded) = loaded.as_ref() {
                if loaded.at.elapsed() < self.max_age {
                    return Ok(loaded.features.clone());
                }
            }
        }

        // Fetching happens without the lock; concurrent callers may fetch twice.
        let features = Arc::new(self.load_uncached().await?);
        if features.is_empty() {
            return Ok(features);
        }

        let mut loaded = self.loaded.lock().await;
        *loaded = Some(Loaded {
            features: features.clone(),
            at: Instant::now(),
        });
        Ok(features)
    }

    async fn load_uncached(&self) -> Result<Vec<SectionFeature>, SectionDirectoryError> {
        let Some(cache_file) = self.cache_file.clone() else {
            return self.fetch_features().await;
        };

        if let Some(age) = cache_age(&cache_file)? {
            if age < self.max_age {
                let path = cache_file.clone();
                match tokio::task::spawn_blocking(move || read_cached_features(&path)).await? {
                    Ok(features) => {
                        info!(
                            "Loaded {} forecast sections from cache {}",
                            features.len(),
                            cache_file.display()
                        );
                        return Ok(features);
                    }
                    Err(e) => warn!("Ignoring unreadable section cache: {}", e),
                }
            } else {
                info!("Section cache {} is stale, refreshing", cache_file.display());
            }
        }

        match self.fetch_features().await {
            Ok(features) => {
                let to_cache = features.clone();
                let path = cache_file.clone();
                let written =
                    tokio::task::spawn_blocking(move || write_cached_features(to_cache, &path))
                        .await?;
                if let Err(e) = written {
                    warn!("Could not persist section cache: {}", e);
                }
                Ok(features)
            }
            Err(fetch_error) if cache_file.exists() => {
                warn!(
                    "Using stale section cache {} after fetch failure: {}",
                    cache_file.display(),
                    fetch_error
                );
                let path = cache_file.clone();
                Ok(tokio::task::spawn_blocking(move || read_cached_features(&path)).await??)
            }
            Err(e) => Err(e),
        }
    }

    async fn fetch_features(&self) -> Result<Vec<SectionFeature>, SectionDirectoryError> {
        let url = self.endpoints.forecast_sections();
        let metadata: SectionMetadata = fetch_as(self.fetcher.as_ref(), &url).await?;
        let features: Vec<SectionFeature> = metadata
            .features
            .into_iter()
            .map(|feature| feature.properties)
            .collect();
        debug!("Fetched {} forecast sections", features.len());
        Ok(features)
    }
}

fn cache_age(path: &Path) -> Result<Option<Duration>, SectionDirectoryError> {
    match std::fs::metadata(path) {
        Ok(metadata) => {
            let modified = metadata
                .modified()
                .map_err(|e| SectionDirectoryError::CacheMetadata(path.to_path_buf(), e))?;
            // A modification time in the future counts as fresh.
            Ok(Some(modified.elapsed().unwrap_or_default()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SectionDirectoryError::CacheMetadata(path.to_path_buf(), e)),
    }
}

fn read_cached_features(path: &Path) -> Result<Vec<SectionFeature>, SectionDirectoryError> {
    let bytes =
        std::fs::read(path).map_err(|e| SectionDirectoryError::CacheRead(path.to_path_buf(), e))?;
    let (features, _) =
        bincode::serde::decode_from_slice::<Vec<SectionFeature>, _>(&bytes, BINCODE_CONFIG)
            .map_err(|e| SectionDirectoryError::CacheDecode(path.to_path_buf(), Box::new(e)))?;
    Ok(features)
}

/// Writes through a temp file in the same directory so readers never see a partial file.
fn write_cached_features(
    features: Vec<SectionFeature>,
    path: &Path,
) -> Result<(), SectionDirectoryError> {
    let bytes = bincode::serde::encode_to_vec(features, BINCODE_CONFIG)
        .map_err(|e| SectionDirectoryError::CacheEncode(Box::new(e)))?;
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let write_error = |e: std::io::Error| SectionDirectoryError::CacheWrite(path.to_path_buf(), e);

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_error)?;
    tmp.write_all(&bytes).map_err(write_error)?;
    tmp.persist(path).map_err(|e| write_error(e.error))?;
    debug!("Wrote section cache ({} bytes) to {}", bytes.len(), path.display());
    Ok(())
}
