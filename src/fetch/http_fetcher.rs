use crate::fetch::error::FetchError;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;

/// Total time allowed for one request, connect to last byte.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Digitraffic asks API users to identify themselves with this header.
const DIGITRAFFIC_USER_HEADER: &str = "digitraffic-user";
const DIGITRAFFIC_USER: &str = concat!("digitraffic-road/", env!("CARGO_PKG_VERSION"));

/// A single-shot JSON GET. Implementations issue exactly one request and do not retry.
pub trait Fetch: Send + Sync + 'static {
    fn get_json(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<serde_json::Value, FetchError>> + Send;
}

/// Fetches `url` and deserializes the body into `T`.
///
/// A body that is valid JSON but has the wrong shape is reported as [`FetchError::Parse`].
pub async fn fetch_as<T, F>(fetcher: &F, url: &str) -> Result<T, FetchError>
where
    T: DeserializeOwned,
    F: Fetch,
{
    let value = fetcher.get_json(url).await?;
    serde_json::from_value(value).map_err(|source| FetchError::Parse {
        url: url.to_string(),
        source,
    })
}

/// The production [`Fetch`] implementation, backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            DIGITRAFFIC_USER_HEADER,
            HeaderValue::from_static(DIGITRAFFIC_USER),
        );
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .default_headers(headers)
            .build()
            .map_err(FetchError::ClientBuild)?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("HTTP error for {}: {}", url, status);
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;
        debug!("Received {} bytes from {}", body.len(), url);

        serde_json::from_slice(&body).map_err(|source| FetchError::Parse {
            url: url.to_string(),
            source,
        })
    }
}
