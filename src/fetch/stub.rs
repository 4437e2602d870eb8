//! Canned-response [`Fetch`] implementation for tests.

use crate::fetch::error::FetchError;
use crate::fetch::http_fetcher::Fetch;
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
pub(crate) enum StubResponse {
    Json(Value),
    Timeout,
    Status(StatusCode),
}

/// Serves registered responses by exact URL. Unregistered URLs time out.
#[derive(Debug, Default)]
pub(crate) struct StubFetcher {
    responses: Mutex<HashMap<String, StubResponse>>,
    calls: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl StubFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Every request sleeps for `delay` (on the tokio clock) before answering.
    pub(crate) fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub(crate) fn respond(&self, url: impl Into<String>, response: StubResponse) {
        self.responses.lock().unwrap().insert(url.into(), response);
    }

    pub(crate) fn json(&self, url: impl Into<String>, body: Value) {
        self.respond(url, StubResponse::Json(body));
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self, url: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == url).count()
    }
}

impl Fetch for StubFetcher {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        let response = self.responses.lock().unwrap().get(url).cloned();
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match response {
            Some(StubResponse::Json(value)) => Ok(value),
            Some(StubResponse::Status(status)) => Err(FetchError::HttpStatus {
                url: url.to_string(),
                status,
            }),
            Some(StubResponse::Timeout) | None => Err(FetchError::Timeout {
                url: url.to_string(),
            }),
        }
    }
}
