use crate::fetch::error::FetchError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SectionDirectoryError {
    #[error("Failed to read section cache file '{0}'")]
    CacheRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to write section cache file '{0}'")]
    CacheWrite(PathBuf, #[source] std::io::Error),

    #[error("Failed to read metadata of section cache file '{0}'")]
    CacheMetadata(PathBuf, #[source] std::io::Error),

    #[error("Failed to decode section cache data from '{0}'")]
    CacheDecode(PathBuf, #[source] Box<bincode::error::DecodeError>),

    #[error("Failed to encode section cache data")]
    CacheEncode(#[source] Box<bincode::error::EncodeError>),

    #[error("Failed to fetch forecast-section metadata")]
    Fetch(#[from] FetchError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
