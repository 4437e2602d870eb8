use crate::fetch::error::FetchError;
use crate::sections::error::SectionDirectoryError;
use crate::types::error::ConfigurationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DigitrafficError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    SectionDirectory(#[from] SectionDirectoryError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to determine cache directory")]
    CacheDirResolution(#[source] std::io::Error),
}
