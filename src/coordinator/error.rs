use crate::fetch::error::FetchError;
use thiserror::Error;

/// Why live data could not be obtained in a cycle. Never leaves a cycle:
/// every variant leads to mock fallback.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("Could not resolve '{input}' to a provider id")]
    Unresolved { input: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Section {id} is missing from the forecast response")]
    SectionNotFound { id: String },

    #[error("Section {id} has no observation or forecast entries")]
    NoConditions { id: String },
}
