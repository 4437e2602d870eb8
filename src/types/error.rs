use crate::types::monitor_target::MonitorKind;
use thiserror::Error;

/// Setup-time errors. These are fatal for the target being configured and are never retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Monitor kind '{kind}' requires a target identifier")]
    MissingIdentifier { kind: MonitorKind },

    #[error("Unknown monitor kind '{0}'")]
    UnknownMonitorKind(String),

    #[error("Unknown language '{0}', expected 'fi' or 'en'")]
    UnknownLanguage(String),

    #[error("Update interval must be greater than zero")]
    InvalidUpdateInterval,
}
