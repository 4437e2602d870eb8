//! Defines what a coordinator monitors: a road section's driving conditions,
//! a TMS (LAM) traffic measuring station, or a road weather station.

use crate::types::error::ConfigurationError;
use crate::types::language::Language;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selects the acquisition and normalization branch for a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorKind {
    /// Driving conditions and forecast for a forecast road section.
    Conditions,
    /// Traffic measuring station (LAM): speeds, passings, sensor constants.
    Tms,
    /// Road weather station: the station's current sensor values.
    Weather,
}

impl MonitorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MonitorKind::Conditions => "conditions",
            MonitorKind::Tms => "tms",
            MonitorKind::Weather => "weather",
        }
    }
}

impl fmt::Display for MonitorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MonitorKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conditions" => Ok(MonitorKind::Conditions),
            "tms" | "lam" => Ok(MonitorKind::Tms),
            "weather" => Ok(MonitorKind::Weather),
            other => Err(ConfigurationError::UnknownMonitorKind(other.to_string())),
        }
    }
}

/// A configured target. Immutable once created.
///
/// # Examples
///
/// ```
/// use digitraffic_road::{Language, MonitorKind, MonitorTarget};
///
/// let target = MonitorTarget::new(MonitorKind::Tms, " 23001 ", Language::En).unwrap();
/// assert_eq!(target.id(), "23001");
///
/// assert!(MonitorTarget::new(MonitorKind::Weather, "   ", Language::Fi).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MonitorTarget {
    kind: MonitorKind,
    id: String,
    language: Language,
}

impl MonitorTarget {
    /// Creates a target, trimming the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingIdentifier`] if the identifier is empty after trimming.
    pub fn new(
        kind: MonitorKind,
        id: impl AsRef<str>,
        language: Language,
    ) -> Result<Self, ConfigurationError> {
        let id = id.as_ref().trim();
        if id.is_empty() {
            return Err(ConfigurationError::MissingIdentifier { kind });
        }
        Ok(Self {
            kind,
            id: id.to_string(),
            language,
        })
    }

    pub fn kind(&self) -> MonitorKind {
        self.kind
    }

    /// The identifier as entered: a section title or id, or a station id.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn language(&self) -> Language {
        self.language
    }
}

impl fmt::Display for MonitorTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} ({})", self.kind, self.id, self.language)
    }
}

/// The opaque configuration record handed over by the host's setup UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfig {
    pub monitor_kind: MonitorKind,
    #[serde(default)]
    pub target_identifier: Option<String>,
    #[serde(default)]
    pub language: Language,
}

impl TryFrom<TargetConfig> for MonitorTarget {
    type Error = ConfigurationError;

    fn try_from(config: TargetConfig) -> Result<Self, Self::Error> {
        let id = config.target_identifier.unwrap_or_default();
        MonitorTarget::new(config.monitor_kind, id, config.language)
    }
}
