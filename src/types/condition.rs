//! Driving-condition records for forecast road sections.

use crate::types::language::Language;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The current observed driving condition of a road section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionSnapshot {
    pub location_label: String,
    pub condition_text: String,
    /// 0-100 when the provider (or the mock generator) reports one.
    pub reliability: Option<u8>,
    pub observed_at: DateTime<Utc>,
}

impl ConditionSnapshot {
    /// Human-readable one-liner, e.g. `"Tietokatu: Wet (Reliability: 93%)"`.
    pub fn display_line(&self, language: Language) -> String {
        let mut line = if self.location_label.is_empty() {
            self.condition_text.clone()
        } else {
            format!("{}: {}", self.location_label, self.condition_text)
        };
        if let Some(reliability) = self.reliability {
            let label = match language {
                Language::Fi => "Luotettavuus",
                Language::En => "Reliability",
            };
            line.push_str(&format!(" ({}: {}%)", label, reliability));
        }
        line
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub time: DateTime<Utc>,
    pub condition_text: String,
}

/// Current condition plus its chronological forecast (at most 12 entries).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionsReport {
    pub current: ConditionSnapshot,
    pub forecast: Vec<ForecastEntry>,
}

impl ConditionsReport {
    /// Renders the forecast as `HH:MM: condition` lines under a heading.
    pub fn forecast_text(&self, language: Language) -> String {
        let (heading, empty) = match language {
            Language::Fi => ("12 h ennuste", "Ei ennustetietoja"),
            Language::En => ("12h Forecast", "No forecast data available"),
        };
        if self.forecast.is_empty() {
            return empty.to_string();
        }
        let lines: Vec<String> = self
            .forecast
            .iter()
            .map(|entry| format!("{}: {}", entry.time.format("%H:%M"), entry.condition_text))
            .collect();
        format!("{}:\n{}", heading, lines.join("\n"))
    }
}
