//! Display language selection. Digitraffic publishes Finnish and English texts.

use crate::types::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The language used for condition texts, descriptions and display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Finnish (`fi`), the provider's primary language.
    #[default]
    Fi,
    /// English (`en`).
    En,
}

impl Language {
    /// The two-letter language code.
    ///
    /// # Examples
    ///
    /// ```
    /// use digitraffic_road::Language;
    ///
    /// assert_eq!(Language::En.code(), "en");
    /// assert_eq!(Language::default().code(), "fi");
    /// ```
    pub fn code(&self) -> &'static str {
        match self {
            Language::Fi => "fi",
            Language::En => "en",
        }
    }

    /// The other supported language, used for description fallbacks.
    pub fn other(&self) -> Language {
        match self {
            Language::Fi => Language::En,
            Language::En => Language::Fi,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fi" => Ok(Language::Fi),
            "en" => Ok(Language::En),
            other => Err(ConfigurationError::UnknownLanguage(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_language_codes() {
        assert_eq!("fi".parse::<Language>().unwrap(), Language::Fi);
        assert_eq!(" EN ".parse::<Language>().unwrap(), Language::En);
        assert!(matches!(
            "sv".parse::<Language>(),
            Err(ConfigurationError::UnknownLanguage(code)) if code == "sv"
        ));
    }

    #[test]
    fn other_language_flips() {
        assert_eq!(Language::Fi.other(), Language::En);
        assert_eq!(Language::En.other(), Language::Fi);
    }
}
