//! Display-name translations for measurement keys.
//!
//! Translation files are the host's `{language}.json` documents; only the
//! `sensor.datapoints` object (key to display name) is used. Each language is
//! loaded at most once per catalog.

use crate::types::language::Language;
use log::{debug, warn};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;

/// The `lookup(key, language)` capability the normalizer depends on.
pub trait TranslationLookup: Send + Sync {
    fn lookup(&self, key: &str, language: Language) -> Option<String>;
}

/// A lookup that never knows a translation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTranslations;

impl TranslationLookup for NoTranslations {
    fn lookup(&self, _key: &str, _language: Language) -> Option<String> {
        None
    }
}

#[derive(Debug)]
enum Source {
    Directory(PathBuf),
    Inline(HashMap<Language, String>),
}

/// Lazily loaded per-language datapoint names.
#[derive(Debug)]
pub struct TranslationCatalog {
    source: Source,
    fi: OnceLock<HashMap<String, String>>,
    en: OnceLock<HashMap<String, String>>,
}

impl TranslationCatalog {
    /// Reads `{dir}/fi.json` and `{dir}/en.json` on first use of each language.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self::with_source(Source::Directory(dir.into()))
    }

    /// Uses in-memory documents, one JSON text per language.
    pub fn from_json<I, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = (Language, S)>,
        S: Into<String>,
    {
        Self::with_source(Source::Inline(
            documents
                .into_iter()
                .map(|(language, json)| (language, json.into()))
                .collect(),
        ))
    }

    fn with_source(source: Source) -> Self {
        Self {
            source,
            fi: OnceLock::new(),
            en: OnceLock::new(),
        }
    }

    fn datapoints(&self, language: Language) -> &HashMap<String, String> {
        let cell = match language {
            Language::Fi => &self.fi,
            Language::En => &self.en,
        };
        cell.get_or_init(|| self.load(language))
    }

    fn load(&self, language: Language) -> HashMap<String, String> {
        let text = match &self.source {
            Source::Directory(dir) => {
                let path = dir.join(format!("{}.json", language.code()));
                match std::fs::read_to_string(&path) {
                    Ok(text) => text,
                    Err(e) => {
                        warn!("Failed to load translations from {}: {}", path.display(), e);
                        return HashMap::new();
                    }
                }
            }
            Source::Inline(documents) => match documents.get(&language) {
                Some(text) => text.clone(),
                None => return HashMap::new(),
            },
        };

        match parse_datapoints(&text) {
            Ok(datapoints) => {
                debug!("Loaded {} '{}' datapoint names", datapoints.len(), language);
                datapoints
            }
            Err(e) => {
                warn!("Invalid '{}' translation document: {}", language, e);
                HashMap::new()
            }
        }
    }
}

impl TranslationLookup for TranslationCatalog {
    fn lookup(&self, key: &str, language: Language) -> Option<String> {
        self.datapoints(language).get(key).cloned()
    }
}

fn parse_datapoints(text: &str) -> Result<HashMap<String, String>, serde_json::Error> {
    let document: serde_json::Value = serde_json::from_str(text)?;
    let datapoints = document
        .get("sensor")
        .and_then(|sensor| sensor.get("datapoints"))
        .and_then(|datapoints| datapoints.as_object())
        .map(|object| {
            object
                .iter()
                .filter_map(|(key, name)| name.as_str().map(|n| (key.clone(), n.to_string())))
                .collect()
        })
        .unwrap_or_default();
    Ok(datapoints)
}
