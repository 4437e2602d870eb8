//! Maps free-text road section input to a provider forecast-section id.
//!
//! Matching is a plain token-overlap count between the normalized input and
//! each candidate's description. There is no semantic tie-breaking: the first
//! candidate with the strictly highest score wins.

use crate::types::road_section::SectionFeature;
use std::collections::HashSet;

/// The outcome of resolving a section input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The input already had the provider's id shape and was returned untouched.
    Native(String),
    /// A metadata feature matched with the given token overlap.
    Matched { id: String, score: usize },
    /// No candidate reached the minimum overlap, or there was no metadata.
    Unresolved,
}

impl Resolution {
    pub fn id(&self) -> Option<&str> {
        match self {
            Resolution::Native(id) | Resolution::Matched { id, .. } => Some(id),
            Resolution::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Resolution::Unresolved)
    }
}

/// Returns true for ids shaped like `00003_250_00000_1_0`: five digits,
/// an underscore and at least one more digit.
///
/// # Examples
///
/// ```
/// use digitraffic_road::is_native_section_id;
///
/// assert!(is_native_section_id("00003_250_00000_1_0"));
/// assert!(!is_native_section_id("Tie 3: Valtatie 3 3.250"));
/// assert!(!is_native_section_id("0003_250"));
/// ```
pub fn is_native_section_id(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() >= 7
        && bytes[..5].iter().all(u8::is_ascii_digit)
        && bytes[5] == b'_'
        && bytes[6].is_ascii_digit()
}

/// Lowercases, turns every character that is neither alphanumeric nor
/// whitespace into a space, collapses whitespace runs and trims.
pub fn normalize_text(text: &str) -> String {
    let replaced: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The distinct tokens of the normalized text.
pub fn tokenize(text: &str) -> HashSet<String> {
    normalize_text(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Token-overlap section resolver.
///
/// `min_overlap` defaults to 1, i.e. any shared token is enough. Short or
/// generic inputs (`"tie"`) can therefore match the wrong section; raise the
/// threshold to trade recall for precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionResolver {
    min_overlap: usize,
}

impl Default for SectionResolver {
    fn default() -> Self {
        Self { min_overlap: 1 }
    }
}

impl SectionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolver requiring at least `min_overlap` shared tokens. Values below 1 are raised to 1.
    pub fn with_min_overlap(min_overlap: usize) -> Self {
        Self {
            min_overlap: min_overlap.max(1),
        }
    }

    pub fn min_overlap(&self) -> usize {
        self.min_overlap
    }

    /// Resolves `input` against `features`.
    ///
    /// Pure and read-only; callers cache the result per target.
    pub fn resolve(&self, input: &str, features: &[SectionFeature]) -> Resolution {
        let input = input.trim();
        if is_native_section_id(input) {
            return Resolution::Native(input.to_string());
        }

        let input_tokens = tokenize(input);
        if input_tokens.is_empty() {
            return Resolution::Unresolved;
        }

        let mut best: Option<(&SectionFeature, usize)> = None;
        for feature in features {
            let description = feature.description.as_deref().unwrap_or_default();
            let score = tokenize(description)
                .intersection(&input_tokens)
                .count();
            let best_score = best.map(|(_, s)| s).unwrap_or(0);
            if score > best_score {
                best = Some((feature, score));
            }
        }

        match best {
            Some((feature, score)) if score >= self.min_overlap => Resolution::Matched {
                id: feature.id.clone(),
                score,
            },
            _ => Resolution::Unresolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features() -> Vec<SectionFeature> {
        vec![
            SectionFeature::new(
                "00003_201_00000_1_0",
                "Tie 3 Kantatie Hämeenlinna Tampere pitkä osuus moottoritien jälkeen",
            ),
            SectionFeature::new("00003_250_00000_1_0", "Valtatie 3 3.250"),
            SectionFeature::new("00004_101_03169_2_0", "Tie 4: Kemintie 4.421"),
        ]
    }

    #[test]
    fn native_ids_bypass_metadata() {
        let resolver = SectionResolver::new();
        assert_eq!(
            resolver.resolve("00001_033_00000_1_0", &[]),
            Resolution::Native("00001_033_00000_1_0".to_string())
        );
    }

    #[test]
    fn normalizes_punctuation_and_whitespace() {
        assert_eq!(normalize_text("  Tie 3:  Valtatie\t3 3.250 "), "tie 3 valtatie 3 3 250");
        assert_eq!(normalize_text("Perämerentie/E8"), "perämerentie e8");
        let tokens = tokenize("Valtatie 3, valtatie 3");
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn prefers_higher_overlap_over_longer_description() {
        let resolver = SectionResolver::new();
        let resolution = resolver.resolve("Valtatie 3", &features());
        assert_eq!(
            resolution,
            Resolution::Matched {
                id: "00003_250_00000_1_0".to_string(),
                score: 2
            }
        );
    }

    #[test]
    fn ties_go_to_the_first_candidate() {
        let resolver = SectionResolver::new();
        let features = vec![
            SectionFeature::new("a", "Kemintie north"),
            SectionFeature::new("b", "Kemintie south"),
        ];
        assert_eq!(resolver.resolve("kemintie", &features).id(), Some("a"));
    }

    #[test]
    fn unresolved_without_overlap_or_metadata() {
        let resolver = SectionResolver::new();
        assert_eq!(resolver.resolve("Valtatie 3", &[]), Resolution::Unresolved);
        assert_eq!(
            resolver.resolve("Lapland", &features()),
            Resolution::Unresolved
        );
        assert_eq!(resolver.resolve(" :: ", &features()), Resolution::Unresolved);
    }

    #[test]
    fn min_overlap_rejects_weak_matches() {
        let strict = SectionResolver::with_min_overlap(3);
        assert_eq!(strict.resolve("Valtatie 3", &features()), Resolution::Unresolved);
        assert_eq!(SectionResolver::with_min_overlap(0).min_overlap(), 1);
    }

    #[test]
    fn missing_descriptions_never_match() {
        let resolver = SectionResolver::new();
        let features = vec![SectionFeature {
            id: "x".into(),
            description: None,
        }];
        assert_eq!(resolver.resolve("tie", &features), Resolution::Unresolved);
    }
}
