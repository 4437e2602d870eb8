//! Human-facing names for stations and measurement keys.

use crate::normalize::profiles::english_name;
use crate::translation::TranslationLookup;
use crate::types::language::Language;

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn humanize_token(token: &str) -> String {
    let upper = token.to_uppercase();
    if upper.starts_with("VVAPAAS") || upper == "MS1" || upper == "MS2" || upper == "PWDXX" {
        return upper;
    }
    if upper == "KM" {
        return "km".to_string();
    }
    if let Some(minutes) = upper.strip_suffix("MIN") {
        if !minutes.is_empty() && minutes.chars().all(|c| c.is_ascii_digit()) {
            return format!("{}min", minutes);
        }
    }
    capitalize(token)
}

/// Turns a raw sensor key into words: `KESKINOPEUS_5MIN_LIUKUVA_SUUNTA1_VVAPAAS1`
/// becomes `Keskinopeus 5min Liukuva Suunta1 VVAPAAS1`.
pub fn humanize_key(key: &str) -> String {
    key.split('_')
        .filter(|token| !token.is_empty())
        .map(humanize_token)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Display name of a measurement key: the host's translation when it has one,
/// then the built-in English name (English only), then the humanized key.
pub fn measurement_display_name(
    key: &str,
    language: Language,
    lookup: &dyn TranslationLookup,
) -> String {
    if key.is_empty() {
        return String::new();
    }
    if let Some(translated) = lookup.lookup(key, language).filter(|t| t != key) {
        return translated;
    }
    if language == Language::En {
        if let Some(name) = english_name(key) {
            return name.to_string();
        }
    }
    humanize_key(key)
}

/// Formats a provider station name: `vt4_Marostenmäki` becomes `Vt4 Marostenmäki`.
///
/// # Examples
///
/// ```
/// use digitraffic_road::format_station_name;
///
/// assert_eq!(format_station_name("vt4_Marostenmäki"), "Vt4 Marostenmäki");
/// assert_eq!(format_station_name("KEMINTIE  pohjoinen"), "Kemintie Pohjoinen");
/// ```
pub fn format_station_name(raw: &str) -> String {
    raw.replace('_', " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// A stable identifier suffix: lowercase ASCII letters, digits and underscores only.
pub fn slugify_measurement_key(key: &str) -> String {
    let folded: String = key
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'ä' | 'å' => 'a',
            'ö' => 'o',
            ' ' => '_',
            other => other,
        })
        .collect();

    let mut slug = String::with_capacity(folded.len());
    let mut in_run = false;
    for c in folded.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
            slug.push(c);
            in_run = false;
        } else if !in_run {
            slug.push('_');
            in_run = true;
        }
    }
    slug
}
