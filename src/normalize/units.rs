//! Unit harmonization rules.

/// Digitraffic reports `***` where it means percent.
pub const PERCENT_PLACEHOLDER: &str = "***";

struct UnitOverride {
    /// Key family the rule is limited to, `None` for every key.
    family: Option<&'static str>,
    provider_units: &'static [&'static str],
    unit: &'static str,
}

/// Applied in order before the provider unit is accepted as-is.
const UNIT_OVERRIDES: [UnitOverride; 2] = [
    UnitOverride {
        family: None,
        provider_units: &[PERCENT_PLACEHOLDER],
        unit: "%",
    },
    UnitOverride {
        family: Some("KESKINOPEUS"),
        provider_units: &["km/h", "kmh", "km"],
        unit: "km/h",
    },
];

/// Units for keys that arrive without one, by key family, first match wins.
const DEFAULT_UNITS: [(&str, &str); 3] = [
    ("KESKINOPEUS", "km/h"),
    ("OHITUKSET", "count"),
    ("VVAPAAS", "%"),
];

fn in_family(key: &str, family: &str) -> bool {
    key.to_uppercase().contains(family)
}

/// Resolves the unit of a measurement.
///
/// # Examples
///
/// ```
/// use digitraffic_road::resolve_unit;
///
/// assert_eq!(resolve_unit("KELI_1", Some("***")).as_deref(), Some("%"));
/// assert_eq!(resolve_unit("KESKINOPEUS_60MIN_KIINTEA_SUUNTA1", Some("kmh")).as_deref(), Some("km/h"));
/// assert_eq!(resolve_unit("ILMA", Some("°C")).as_deref(), Some("°C"));
/// assert_eq!(resolve_unit("OHITUKSET_60MIN_KIINTEA_SUUNTA1", None).as_deref(), Some("count"));
/// assert_eq!(resolve_unit("ILMA", None), None);
/// ```
pub fn resolve_unit(key: &str, provider_unit: Option<&str>) -> Option<String> {
    let provider_unit = provider_unit.map(str::trim).filter(|u| !u.is_empty());

    if let Some(unit) = provider_unit {
        let overridden = UNIT_OVERRIDES.iter().find(|rule| {
            rule.provider_units.contains(&unit)
                && rule.family.map_or(true, |family| in_family(key, family))
        });
        return Some(overridden.map_or(unit, |rule| rule.unit).to_string());
    }

    DEFAULT_UNITS
        .iter()
        .find(|(family, _)| in_family(key, family))
        .map(|(_, unit)| unit.to_string())
}
