//! Known sensor keys of TMS (LAM) and road-weather stations.

/// Second-channel duplicates end with this suffix and are never normalized.
pub const DUPLICATE_CHANNEL_SUFFIX: &str = "_2";

/// The present-weather key, reported as a WMO 4677 code.
pub const PRESENT_WEATHER_KEY: &str = "VALLITSEVA_SÄÄ";

/// LAM measurement keys published for every TMS station, with English names.
pub const LAM_MEASUREMENTS: [(&str, &str); 18] = [
    ("KESKINOPEUS_5MIN_LIUKUVA_SUUNTA1", "Rolling avg speed 5min sliding dir 1"),
    ("KESKINOPEUS_5MIN_LIUKUVA_SUUNTA2", "Rolling avg speed 5min sliding dir 2"),
    ("KESKINOPEUS_5MIN_LIUKUVA_SUUNTA1_VVAPAAS1", "Rolling avg speed 5min pct of free-flow dir 1"),
    ("KESKINOPEUS_5MIN_LIUKUVA_SUUNTA2_VVAPAAS2", "Rolling avg speed 5min pct of free-flow dir 2"),
    ("KESKINOPEUS_60MIN_KIINTEA_SUUNTA1", "Fixed avg speed 60min dir 1"),
    ("KESKINOPEUS_60MIN_KIINTEA_SUUNTA2", "Fixed avg speed 60min dir 2"),
    ("KESKINOPEUS_5MIN_KIINTEA_SUUNTA1_VVAPAAS1", "Fixed avg speed 5min pct of free-flow dir 1"),
    ("KESKINOPEUS_5MIN_KIINTEA_SUUNTA2_VVAPAAS2", "Fixed avg speed 5min pct of free-flow dir 2"),
    ("OHITUKSET_5MIN_LIUKUVA_SUUNTA1", "Rolling count overtakes 5min dir 1"),
    ("OHITUKSET_5MIN_LIUKUVA_SUUNTA2", "Rolling count overtakes 5min dir 2"),
    ("OHITUKSET_5MIN_LIUKUVA_SUUNTA1_MS1", "Rolling count overtakes 5min lane 1 dir 1"),
    ("OHITUKSET_5MIN_LIUKUVA_SUUNTA2_MS2", "Rolling count overtakes 5min lane 2 dir 2"),
    ("OHITUKSET_5MIN_KIINTEA_SUUNTA1_MS1", "Fixed count overtakes 5min lane 1 dir 1"),
    ("OHITUKSET_5MIN_KIINTEA_SUUNTA2_MS2", "Fixed count overtakes 5min lane 2 dir 2"),
    ("OHITUKSET_60MIN_KIINTEA_SUUNTA1", "Fixed count overtakes 60min dir 1"),
    ("OHITUKSET_60MIN_KIINTEA_SUUNTA2", "Fixed count overtakes 60min dir 2"),
    ("OHITUKSET_60MIN_KIINTEA_SUUNTA1_MS1", "Fixed count overtakes 60min lane 1 dir 1"),
    ("OHITUKSET_60MIN_KIINTEA_SUUNTA2_MS2", "Fixed count overtakes 60min lane 2 dir 2"),
];

/// Sensor constants of a TMS station that the LAM keys refer to.
pub const TMS_CONSTANT_KEYS: [&str; 4] = ["VVAPAAS1", "VVAPAAS2", "MS1", "MS2"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherSensorProfile {
    pub key: &'static str,
    pub name_en: &'static str,
    /// Unit as Digitraffic reports it, `None` for text-valued sensors.
    pub unit: Option<&'static str>,
    /// Display the provider's free-text description instead of the raw code.
    pub use_description: bool,
}

const fn numeric(key: &'static str, name_en: &'static str, unit: &'static str) -> WeatherSensorProfile {
    WeatherSensorProfile {
        key,
        name_en,
        unit: Some(unit),
        use_description: false,
    }
}

const fn described(key: &'static str, name_en: &'static str) -> WeatherSensorProfile {
    WeatherSensorProfile {
        key,
        name_en,
        unit: None,
        use_description: true,
    }
}

pub const WEATHER_SENSOR_PROFILES: [WeatherSensorProfile; 22] = [
    numeric("ILMA", "Air temperature", "°C"),
    numeric("ILMA_DERIVAATTA", "Air temperature trend", "°C/h"),
    numeric("TIE_1", "Road temperature lane 1", "°C"),
    numeric("TIE_1_DERIVAATTA", "Road temperature trend lane 1", "°C/h"),
    numeric("MAA_1", "Ground temperature sensor 1", "°C"),
    numeric("KASTEPISTE", "Dew point", "°C"),
    numeric("JÄÄTYMISPISTE_1", "Freezing point sensor 1", "°C"),
    numeric("KESKITUULI", "Average wind speed", "m/s"),
    numeric("MAKSIMITUULI", "Maximum wind speed", "m/s"),
    numeric("TUULENSUUNTA", "Wind direction", "°"),
    numeric("ILMAN_KOSTEUS", "Relative humidity", "%"),
    numeric("ILMANPAINE", "Air pressure", "hPa"),
    numeric("JÄÄN_MÄÄRÄ1", "Ice amount 1", "mm"),
    described("SADE", "Weather description"),
    numeric("SADE_INTENSITEETTI", "Precipitation intensity", "mm/h"),
    numeric("SADESUMMA", "Precipitation sum", "mm"),
    described("SATEEN_OLOMUOTO_PWDXX", "Precipitation form"),
    numeric("NÄKYVYYS_KM", "Visibility", "km"),
    described("KELI_1", "Road condition lane 1"),
    described("VAROITUS_1", "Warning 1"),
    numeric("JOHTAVUUS_1", "Conductivity sensor 1", "mS"),
    WeatherSensorProfile {
        key: PRESENT_WEATHER_KEY,
        name_en: "Present weather",
        unit: None,
        use_description: false,
    },
];

/// Weather measurements a host should show without the user opting in.
pub const WEATHER_ENABLED_BY_DEFAULT: [&str; 11] = [
    "ILMA",
    "ILMANPAINE",
    "ILMAN_KOSTEUS",
    "JÄÄN_MÄÄRÄ1",
    "JÄÄTYMISPISTE_1",
    "KASTEPISTE",
    "MAA_1",
    "SADE_INTENSITEETTI",
    PRESENT_WEATHER_KEY,
    "KESKITUULI",
    "TUULENSUUNTA",
];

pub fn weather_profile(key: &str) -> Option<&'static WeatherSensorProfile> {
    WEATHER_SENSOR_PROFILES.iter().find(|p| p.key == key)
}

pub fn uses_description(key: &str) -> bool {
    weather_profile(key).is_some_and(|p| p.use_description)
}

pub fn is_enabled_by_default(key: &str) -> bool {
    WEATHER_ENABLED_BY_DEFAULT.contains(&key)
}

/// Built-in English name of a LAM or weather key.
pub fn english_name(key: &str) -> Option<&'static str> {
    LAM_MEASUREMENTS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, name)| *name)
        .or_else(|| weather_profile(key).map(|p| p.name_en))
}

/// True for second-channel duplicates such as `TIE_2`, regardless of case.
pub fn is_duplicate_channel(key: &str) -> bool {
    key.to_uppercase().ends_with(DUPLICATE_CHANNEL_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_channels_are_detected_case_insensitively() {
        assert!(is_duplicate_channel("TIE_2"));
        assert!(is_duplicate_channel("keli_2"));
        assert!(!is_duplicate_channel("KESKINOPEUS_5MIN_LIUKUVA_SUUNTA2"));
        assert!(!is_duplicate_channel("TIE_1"));
    }

    #[test]
    fn profiles_flag_description_keys() {
        assert!(uses_description("KELI_1"));
        assert!(uses_description("SATEEN_OLOMUOTO_PWDXX"));
        assert!(!uses_description("ILMA"));
        assert!(!uses_description(PRESENT_WEATHER_KEY));
        assert!(!uses_description("UNKNOWN"));
    }

    #[test]
    fn every_default_enabled_key_has_a_profile() {
        for key in WEATHER_ENABLED_BY_DEFAULT {
            assert!(weather_profile(key).is_some(), "{key} has no profile");
        }
        assert!(is_enabled_by_default("ILMA"));
        assert!(!is_enabled_by_default("SADE"));
    }

    #[test]
    fn english_names_cover_lam_and_weather_keys() {
        assert_eq!(
            english_name("OHITUKSET_60MIN_KIINTEA_SUUNTA2"),
            Some("Fixed count overtakes 60min dir 2")
        );
        assert_eq!(english_name("KASTEPISTE"), Some("Dew point"));
        assert_eq!(english_name("NOPE"), None);
    }
}
