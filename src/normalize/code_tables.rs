//! Fixed enumerated-code tables.
//!
//! Both tables are plain constant data: extending them never touches the
//! lookup logic below.

use crate::types::language::Language;
use crate::types::measurement::MeasurementValue;

/// The code families Digitraffic reports as enumerations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeDomain {
    /// Overall and reason road-condition codes of forecast sections, e.g. `POOR_CONDITION`.
    RoadCondition,
    /// WMO code table 4677 (present weather), reported by `VALLITSEVA_SÄÄ`.
    Weather,
}

/// Road-condition codes as `(code, finnish, english)`.
pub(crate) const ROAD_CONDITION_CODES: [(&str, &str, &str); 13] = [
    ("NORMAL_CONDITION", "Normaali ajokeli", "Normal driving conditions"),
    ("POOR_CONDITION", "Huono ajokeli", "Poor driving conditions"),
    ("EXTREMELY_POOR_CONDITION", "Erittäin huono ajokeli", "Extremely poor driving conditions"),
    ("CONDITION_COULD_NOT_BE_RESOLVED", "Ajokeliä ei voitu määrittää", "Condition could not be resolved"),
    ("DRY", "Kuiva", "Dry"),
    ("MOIST", "Kostea", "Moist"),
    ("WET", "Märkä", "Wet"),
    ("SLUSH", "Sohjoinen", "Slush"),
    ("FROST", "Kuurainen", "Frost"),
    ("PARTLY_ICY", "Osittain jäinen", "Partly icy"),
    ("ICE", "Jäinen", "Icy"),
    ("SNOW", "Luminen", "Snow"),
    ("WET_SNOW", "Märkä lumi", "Wet snow"),
];

/// WMO 4677 present-weather descriptions as `(finnish, english)`, indexed by code.
pub(crate) const WMO_CODES: [(&str, &str); 100] = [
    ("Ei merkittävää säätä", "No significant weather"),
    ("Pilvisyys vähentynyt", "Clouds dissolving"),
    ("Pilvipeite muuttumaton", "State of sky unchanged"),
    ("Pilvisyys lisääntynyt", "Clouds developing"),
    ("Näkyvyys heikentynyt savun tai tulivuorentuhkan takia", "Visibility reduced by smoke or volcanic ash"),
    ("Utua", "Haze"),
    ("Leijailevaa pölyä ilmassa", "Widespread dust in suspension"),
    ("Pölyä tai hiekkaa pyörteissä", "Dust or sand raised by wind"),
    ("Hyvin kehittyneitä pöly- tai hiekkapyörteitä", "Well developed dust or sand whirls"),
    ("Pölymyrsky tai hiekkamyrsky", "Duststorm or sandstorm"),
    ("Kostea sumu", "Mist"),
    ("Ohutta sumua tai utua laikkuina", "Patches of shallow fog"),
    ("Yhtenäistä ohutta sumua tai utua", "Continuous shallow fog"),
    ("Salamoita näkyvissä, ukkosta ei kuulu", "Lightning visible, no thunder heard"),
    ("Sadetta ei saavu maahan", "Precipitation not reaching ground"),
    ("Sadetta saapuu maahan kaukana", "Precipitation reaching ground, distant"),
    ("Sadetta saapuu maahan lähellä", "Precipitation reaching ground, near"),
    ("Ukkosta mutta ei sadetta", "Thunderstorm but no precipitation"),
    ("Rajuja puuskia", "Squalls"),
    ("Pyörremyrsky", "Funnel cloud"),
    ("Tihkusadetta tai lumijyväsiä", "Drizzle or snow grains"),
    ("Vesisadetta", "Rain"),
    ("Lumisadetta", "Snow"),
    ("Räntäsadetta", "Rain and snow"),
    ("Jäätävää tihkua tai jäätävää vesisadetta", "Freezing drizzle or freezing rain"),
    ("Kuurosadetta", "Shower of rain"),
    ("Lumikuuroja tai räntäkuuroja", "Shower of snow or rain and snow"),
    ("Raekuuroja", "Shower of hail"),
    ("Sumua tai jääsumua", "Fog or ice fog"),
    ("Ukkosta", "Thunderstorm"),
    ("Lievä tai kohtalainen pölymyrsky, vähentynyt", "Slight or moderate duststorm, decreased"),
    ("Lievä tai kohtalainen pölymyrsky, muuttumaton", "Slight or moderate duststorm, no change"),
    ("Lievä tai kohtalainen pölymyrsky, voimistunut", "Slight or moderate duststorm, increased"),
    ("Voimakas pölymyrsky, vähentynyt", "Severe duststorm, decreased"),
    ("Voimakas pölymyrsky, muuttumaton", "Severe duststorm, no change"),
    ("Voimakas pölymyrsky, voimistunut", "Severe duststorm, increased"),
    ("Lievä tai kohtalainen tuiskuava lumi", "Slight or moderate drifting snow, below eye level"),
    ("Voimakas tuiskuava lumi", "Heavy drifting snow, below eye level"),
    ("Lievä tai kohtalainen tuiskuava lumi, vähentynyt", "Slight or moderate drifting snow, above eye level"),
    ("Voimakas tuiskuava lumi, vähentynyt", "Heavy drifting snow, above eye level"),
    ("Sumua kaukana", "Fog at a distance"),
    ("Sumua laikkuina", "Fog in patches"),
    ("Sumua, taivas näkyvissä, ohentunut", "Fog, sky visible, thinning"),
    ("Sumua, taivas ei näkyvissä, ohentunut", "Fog, sky invisible, thinning"),
    ("Sumua, taivas näkyvissä, muuttumaton", "Fog, sky visible, no change"),
    ("Sumua, taivas ei näkyvissä, muuttumaton", "Fog, sky invisible, no change"),
    ("Sumua, taivas näkyvissä, muodostunut", "Fog, sky visible, begun or thickened"),
    ("Sumua, taivas ei näkyvissä, muodostunut", "Fog, sky invisible, begun or thickened"),
    ("Sumua, kuuraavaa, taivas näkyvissä", "Fog, depositing rime, sky visible"),
    ("Sumua, kuuraavaa, taivas ei näkyvissä", "Fog, depositing rime, sky invisible"),
    ("Ajoittaista tihkua, heikko", "Drizzle, intermittent, slight"),
    ("Jatkuvaa tihkua, heikko", "Drizzle, continuous, slight"),
    ("Ajoittaista tihkua, kohtalainen", "Drizzle, intermittent, moderate"),
    ("Jatkuvaa tihkua, kohtalainen", "Drizzle, continuous, moderate"),
    ("Ajoittaista tihkua, voimakas", "Drizzle, intermittent, heavy"),
    ("Jatkuvaa tihkua, voimakas", "Drizzle, continuous, heavy"),
    ("Heikko jäätävä tihku", "Drizzle, freezing, slight"),
    ("Kohtalainen tai voimakas jäätävä tihku", "Drizzle, freezing, moderate or heavy"),
    ("Heikko tihku ja vesi", "Drizzle and rain, slight"),
    ("Kohtalainen tai voimakas tihku ja vesi", "Drizzle and rain, moderate or heavy"),
    ("Ajoittaista vesisadetta, heikko", "Rain, intermittent, slight"),
    ("Jatkuvaa vesisadetta, heikko", "Rain, continuous, slight"),
    ("Ajoittaista vesisadetta, kohtalainen", "Rain, intermittent, moderate"),
    ("Jatkuvaa vesisadetta, kohtalainen", "Rain, continuous, moderate"),
    ("Ajoittaista vesisadetta, voimakas", "Rain, intermittent, heavy"),
    ("Jatkuvaa vesisadetta, voimakas", "Rain, continuous, heavy"),
    ("Heikko jäätävä vesisade", "Rain, freezing, slight"),
    ("Kohtalainen tai voimakas jäätävä vesisade", "Rain, freezing, moderate or heavy"),
    ("Heikko räntäsade", "Rain and snow, slight"),
    ("Kohtalainen tai voimakas räntäsade", "Rain and snow, moderate or heavy"),
    ("Ajoittaista lumisadetta, heikko", "Snow, intermittent, slight"),
    ("Jatkuvaa lumisadetta, heikko", "Snow, continuous, slight"),
    ("Ajoittaista lumisadetta, kohtalainen", "Snow, intermittent, moderate"),
    ("Jatkuvaa lumisadetta, kohtalainen", "Snow, continuous, moderate"),
    ("Ajoittaista lumisadetta, voimakas", "Snow, intermittent, heavy"),
    ("Jatkuvaa lumisadetta, voimakas", "Snow, continuous, heavy"),
    ("Jääkiteitä (pilareita, neulosia)", "Ice crystals (diamond dust)"),
    ("Lumijyväsiä", "Snow grains"),
    ("Yksittäisiä tähdenmuotoisia lumikiteitä", "Isolated star-like snow crystals"),
    ("Jääjyväsiä", "Ice pellets"),
    ("Heikko vesikuuro", "Rain shower, slight"),
    ("Kohtalainen tai voimakas vesikuuro", "Rain shower, moderate or heavy"),
    ("Erittäin voimakas vesikuuro", "Rain shower, violent"),
    ("Heikko räntäkuuro", "Shower of rain and snow, slight"),
    ("Kohtalainen tai voimakas räntäkuuro", "Shower of rain and snow, moderate or heavy"),
    ("Heikko lumikuuro", "Snow shower, slight"),
    ("Kohtalainen tai voimakas lumikuuro", "Snow shower, moderate or heavy"),
    ("Heikko lumirakeita tai räntää", "Shower of snow pellets or small hail, slight"),
    ("Kohtalainen tai voimakas lumirakeita tai räntää", "Shower of snow pellets or small hail, moderate or heavy"),
    ("Heikko raekuuro", "Shower of hail, slight"),
    ("Kohtalainen tai voimakas raekuuro", "Shower of hail, moderate or heavy"),
    ("Heikko vesisade, ukkonen viimeisen tunnin aikana", "Slight rain, thunderstorm during past hour"),
    ("Kohtalainen tai voimakas vesisade, ukkonen", "Moderate or heavy rain, thunderstorm"),
    ("Heikko lumi- tai räntäsade, ukkonen", "Slight snow or rain and snow, thunderstorm"),
    ("Kohtalainen tai voimakas lumi- tai räntäsade, ukkonen", "Moderate or heavy snow or rain and snow, thunderstorm"),
    ("Heikko tai kohtalainen ukkonen, vesi- tai lumisade", "Slight or moderate thunderstorm with rain or snow"),
    ("Heikko tai kohtalainen ukkonen, raesade", "Slight or moderate thunderstorm with hail"),
    ("Voimakas ukkonen, vesi- tai lumisade", "Heavy thunderstorm with rain or snow"),
    ("Voimakas ukkonen, pölymyrsky", "Thunderstorm with duststorm"),
    ("Voimakas ukkonen, raesade", "Heavy thunderstorm with hail"),
];

fn pick(language: Language, fi: &'static str, en: &'static str) -> &'static str {
    match language {
        Language::Fi => fi,
        Language::En => en,
    }
}

pub fn road_condition_text(code: &str, language: Language) -> Option<&'static str> {
    ROAD_CONDITION_CODES
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, fi, en)| pick(language, fi, en))
}

pub fn wmo_text(code: i64, language: Language) -> Option<&'static str> {
    usize::try_from(code)
        .ok()
        .and_then(|index| WMO_CODES.get(index))
        .map(|(fi, en)| pick(language, fi, en))
}

fn unknown_code(domain: CodeDomain, code: &str, language: Language) -> String {
    match (domain, language) {
        (CodeDomain::Weather, Language::Fi) => format!("Tuntematon sääkoodi: {}", code),
        (CodeDomain::Weather, Language::En) => format!("Unknown weather code: {}", code),
        (CodeDomain::RoadCondition, Language::Fi) => format!("Tuntematon kelikoodi: {}", code),
        (CodeDomain::RoadCondition, Language::En) => format!("Unknown road condition code: {}", code),
    }
}

/// Translates a WMO present-weather value.
///
/// Numeric values (including numeric strings such as `"61.0"`) are truncated
/// to an integer code; codes outside the table produce a language-tagged
/// placeholder. Non-numeric text is returned unchanged.
///
/// # Examples
///
/// ```
/// use digitraffic_road::{translate_wmo_code, Language, MeasurementValue};
///
/// let rain = MeasurementValue::Number(61.0);
/// assert_eq!(translate_wmo_code(&rain, Language::En), "Rain, continuous, slight");
/// assert_eq!(
///     translate_wmo_code(&MeasurementValue::Number(150.0), Language::Fi),
///     "Tuntematon sääkoodi: 150"
/// );
/// ```
pub fn translate_wmo_code(value: &MeasurementValue, language: Language) -> String {
    let Some(number) = value.as_f64().filter(|n| n.is_finite()) else {
        return value.to_string();
    };
    let code = number.trunc() as i64;
    wmo_text(code, language)
        .map(str::to_string)
        .unwrap_or_else(|| unknown_code(CodeDomain::Weather, &code.to_string(), language))
}

/// Looks `code` up in the table of `domain` by exact key.
pub fn translate_code(domain: CodeDomain, code: &str, language: Language) -> String {
    match domain {
        CodeDomain::RoadCondition => road_condition_text(code, language)
            .map(str::to_string)
            .unwrap_or_else(|| unknown_code(domain, code, language)),
        CodeDomain::Weather => {
            translate_wmo_code(&MeasurementValue::Text(code.to_string()), language)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_complete() {
        assert_eq!(WMO_CODES.len(), 100);
        assert_eq!(wmo_text(0, Language::Fi), Some("Ei merkittävää säätä"));
        assert_eq!(wmo_text(99, Language::En), Some("Heavy thunderstorm with hail"));
        assert_eq!(wmo_text(-1, Language::En), None);
        assert_eq!(wmo_text(100, Language::En), None);
    }

    #[test]
    fn road_codes_translate_by_exact_key() {
        assert_eq!(
            translate_code(CodeDomain::RoadCondition, "POOR_CONDITION", Language::En),
            "Poor driving conditions"
        );
        assert_eq!(
            translate_code(CodeDomain::RoadCondition, "ICE", Language::Fi),
            "Jäinen"
        );
        assert_eq!(
            translate_code(CodeDomain::RoadCondition, "poor_condition", Language::En),
            "Unknown road condition code: poor_condition"
        );
    }

    #[test]
    fn wmo_values_accept_numbers_and_numeric_text() {
        assert_eq!(
            translate_wmo_code(&MeasurementValue::Text("71".into()), Language::Fi),
            "Jatkuvaa lumisadetta, heikko"
        );
        assert_eq!(
            translate_wmo_code(&MeasurementValue::Number(22.7), Language::En),
            "Snow"
        );
        assert_eq!(
            translate_code(CodeDomain::Weather, "120", Language::En),
            "Unknown weather code: 120"
        );
        assert_eq!(
            translate_wmo_code(&MeasurementValue::Text("n/a".into()), Language::En),
            "n/a"
        );
    }
}
