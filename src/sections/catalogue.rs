//! A small built-in catalogue of Finnish road sections (E-roads, national
//! roads and regional roads around Helsinki, Tampere, Turku and Oulu).

use crate::types::road_section::{RoadSection, SectionFeature};

pub const ROAD_SECTIONS: [RoadSection; 12] = [
    RoadSection {
        id: "E18_0_50",
        name: "E18: Tietokatu",
        road: "E18",
        location: "Tietokatu",
        km_range: "0.0-50.0",
        description: "Helsinki - Kilo area",
    },
    RoadSection {
        id: "E18_50_100",
        name: "E18: Kehä III - Espoo boundary",
        road: "E18",
        location: "Kehä III - Espoo boundary",
        km_range: "50.0-100.0",
        description: "Espoo area",
    },
    RoadSection {
        id: "E75_0_40",
        name: "E75: Hakamäentie",
        road: "E75",
        location: "Hakamäentie",
        km_range: "0.0-40.0",
        description: "Helsinki - Turku road start",
    },
    RoadSection {
        id: "E75_40_100",
        name: "E75: Lohja area",
        road: "E75",
        location: "Lohja",
        km_range: "40.0-100.0",
        description: "Lohja - Turku area",
    },
    RoadSection {
        id: "VT1_0_50",
        name: "VT1: Hämeentie",
        road: "VT1",
        location: "Hämeentie",
        km_range: "0.0-50.0",
        description: "Helsinki - Tampere start",
    },
    RoadSection {
        id: "VT1_50_120",
        name: "VT1: Karviainen area",
        road: "VT1",
        location: "Karviainen",
        km_range: "50.0-120.0",
        description: "Inland towards Tampere",
    },
    RoadSection {
        id: "VT3_0_45",
        name: "VT3: Länsimetro area",
        road: "VT3",
        location: "Länsimetro",
        km_range: "0.0-45.0",
        description: "Helsinki - Turku alternative route start",
    },
    RoadSection {
        id: "VT4_0_50",
        name: "VT4: Tuusula area",
        road: "VT4",
        location: "Tuusula",
        km_range: "0.0-50.0",
        description: "Helsinki - Oulu start",
    },
    RoadSection {
        id: "VT4_50_130",
        name: "VT4: Perämerentie",
        road: "VT4",
        location: "Perämerentie",
        km_range: "50.0-130.0",
        description: "Oulu direction - central area",
    },
    RoadSection {
        id: "VT4_130_200",
        name: "VT4: Oulu area",
        road: "VT4",
        location: "Oulu",
        km_range: "130.0-200.0",
        description: "Oulu region",
    },
    RoadSection {
        id: "ST101_0_30",
        name: "ST101: Itäväylä",
        road: "ST101",
        location: "Itäväylä",
        km_range: "0.0-30.0",
        description: "Helsinki east ring road",
    },
    RoadSection {
        id: "ST105_0_25",
        name: "ST105: Westbound area",
        road: "ST105",
        location: "Westbound",
        km_range: "0.0-25.0",
        description: "Helsinki west area",
    },
];

pub fn find_section(id: &str) -> Option<&'static RoadSection> {
    ROAD_SECTIONS.iter().find(|s| s.id == id)
}

/// Case-insensitive substring search over road, location, name and description.
///
/// # Examples
///
/// ```
/// use digitraffic_road::search_sections;
///
/// let hits = search_sections("vt4");
/// assert_eq!(hits.len(), 3);
/// assert!(search_sections("   ").is_empty());
/// ```
pub fn search_sections(query: &str) -> Vec<&'static RoadSection> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    ROAD_SECTIONS
        .iter()
        .filter(|s| {
            [s.road, s.location, s.name, s.description]
                .iter()
                .any(|field| field.to_lowercase().contains(&query))
        })
        .collect()
}

/// The catalogue as resolver metadata.
pub fn mock_section_features() -> Vec<SectionFeature> {
    ROAD_SECTIONS.iter().map(SectionFeature::from).collect()
}
