use serde::{Deserialize, Serialize};

/// A road section from the built-in catalogue. Static reference data used
/// for searching and for labelling mock conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoadSection {
    pub id: &'static str,
    /// Display name, e.g. `"VT4: Oulu area"`.
    pub name: &'static str,
    pub road: &'static str,
    pub location: &'static str,
    /// Kilometre range along the road, e.g. `"130.0-200.0"`.
    pub km_range: &'static str,
    pub description: &'static str,
}

/// One entry of the provider's forecast-section metadata, as used for
/// token-overlap matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionFeature {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl SectionFeature {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: Some(description.into()),
        }
    }
}

impl From<&RoadSection> for SectionFeature {
    fn from(section: &RoadSection) -> Self {
        SectionFeature::new(
            section.id,
            format!("{} {} {}", section.name, section.location, section.description),
        )
    }
}
