//! Types shared by the places client and its callers.

use serde::{Deserialize, Serialize};

/// The place listing categories the provider can be queried for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceCategory {
    Dining,
    Events,
    Attractions,
}

impl PlaceCategory {
    /// Provider path segment for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dining => "dining",
            Self::Events => "events",
            Self::Attractions => "attractions",
        }
    }
}

/// Raw neighborhood sub-scores as returned by the provider, before
/// clamping and weighting.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSubScores {
    pub dining: f64,
    pub commute: f64,
    pub convenience: f64,
    pub lifestyle: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_path_segments() {
        assert_eq!(PlaceCategory::Dining.as_str(), "dining");
        assert_eq!(PlaceCategory::Events.as_str(), "events");
        assert_eq!(PlaceCategory::Attractions.as_str(), "attractions");
    }

    #[test]
    fn category_serializes_lowercase() {
        let json = serde_json::to_string(&PlaceCategory::Attractions).unwrap();
        assert_eq!(json, "\"attractions\"");
    }
}
