//! Life Here Score: a weighted average of neighborhood sub-scores.
//!
//! Sub-scores come from the third-party data proxies (dining, commute,
//! convenience, lifestyle). Each is clamped to 0-100 before weighting;
//! the composite is rounded to one decimal place. Weights sum to 1.0.

use serde::Serialize;

/// Weight applied to the dining sub-score.
pub const WEIGHT_DINING: f64 = 0.30;
/// Weight applied to the commute sub-score.
pub const WEIGHT_COMMUTE: f64 = 0.25;
/// Weight applied to the convenience sub-score.
pub const WEIGHT_CONVENIENCE: f64 = 0.20;
/// Weight applied to the lifestyle sub-score.
pub const WEIGHT_LIFESTYLE: f64 = 0.25;

/// Raw sub-scores for one location, each on a 0-100 scale.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SubScores {
    pub dining: f64,
    pub commute: f64,
    pub convenience: f64,
    pub lifestyle: f64,
}

/// Composite score plus the (clamped) inputs it was computed from.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LifeHereScore {
    pub composite: f64,
    pub components: SubScores,
}

fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Compute the composite Life Here Score for a set of sub-scores.
pub fn life_here_score(raw: SubScores) -> LifeHereScore {
    let components = SubScores {
        dining: clamp_score(raw.dining),
        commute: clamp_score(raw.commute),
        convenience: clamp_score(raw.convenience),
        lifestyle: clamp_score(raw.lifestyle),
    };

    let weighted = components.dining * WEIGHT_DINING
        + components.commute * WEIGHT_COMMUTE
        + components.convenience * WEIGHT_CONVENIENCE
        + components.lifestyle * WEIGHT_LIFESTYLE;

    LifeHereScore {
        composite: (weighted * 10.0).round() / 10.0,
        components,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        let sum = WEIGHT_DINING + WEIGHT_COMMUTE + WEIGHT_CONVENIENCE + WEIGHT_LIFESTYLE;
        assert!((sum - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn uniform_inputs_produce_the_same_composite() {
        let score = life_here_score(SubScores {
            dining: 80.0,
            commute: 80.0,
            convenience: 80.0,
            lifestyle: 80.0,
        });
        assert_eq!(score.composite, 80.0);
    }

    #[test]
    fn composite_is_the_weighted_average() {
        let score = life_here_score(SubScores {
            dining: 90.0,
            commute: 60.0,
            convenience: 70.0,
            lifestyle: 80.0,
        });
        // 90*.30 + 60*.25 + 70*.20 + 80*.25 = 27 + 15 + 14 + 20 = 76.0
        assert_eq!(score.composite, 76.0);
    }

    #[test]
    fn out_of_range_inputs_are_clamped() {
        let score = life_here_score(SubScores {
            dining: 150.0,
            commute: -20.0,
            convenience: 100.0,
            lifestyle: 0.0,
        });
        assert_eq!(score.components.dining, 100.0);
        assert_eq!(score.components.commute, 0.0);
        // 100*.30 + 0 + 100*.20 + 0 = 50.0
        assert_eq!(score.composite, 50.0);
    }

    #[test]
    fn composite_rounds_to_one_decimal() {
        let score = life_here_score(SubScores {
            dining: 77.0,
            commute: 77.0,
            convenience: 77.7,
            lifestyle: 77.0,
        });
        // 77*.8 + 77.7*.2 = 61.6 + 15.54 = 77.14 -> 77.1
        assert_eq!(score.composite, 77.1);
    }
}
