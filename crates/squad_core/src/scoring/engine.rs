//! Per-player suitability scoring
//!
//! Weighted-sum normalization:
//! - every key attribute contributes `value * KEY_WEIGHT` against a ceiling of
//!   `ATTRIBUTE_MAX * KEY_WEIGHT`, preferred attributes likewise with
//!   `PREFERRED_WEIGHT`
//! - the overall score divides the combined raw total by the combined ceiling,
//!   so a role with more key than preferred attributes leans on the key set
//!   accordingly (it is not the mean of the two sub-scores)
//! - absent attributes count as 0
//!
//! All percentages round half up.

use serde::{Deserialize, Serialize};

use crate::models::{AttributeValue, PlayerAttributes, PlayerSnapshot, PositionRequirement};

pub const KEY_WEIGHT: u32 = 2;
pub const PREFERRED_WEIGHT: u32 = 1;
/// Normalization ceiling for a single attribute.
pub const ATTRIBUTE_MAX: u32 = 20;
/// Values below this are reported as shortfalls.
pub const MIN_RECOMMENDED: AttributeValue = 12;

/// An attribute below `MIN_RECOMMENDED`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeShortfall {
    pub attribute: String,
    pub current: AttributeValue,
    pub recommended: AttributeValue,
}

/// Score breakdown for one attribute map against one requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeScore {
    /// Overall suitability, 0-100
    pub score: u8,
    pub key_attribute_score: u8,
    pub preferred_attribute_score: u8,
    pub missing_key_attributes: Vec<AttributeShortfall>,
    pub missing_preferred_attributes: Vec<AttributeShortfall>,
    /// Referenced attributes with no recorded value (scored as 0).
    pub unrecorded_attributes: Vec<String>,
    /// Referenced attributes that do have a value.
    pub recorded_attribute_count: usize,
}

impl AttributeScore {
    /// Nothing the requirement asks about was ever recorded for this player.
    ///
    /// The numeric score stays 0 in that case; this only lets callers tell an
    /// unscouted player apart from a genuinely poor fit.
    pub fn has_insufficient_data(&self) -> bool {
        self.recorded_attribute_count == 0 && !self.unrecorded_attributes.is_empty()
    }
}

/// Score of one player for one position requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPositionScore {
    pub player_id: u32,
    pub player_name: String,
    #[serde(flatten)]
    pub breakdown: AttributeScore,
}

impl PlayerPositionScore {
    pub fn score(&self) -> u8 {
        self.breakdown.score
    }
}

#[derive(Default)]
struct Tally {
    raw: u32,
    max: u32,
    missing: Vec<AttributeShortfall>,
}

fn tally(
    attributes: &PlayerAttributes,
    names: &[String],
    weight: u32,
    unrecorded: &mut Vec<String>,
    recorded: &mut usize,
) -> Tally {
    let mut t = Tally::default();
    for name in names {
        let value = attributes.get(name);
        if attributes.contains(name) {
            *recorded += 1;
        } else if !unrecorded.contains(name) {
            unrecorded.push(name.clone());
        }

        t.raw += u32::from(value) * weight;
        t.max += ATTRIBUTE_MAX * weight;

        if value < MIN_RECOMMENDED {
            t.missing.push(AttributeShortfall {
                attribute: name.clone(),
                current: value,
                recommended: MIN_RECOMMENDED,
            });
        }
    }
    t
}

/// `raw / max * 100`, rounded half up, 0 when `max` is 0.
///
/// Values above `ATTRIBUTE_MAX` saturate at 100.
pub(crate) fn percent(raw: u32, max: u32) -> u8 {
    if max == 0 {
        return 0;
    }
    let scaled = (u64::from(raw) * 200 + u64::from(max)) / (u64::from(max) * 2);
    scaled.min(100) as u8
}

/// Score an attribute map against a requirement.
pub fn score_attributes(
    attributes: &PlayerAttributes,
    requirement: &PositionRequirement,
) -> AttributeScore {
    let mut unrecorded = Vec::new();
    let mut recorded = 0;

    let key = tally(
        attributes,
        &requirement.key_attributes,
        KEY_WEIGHT,
        &mut unrecorded,
        &mut recorded,
    );
    let preferred = tally(
        attributes,
        &requirement.preferred_attributes,
        PREFERRED_WEIGHT,
        &mut unrecorded,
        &mut recorded,
    );

    AttributeScore {
        score: percent(key.raw + preferred.raw, key.max + preferred.max),
        key_attribute_score: percent(key.raw, key.max),
        preferred_attribute_score: percent(preferred.raw, preferred.max),
        missing_key_attributes: key.missing,
        missing_preferred_attributes: preferred.missing,
        unrecorded_attributes: unrecorded,
        recorded_attribute_count: recorded,
    }
}

/// Score one player snapshot against a requirement.
pub fn score_player(player: &PlayerSnapshot, requirement: &PositionRequirement) -> PlayerPositionScore {
    PlayerPositionScore {
        player_id: player.id,
        player_name: player.name.clone(),
        breakdown: score_attributes(&player.attributes, requirement),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fullback() -> PositionRequirement {
        PositionRequirement::new(
            ["Marking", "Tackling", "Positioning"],
            ["Pace", "Stamina"],
        )
    }

    #[test]
    fn perfect_player_scores_100() {
        let req = fullback();
        let attrs: PlayerAttributes = req.all_attributes().map(|a| (a, 20u8)).collect();
        let s = score_attributes(&attrs, &req);
        assert_eq!(s.score, 100);
        assert_eq!(s.key_attribute_score, 100);
        assert_eq!(s.preferred_attribute_score, 100);
        assert!(s.missing_key_attributes.is_empty());
        assert!(s.missing_preferred_attributes.is_empty());
    }

    #[test]
    fn combined_sum_not_average_of_subscores() {
        // key: 3 attrs at 20 -> 120/120, preferred: 2 attrs at 0 -> 0/40
        let req = fullback();
        let attrs = PlayerAttributes::new()
            .with("Marking", 20)
            .with("Tackling", 20)
            .with("Positioning", 20)
            .with("Pace", 0)
            .with("Stamina", 0);
        let s = score_attributes(&attrs, &req);
        assert_eq!(s.key_attribute_score, 100);
        assert_eq!(s.preferred_attribute_score, 0);
        // 120 / 160 = 75, where averaging the sub-scores would give 50
        assert_eq!(s.score, 75);
    }

    #[test]
    fn mixed_values_round_half_up() {
        let req = PositionRequirement::new(["Finishing"], ["Heading"]);
        // key 13*2 = 26/40, preferred 9/20, total 35/60 = 58.33
        let attrs = PlayerAttributes::new().with("Finishing", 13).with("Heading", 9);
        let s = score_attributes(&attrs, &req);
        assert_eq!(s.key_attribute_score, 65);
        assert_eq!(s.preferred_attribute_score, 45);
        assert_eq!(s.score, 58);

        // 1/40 * 100 = 2.5 -> 3
        assert_eq!(percent(1, 40), 3);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
    }

    #[test]
    fn empty_requirement_scores_zero() {
        let attrs = PlayerAttributes::new().with("Pace", 18);
        let s = score_attributes(&attrs, &PositionRequirement::default());
        assert_eq!(s.score, 0);
        assert_eq!(s.key_attribute_score, 0);
        assert_eq!(s.preferred_attribute_score, 0);
        assert!(!s.has_insufficient_data());
    }

    #[test]
    fn player_without_attributes_scores_zero() {
        let req = fullback();
        let s = score_attributes(&PlayerAttributes::new(), &req);
        assert_eq!(s.score, 0);
        assert_eq!(s.missing_key_attributes.len(), 3);
        assert_eq!(s.missing_preferred_attributes.len(), 2);
        assert!(s.missing_key_attributes.iter().all(|m| m.current == 0 && m.recommended == 12));
        assert!(s.has_insufficient_data());
        assert_eq!(s.unrecorded_attributes.len(), 5);
    }

    #[test]
    fn shortfall_threshold_is_strictly_below_twelve() {
        let req = PositionRequirement::new(["Marking", "Tackling"], Vec::<String>::new());
        let attrs = PlayerAttributes::new().with("Marking", 11).with("Tackling", 12);
        let s = score_attributes(&attrs, &req);
        assert_eq!(
            s.missing_key_attributes,
            vec![AttributeShortfall { attribute: "Marking".into(), current: 11, recommended: 12 }]
        );
    }

    #[test]
    fn shortfalls_keep_requirement_order() {
        let req = PositionRequirement::new(["Pace", "Acceleration", "Dribbling"], ["Flair"]);
        let attrs = PlayerAttributes::new().with("Acceleration", 15);
        let s = score_attributes(&attrs, &req);
        let names: Vec<_> = s.missing_key_attributes.iter().map(|m| m.attribute.as_str()).collect();
        assert_eq!(names, vec!["Pace", "Dribbling"]);
        assert_eq!(s.unrecorded_attributes, vec!["Pace", "Dribbling", "Flair"]);
        assert_eq!(s.recorded_attribute_count, 1);
        assert!(!s.has_insufficient_data());
    }

    #[test]
    fn values_above_scale_saturate() {
        let req = PositionRequirement::new(["Strength"], Vec::<String>::new());
        let attrs = PlayerAttributes::new().with("Strength", 25);
        assert_eq!(score_attributes(&attrs, &req).score, 100);
    }

    #[test]
    fn score_player_carries_identity() {
        let player = PlayerSnapshot::new(42, "Trent", PlayerAttributes::new().with("Marking", 10));
        let s = score_player(&player, &fullback());
        assert_eq!(s.player_id, 42);
        assert_eq!(s.player_name, "Trent");
        assert_eq!(s.score(), s.breakdown.score);
    }

    #[test]
    fn serialized_score_is_flat() {
        let player = PlayerSnapshot::new(1, "A", PlayerAttributes::new());
        let json = serde_json::to_value(score_player(&player, &fullback())).unwrap();
        assert_eq!(json["player_id"], 1);
        assert_eq!(json["score"], 0);
        assert!(json["missing_key_attributes"].is_array());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const NAMES: [&str; 8] = [
        "Marking", "Tackling", "Pace", "Passing", "Vision", "Finishing", "Heading", "Stamina",
    ];

    fn requirement_strategy() -> impl Strategy<Value = PositionRequirement> {
        (0usize..=4, 0usize..=4).prop_map(|(k, p)| {
            PositionRequirement::new(NAMES[..k].iter().copied(), NAMES[4..4 + p].iter().copied())
        })
    }

    fn attributes_strategy() -> impl Strategy<Value = PlayerAttributes> {
        proptest::collection::vec(proptest::option::of(1u8..=20), NAMES.len()).prop_map(|vals| {
            NAMES
                .iter()
                .zip(vals)
                .filter_map(|(n, v)| v.map(|v| (*n, v)))
                .collect()
        })
    }

    proptest! {
        /// Property: all scores stay within 0-100 for values on the 1-20 scale
        #[test]
        fn prop_scores_bounded(req in requirement_strategy(), attrs in attributes_strategy()) {
            let s = score_attributes(&attrs, &req);
            prop_assert!(s.score <= 100);
            prop_assert!(s.key_attribute_score <= 100);
            prop_assert!(s.preferred_attribute_score <= 100);
        }

        /// Property: scoring is a pure function of its inputs
        #[test]
        fn prop_deterministic(req in requirement_strategy(), attrs in attributes_strategy()) {
            prop_assert_eq!(score_attributes(&attrs, &req), score_attributes(&attrs, &req));
        }

        /// Property: overall score lies between the two sub-scores
        #[test]
        fn prop_overall_between_subscores(attrs in attributes_strategy()) {
            let req = PositionRequirement::new(["Marking", "Tackling"], ["Vision", "Finishing"]);
            let s = score_attributes(&attrs, &req);
            let lo = s.key_attribute_score.min(s.preferred_attribute_score);
            let hi = s.key_attribute_score.max(s.preferred_attribute_score);
            prop_assert!(s.score + 1 >= lo && s.score <= hi + 1);
        }
    }
}
