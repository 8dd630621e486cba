//! Recruitment target suggestions for thinly covered positions

use serde::{Deserialize, Serialize};

use super::coverage::{CoverageLevel, PositionAnalysis};
use super::engine::AttributeShortfall;
use crate::models::PositionRequirement;

/// Display threshold for priority (key) targets. Independent of `MIN_RECOMMENDED`.
pub const PRIORITY_TARGET: u8 = 14;
/// Display threshold for preferred targets.
pub const PREFERRED_TARGET: u8 = 12;

const PRIORITY_ATTRIBUTE_COUNT: usize = 3;
const PREFERRED_ATTRIBUTE_COUNT: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecruitmentSuggestion {
    pub position: String,
    /// e.g. `"Priority: Tackling 14+, Marking 14+, Strength 14+"`
    pub targets: Vec<String>,
    /// Key attributes the current best option falls short on.
    pub weak_key_attributes: Vec<String>,
    pub weak_preferred_attributes: Vec<String>,
}

impl RecruitmentSuggestion {
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

fn format_targets(names: &[String], take: usize, threshold: u8) -> String {
    names
        .iter()
        .take(take)
        .map(|name| format!("{} {}+", name, threshold))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Suggest targets for a position. Only poor or critical coverage yields any.
///
/// A requirement without key attributes gets no `Priority:` line; one without
/// preferred attributes gets no `Preferred:` line.
pub fn suggest_targets(
    position_label: &str,
    requirement: &PositionRequirement,
    coverage_level: CoverageLevel,
    missing_key_attributes: &[AttributeShortfall],
    missing_preferred_attributes: &[AttributeShortfall],
) -> RecruitmentSuggestion {
    let mut suggestion = RecruitmentSuggestion {
        position: position_label.to_string(),
        targets: Vec::new(),
        weak_key_attributes: Vec::new(),
        weak_preferred_attributes: Vec::new(),
    };

    if !coverage_level.needs_recruitment() {
        return suggestion;
    }

    if !requirement.key_attributes.is_empty() {
        suggestion.targets.push(format!(
            "Priority: {}",
            format_targets(&requirement.key_attributes, PRIORITY_ATTRIBUTE_COUNT, PRIORITY_TARGET)
        ));
    }
    if !requirement.preferred_attributes.is_empty() {
        suggestion.targets.push(format!(
            "Preferred: {}",
            format_targets(
                &requirement.preferred_attributes,
                PREFERRED_ATTRIBUTE_COUNT,
                PREFERRED_TARGET
            )
        ));
    }

    suggestion.weak_key_attributes =
        missing_key_attributes.iter().map(|m| m.attribute.clone()).collect();
    suggestion.weak_preferred_attributes =
        missing_preferred_attributes.iter().map(|m| m.attribute.clone()).collect();

    suggestion
}

/// `suggest_targets` fed from a finished analysis, using the top-ranked
/// player's shortfalls (none when nobody was scored).
pub fn suggest_for_analysis(
    position_label: &str,
    requirement: &PositionRequirement,
    analysis: &PositionAnalysis,
) -> RecruitmentSuggestion {
    let (missing_key, missing_preferred) = match analysis.top() {
        Some(top) => (
            top.breakdown.missing_key_attributes.as_slice(),
            top.breakdown.missing_preferred_attributes.as_slice(),
        ),
        None => (&[][..], &[][..]),
    };
    suggest_targets(
        position_label,
        requirement,
        analysis.coverage_level,
        missing_key,
        missing_preferred,
    )
}
