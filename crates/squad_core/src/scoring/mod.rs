//! Position-suitability scoring
//!
//! - `engine` - one player against one requirement
//! - `coverage` - ranking and coverage classification for a position
//! - `recruitment` - target suggestions for poorly covered positions
//!
//! Everything here is pure: no I/O, no shared state.

pub mod coverage;
pub mod engine;
pub mod recruitment;

pub use coverage::{
    analyze_position, classify_coverage, rank_scores, CoverageLevel, PositionAnalysis,
    BACKUP_MIN_SCORE, RANKED_DISPLAY_LIMIT,
};
pub use engine::{
    score_attributes, score_player, AttributeScore, AttributeShortfall, PlayerPositionScore,
    ATTRIBUTE_MAX, KEY_WEIGHT, MIN_RECOMMENDED, PREFERRED_WEIGHT,
};
pub use recruitment::{
    suggest_for_analysis, suggest_targets, RecruitmentSuggestion, PREFERRED_TARGET,
    PRIORITY_TARGET,
};
