//! Per-position ranking and squad coverage classification

use serde::{Deserialize, Serialize};
use std::fmt;

use super::engine::{score_player, PlayerPositionScore};
use crate::models::{PlayerSnapshot, PositionRequirement};

/// Number of ranked entries kept for display.
pub const RANKED_DISPLAY_LIMIT: usize = 5;

/// Second-best score needed to count as a backup.
pub const BACKUP_MIN_SCORE: u8 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageLevel {
    Excellent,
    Good,
    Adequate,
    Poor,
    Critical,
}

impl CoverageLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageLevel::Excellent => "excellent",
            CoverageLevel::Good => "good",
            CoverageLevel::Adequate => "adequate",
            CoverageLevel::Poor => "poor",
            CoverageLevel::Critical => "critical",
        }
    }

    /// Poor and critical positions get recruitment targets.
    pub fn needs_recruitment(&self) -> bool {
        matches!(self, CoverageLevel::Poor | CoverageLevel::Critical)
    }
}

impl fmt::Display for CoverageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify coverage from scores sorted best first.
///
/// First matching rung wins. The backup condition only gates the top two
/// rungs: a lone 85 is `Adequate`, not `Excellent`.
pub fn classify_coverage(sorted_scores: &[u8]) -> CoverageLevel {
    let Some(&top) = sorted_scores.first() else {
        return CoverageLevel::Critical;
    };
    let has_backup = sorted_scores.get(1).is_some_and(|&s| s >= BACKUP_MIN_SCORE);

    if top >= 80 && has_backup {
        CoverageLevel::Excellent
    } else if top >= 70 && has_backup {
        CoverageLevel::Good
    } else if top >= 60 {
        CoverageLevel::Adequate
    } else if top >= 40 {
        CoverageLevel::Poor
    } else {
        CoverageLevel::Critical
    }
}

/// Ranking and coverage for one position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionAnalysis {
    /// Best first, at most `RANKED_DISPLAY_LIMIT` entries.
    pub ranked_scores: Vec<PlayerPositionScore>,
    /// Mean over every scored player, not only the displayed ones.
    pub average_score: f64,
    pub coverage_level: CoverageLevel,
    pub players_scored: usize,
}

impl PositionAnalysis {
    pub fn top(&self) -> Option<&PlayerPositionScore> {
        self.ranked_scores.first()
    }

    pub fn top_score(&self) -> u8 {
        self.top().map(PlayerPositionScore::score).unwrap_or(0)
    }
}

/// Sort best first. The sort is stable: equal scores keep input order.
pub fn rank_scores(scores: &mut [PlayerPositionScore]) {
    scores.sort_by(|a, b| b.score().cmp(&a.score()));
}

/// Score every player for one requirement, rank them and classify coverage.
pub fn analyze_position(requirement: &PositionRequirement, players: &[PlayerSnapshot]) -> PositionAnalysis {
    if requirement.is_degenerate() && !players.is_empty() {
        tracing::warn!(players = players.len(), "scoring against a requirement with no attributes");
    }

    let mut scores: Vec<PlayerPositionScore> =
        players.iter().map(|p| score_player(p, requirement)).collect();
    rank_scores(&mut scores);

    let sorted: Vec<u8> = scores.iter().map(PlayerPositionScore::score).collect();
    let coverage_level = classify_coverage(&sorted);

    let players_scored = scores.len();
    let average_score = if players_scored == 0 {
        0.0
    } else {
        sorted.iter().map(|&s| f64::from(s)).sum::<f64>() / players_scored as f64
    };

    scores.truncate(RANKED_DISPLAY_LIMIT);

    PositionAnalysis {
        ranked_scores: scores,
        average_score,
        coverage_level,
        players_scored,
    }
}
