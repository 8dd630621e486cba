use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{Tactic, TacticSlot};
use crate::catalog::{AttributeCatalog, RoleIdentifier};
use crate::models::{Duty, PlayerSnapshot};
use crate::scoring::{
    analyze_position, score_player, suggest_for_analysis, PlayerPositionScore, PositionAnalysis,
    RecruitmentSuggestion,
};

/// Analysis of one resolved tactic slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotAnalysis {
    pub label: String,
    pub position: String,
    pub role_name: String,
    pub role_code: Option<String>,
    pub duty: Duty,
    pub analysis: PositionAnalysis,
}

/// A slot with no catalog requirement. Needs configuring, not scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedSlot {
    pub label: String,
    pub position: String,
    pub role: RoleIdentifier,
    pub duty: Duty,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TacticAnalysis {
    pub tactic_name: String,
    pub formation: Option<String>,
    /// Resolved slots in tactic order.
    pub slots: Vec<SlotAnalysis>,
    pub unresolved_slots: Vec<UnresolvedSlot>,
    /// Suggestions for poor/critical slots, in tactic order.
    pub recruitment: Vec<RecruitmentSuggestion>,
    /// Mean of each resolved slot's best score; 0 when nothing resolved.
    pub average_fitness: f64,
    pub squad_size: usize,
}

/// One player's fit for one tactic slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotFit {
    pub label: String,
    pub position: String,
    pub role_name: String,
    pub duty: Duty,
    pub score: PlayerPositionScore,
}

enum SlotOutcome {
    Resolved(SlotAnalysis, Option<RecruitmentSuggestion>),
    Unresolved(UnresolvedSlot),
}

fn unresolved(slot: &TacticSlot, reason: String) -> UnresolvedSlot {
    UnresolvedSlot {
        label: slot.label.clone(),
        position: slot.position.clone(),
        role: slot.role.clone(),
        duty: slot.duty,
        reason,
    }
}

fn analyze_slot(catalog: &AttributeCatalog, slot: &TacticSlot, squad: &[PlayerSnapshot]) -> SlotOutcome {
    let requirement = match catalog.get_requirement(&slot.position, &slot.role, slot.duty) {
        Ok(req) => req,
        Err(e) => {
            tracing::warn!(slot = %slot.label, error = %e, "no requirement for tactic slot");
            return SlotOutcome::Unresolved(unresolved(slot, e.to_string()));
        }
    };
    let role_name = match catalog.roles().canonical_name(&slot.role) {
        Ok(name) => name.to_string(),
        Err(e) => return SlotOutcome::Unresolved(unresolved(slot, e.to_string())),
    };

    let analysis = analyze_position(requirement, squad);
    tracing::debug!(
        slot = %slot.label,
        role = %role_name,
        duty = %slot.duty,
        top = analysis.top_score(),
        coverage = %analysis.coverage_level,
        "slot analysed"
    );

    let suggestion = analysis
        .coverage_level
        .needs_recruitment()
        .then(|| suggest_for_analysis(&slot.label, requirement, &analysis));

    SlotOutcome::Resolved(
        SlotAnalysis {
            label: slot.label.clone(),
            position: slot.position.clone(),
            role_code: catalog.roles().code_for(&role_name).map(str::to_string),
            role_name,
            duty: slot.duty,
            analysis,
        },
        suggestion,
    )
}

/// Score the squad for every slot of a tactic.
///
/// Slots are analysed in parallel; results keep tactic order. Slots the
/// catalog cannot resolve are reported in `unresolved_slots` and left out of
/// `average_fitness`.
pub fn analyze_tactic(catalog: &AttributeCatalog, tactic: &Tactic, squad: &[PlayerSnapshot]) -> TacticAnalysis {
    let outcomes: Vec<SlotOutcome> = tactic
        .slots
        .par_iter()
        .map(|slot| analyze_slot(catalog, slot, squad))
        .collect();

    let mut slots = Vec::new();
    let mut unresolved_slots = Vec::new();
    let mut recruitment = Vec::new();
    for outcome in outcomes {
        match outcome {
            SlotOutcome::Resolved(analysis, suggestion) => {
                slots.push(analysis);
                recruitment.extend(suggestion);
            }
            SlotOutcome::Unresolved(slot) => unresolved_slots.push(slot),
        }
    }

    let average_fitness = if slots.is_empty() {
        0.0
    } else {
        slots.iter().map(|s| f64::from(s.analysis.top_score())).sum::<f64>() / slots.len() as f64
    };

    tracing::info!(
        tactic = %tactic.name,
        slots = slots.len(),
        unresolved = unresolved_slots.len(),
        average_fitness,
        "tactic analysed"
    );

    TacticAnalysis {
        tactic_name: tactic.name.clone(),
        formation: tactic.formation.clone(),
        slots,
        unresolved_slots,
        recruitment,
        average_fitness,
        squad_size: squad.len(),
    }
}

/// Score one player against every resolvable slot, best fit first.
///
/// Equal scores keep tactic order.
pub fn rank_slots_for_player(catalog: &AttributeCatalog, tactic: &Tactic, player: &PlayerSnapshot) -> Vec<SlotFit> {
    let mut fits: Vec<SlotFit> = tactic
        .slots
        .iter()
        .filter_map(|slot| {
            let requirement = catalog.get_requirement(&slot.position, &slot.role, slot.duty).ok()?;
            let role_name = catalog.roles().canonical_name(&slot.role).ok()?.to_string();
            Some(SlotFit {
                label: slot.label.clone(),
                position: slot.position.clone(),
                role_name,
                duty: slot.duty,
                score: score_player(player, requirement),
            })
        })
        .collect();
    fits.sort_by(|a, b| b.score.score().cmp(&a.score.score()));
    fits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlayerAttributes, PositionRequirement};
    use crate::scoring::CoverageLevel;

    fn catalog() -> AttributeCatalog {
        AttributeCatalog::builder()
            .role("CD", "Central Defender")
            .role("P", "Poacher")
            .requirement(
                "DC",
                "Central Defender",
                Duty::Defend,
                PositionRequirement::new(["Tackling", "Marking"], ["Strength"]),
            )
            .requirement("ST", "Poacher", Duty::Attack, PositionRequirement::new(["Finishing"], ["Composure"]))
            .build()
            .unwrap()
    }

    fn tactic() -> Tactic {
        Tactic {
            name: "Test 4-4-2".to_string(),
            formation: Some("4-4-2".to_string()),
            slots: vec![
                TacticSlot::new("DCR", "DC", RoleIdentifier::code("CD"), Duty::Defend),
                TacticSlot::new("ST", "ST", RoleIdentifier::name("Poacher"), Duty::Attack),
                TacticSlot::new("DM", "DM", RoleIdentifier::code("CD"), Duty::Defend),
                TacticSlot::new("AMC", "AMC", RoleIdentifier::code("AP"), Duty::Support),
            ],
        }
    }

    fn squad() -> Vec<PlayerSnapshot> {
        vec![
            PlayerSnapshot::new(
                1,
                "Stopper",
                PlayerAttributes::new().with("Tackling", 17).with("Marking", 16).with("Strength", 18),
            ),
            PlayerSnapshot::new(
                2,
                "Backup",
                PlayerAttributes::new().with("Tackling", 13).with("Marking", 13).with("Strength", 12),
            ),
            PlayerSnapshot::new(3, "Striker", PlayerAttributes::new().with("Finishing", 9)),
        ]
    }

    #[test]
    fn resolves_slots_in_order_and_reports_gaps() {
        let analysis = analyze_tactic(&catalog(), &tactic(), &squad());

        let labels: Vec<_> = analysis.slots.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["DCR", "ST"]);
        assert_eq!(analysis.slots[0].role_name, "Central Defender");
        assert_eq!(analysis.slots[0].role_code.as_deref(), Some("CD"));
        assert_eq!(analysis.slots[1].role_code.as_deref(), Some("P"));

        let gaps: Vec<_> = analysis.unresolved_slots.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(gaps, vec!["DM", "AMC"]);
        assert!(analysis.unresolved_slots[1].reason.contains("Unknown role code"));
        assert_eq!(analysis.squad_size, 3);
    }

    #[test]
    fn centre_back_coverage_and_average_fitness() {
        let analysis = analyze_tactic(&catalog(), &tactic(), &squad());

        // Stopper: (34+32+18)/100 = 84, Backup: (26+26+12)/100 = 64
        let dc = &analysis.slots[0].analysis;
        assert_eq!(dc.top_score(), 84);
        assert_eq!(dc.ranked_scores[1].score(), 64);
        assert_eq!(dc.coverage_level, CoverageLevel::Excellent);

        // Striker: 18/60 = 30 -> critical
        let st = &analysis.slots[1].analysis;
        assert_eq!(st.top_score(), 30);
        assert_eq!(st.coverage_level, CoverageLevel::Critical);

        assert!((analysis.average_fitness - 57.0).abs() < 1e-9);
    }

    #[test]
    fn recruitment_only_for_thin_slots() {
        let analysis = analyze_tactic(&catalog(), &tactic(), &squad());
        assert_eq!(analysis.recruitment.len(), 1);
        let st = &analysis.recruitment[0];
        assert_eq!(st.position, "ST");
        assert_eq!(st.targets, vec!["Priority: Finishing 14+", "Preferred: Composure 12+"]);
        assert_eq!(st.weak_key_attributes, vec!["Finishing"]);
    }

    #[test]
    fn empty_squad_gives_zero_fitness() {
        let analysis = analyze_tactic(&catalog(), &tactic(), &[]);
        assert_eq!(analysis.average_fitness, 0.0);
        assert!(analysis
            .slots
            .iter()
            .all(|s| s.analysis.coverage_level == CoverageLevel::Critical));
    }

    #[test]
    fn player_fits_sorted_best_first() {
        let squad = squad();
        let fits = rank_slots_for_player(&catalog(), &tactic(), &squad[0]);
        assert_eq!(fits.len(), 2);
        assert_eq!(fits[0].label, "DCR");
        assert_eq!(fits[0].score.score(), 84);
        assert_eq!(fits[1].label, "ST");
        assert_eq!(fits[1].score.score(), 0);
    }
}
