//! Report rendering for analysis results

use serde::{Deserialize, Serialize};
use squad_core::catalog::CatalogIssue;
use squad_core::scoring::MIN_RECOMMENDED;
use squad_core::{RoleDirectory, SlotFit, TacticAnalysis};
use std::fmt::Write as _;

pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// JSON envelope written by `analyze --format json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub schema_version: u32,
    /// RFC3339
    pub generated_at: String,
    pub catalog_source: String,
    pub analysis: TacticAnalysis,
}

impl AnalysisReport {
    pub fn new(analysis: TacticAnalysis, catalog_source: impl Into<String>) -> Self {
        Self {
            schema_version: REPORT_SCHEMA_VERSION,
            generated_at: chrono::Utc::now().to_rfc3339(),
            catalog_source: catalog_source.into(),
            analysis,
        }
    }
}

pub fn render_tactic_analysis(analysis: &TacticAnalysis) -> String {
    let mut out = String::new();
    let formation = analysis.formation.as_deref().unwrap_or("-");
    let _ = writeln!(out, "Tactic: {} ({})", analysis.tactic_name, formation);
    let _ = writeln!(
        out,
        "Squad: {} players   Average fitness: {:.1}",
        analysis.squad_size, analysis.average_fitness
    );

    for slot in &analysis.slots {
        let role = match &slot.role_code {
            Some(code) => format!("{} ({})", slot.role_name, code),
            None => slot.role_name.clone(),
        };
        let _ = writeln!(
            out,
            "\n[{}] {} - {}   coverage: {}   avg: {:.1}",
            slot.label, role, slot.duty, slot.analysis.coverage_level, slot.analysis.average_score
        );
        if slot.analysis.ranked_scores.is_empty() {
            let _ = writeln!(out, "    (no players)");
        }
        for (rank, entry) in slot.analysis.ranked_scores.iter().enumerate() {
            let _ = write!(
                out,
                "    {}. {:<24} {:>3}  (key {:>3}, preferred {:>3})",
                rank + 1,
                entry.player_name,
                entry.score(),
                entry.breakdown.key_attribute_score,
                entry.breakdown.preferred_attribute_score
            );
            if entry.breakdown.has_insufficient_data() {
                let _ = write!(out, "  [unscouted]");
            }
            let _ = writeln!(out);
        }
    }

    if !analysis.unresolved_slots.is_empty() {
        let _ = writeln!(out, "\nUnconfigured slots:");
        for slot in &analysis.unresolved_slots {
            let _ = writeln!(out, "    [{}] {}", slot.label, slot.reason);
        }
    }

    if !analysis.recruitment.is_empty() {
        let _ = writeln!(out, "\nRecruitment:");
        for suggestion in &analysis.recruitment {
            let _ = writeln!(out, "    {}: {}", suggestion.position, suggestion.targets.join(" | "));
        }
    }

    out
}

pub fn render_player_fits(player_name: &str, fits: &[SlotFit]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Position fit for {}", player_name);
    for fit in fits {
        let _ = writeln!(
            out,
            "    [{}] {:<26} {:<9} {:>3}",
            fit.label,
            fit.role_name,
            fit.duty.to_string(),
            fit.score.score()
        );
        let weak: Vec<String> = fit
            .score
            .breakdown
            .missing_key_attributes
            .iter()
            .map(|m| format!("{} {}", m.attribute, m.current))
            .collect();
        if !weak.is_empty() {
            let _ = writeln!(out, "        below {}: {}", MIN_RECOMMENDED, weak.join(", "));
        }
    }
    out
}

pub fn render_roles(roles: &RoleDirectory) -> String {
    let mut out = String::new();
    for entry in roles.entries() {
        let _ = writeln!(out, "{:<5} {}", entry.code, entry.name);
    }
    out
}

pub fn render_catalog_issues(issues: &[CatalogIssue]) -> String {
    let mut out = String::new();
    for issue in issues {
        let line = match issue {
            CatalogIssue::Degenerate { position, role, duty } => {
                format!("{} / {} / {}: no attributes", position, role, duty)
            }
            CatalogIssue::Overlap { position, role, duty, attributes } => format!(
                "{} / {} / {}: both key and preferred: {}",
                position,
                role,
                duty,
                attributes.join(", ")
            ),
            CatalogIssue::UnlistedRole { position, role } => {
                format!("{} / {}: role has no code", position, role)
            }
        };
        let _ = writeln!(out, "{}", line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use squad_core::{
        analyze_tactic, rank_slots_for_player, AttributeCatalog, Duty, PlayerAttributes,
        PlayerSnapshot, PositionRequirement, RoleIdentifier, Tactic, TacticSlot,
    };

    fn fixture() -> (AttributeCatalog, Tactic, Vec<PlayerSnapshot>) {
        let catalog = AttributeCatalog::builder()
            .role("P", "Poacher")
            .requirement("ST", "Poacher", Duty::Attack, PositionRequirement::new(["Finishing"], ["Composure"]))
            .build()
            .unwrap();
        let tactic = Tactic {
            name: "Counter".to_string(),
            formation: Some("4-4-2".to_string()),
            slots: vec![
                TacticSlot::new("ST", "ST", RoleIdentifier::code("P"), Duty::Attack),
                TacticSlot::new("GK", "GK", RoleIdentifier::code("SK"), Duty::Defend),
            ],
        };
        let squad = vec![
            PlayerSnapshot::new(1, "Finisher", PlayerAttributes::new().with("Finishing", 8)),
            PlayerSnapshot::new(2, "Unknown", PlayerAttributes::new()),
        ];
        (catalog, tactic, squad)
    }

    #[test]
    fn text_report_lists_slots_gaps_and_targets() {
        let (catalog, tactic, squad) = fixture();
        let text = render_tactic_analysis(&analyze_tactic(&catalog, &tactic, &squad));
        assert!(text.contains("Tactic: Counter (4-4-2)"));
        assert!(text.contains("[ST] Poacher (P) - attack   coverage: critical"));
        assert!(text.contains("[unscouted]"));
        assert!(text.contains("Unconfigured slots:"));
        assert!(text.contains("Unknown role code: SK"));
        assert!(text.contains("ST: Priority: Finishing 14+ | Preferred: Composure 12+"));
    }

    #[test]
    fn json_report_wraps_analysis() {
        let (catalog, tactic, squad) = fixture();
        let report = AnalysisReport::new(analyze_tactic(&catalog, &tactic, &squad), "embedded");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["schema_version"], 1);
        assert_eq!(json["catalog_source"], "embedded");
        assert_eq!(json["analysis"]["slots"][0]["analysis"]["coverage_level"], "critical");
        assert!(chrono::DateTime::parse_from_rfc3339(report.generated_at.as_str()).is_ok());
    }

    #[test]
    fn player_fit_lists_shortfalls() {
        let (catalog, tactic, squad) = fixture();
        let fits = rank_slots_for_player(&catalog, &tactic, &squad[0]);
        let text = render_player_fits("Finisher", &fits);
        assert!(text.contains("Position fit for Finisher"));
        assert!(text.contains("below 12: Finishing 8"));
    }
}
