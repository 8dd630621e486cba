//! Squad Tool Library
//!
//! File-facing side of the scoring engine:
//! squad export (CSV / JSON) → `PlayerSnapshot`s, tactic file → `Tactic`,
//! analysis results → text / JSON reports.

pub mod report;
pub mod squad_import;

use anyhow::{bail, Context, Result};
use squad_core::Tactic;
use std::fs;
use std::path::Path;

pub use report::{
    render_catalog_issues, render_player_fits, render_roles, render_tactic_analysis,
    AnalysisReport,
};
pub use squad_import::{
    load_squad, parse_squad_csv, parse_squad_csv_reader, parse_squad_json, ParseStats,
};

/// Load a tactic definition from YAML or JSON.
///
/// # Arguments
///
/// * `path` - `.yaml` / `.yml` / `.json` file
pub fn load_tactic(path: &Path) -> Result<Tactic> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read tactic file: {}", path.display()))?;

    let tactic: Tactic = match path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()).as_deref() {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&text).context("Failed to parse tactic YAML")?,
        Some("json") => serde_json::from_str(&text).context("Failed to parse tactic JSON")?,
        _ => bail!("Unsupported tactic file (expected .yaml, .yml or .json): {}", path.display()),
    };

    if tactic.slots.is_empty() {
        bail!("Tactic '{}' has no slots", tactic.name);
    }
    Ok(tactic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use squad_core::{analyze_tactic, default_catalog, Duty, RoleIdentifier};
    use std::io::Write;

    const SAMPLE_TACTIC: &str = include_str!("../../../data/samples/tactic_4231.yaml");
    const SAMPLE_SQUAD: &str = include_str!("../../../data/samples/squad.csv");

    #[test]
    fn loads_yaml_tactic() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile()?;
        file.write_all(SAMPLE_TACTIC.as_bytes())?;

        let tactic = load_tactic(file.path())?;
        assert_eq!(tactic.slots.len(), 11);
        assert_eq!(tactic.slots[0].role, RoleIdentifier::code("SK"));
        assert_eq!(tactic.slots[0].duty, Duty::Support);
        Ok(())
    }

    #[test]
    fn rejects_empty_tactic() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
        file.write_all(br#"{ "name": "Nothing", "slots": [] }"#)?;
        assert!(load_tactic(file.path()).is_err());
        Ok(())
    }

    #[test]
    fn sample_files_analyse_against_embedded_catalog() -> Result<()> {
        let tactic: Tactic = serde_yaml::from_str(SAMPLE_TACTIC)?;
        let (squad, stats) = parse_squad_csv_reader(SAMPLE_SQUAD.as_bytes())?;
        assert_eq!(stats.failed, 0);

        let analysis = analyze_tactic(default_catalog()?, &tactic, &squad);
        assert!(analysis.unresolved_slots.is_empty(), "{:?}", analysis.unresolved_slots);
        assert_eq!(analysis.slots.len(), 11);
        assert!(analysis.average_fitness > 0.0);
        Ok(())
    }
}
