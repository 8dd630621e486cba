//! Tactics and batch analysis
//!
//! A tactic is an ordered list of slots, each naming a position, a role and a
//! duty. Analysing a tactic scores the whole squad for every slot
//! independently.

pub mod analysis;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::{AttributeCatalog, RoleIdentifier};
use crate::error::{Result, SquadError};
use crate::models::{Duty, PlayerSnapshot};

pub use analysis::{
    analyze_tactic, rank_slots_for_player, SlotAnalysis, SlotFit, TacticAnalysis, UnresolvedSlot,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TacticSlot {
    /// Display label, e.g. `"DR"` or `"ST (left)"`
    pub label: String,
    /// Catalog position code
    pub position: String,
    pub role: RoleIdentifier,
    pub duty: Duty,
}

impl TacticSlot {
    pub fn new(label: impl Into<String>, position: impl Into<String>, role: RoleIdentifier, duty: Duty) -> Self {
        Self {
            label: label.into(),
            position: position.into(),
            role,
            duty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tactic {
    pub name: String,
    #[serde(default)]
    pub formation: Option<String>,
    pub slots: Vec<TacticSlot>,
}

/// Which tactic the application is currently analysing.
///
/// Held by the caller and passed around explicitly, so two sessions never
/// fight over a shared "active" flag.
#[derive(Debug, Clone, Default)]
pub struct AnalysisContext {
    active: Option<Arc<Tactic>>,
}

impl AnalysisContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `tactic` the active one, returning the previously active tactic.
    pub fn activate(&mut self, tactic: impl Into<Arc<Tactic>>) -> Option<Arc<Tactic>> {
        let tactic = tactic.into();
        tracing::debug!(tactic = %tactic.name, "activating tactic");
        self.active.replace(tactic)
    }

    pub fn deactivate(&mut self) -> Option<Arc<Tactic>> {
        self.active.take()
    }

    pub fn active(&self) -> Option<&Tactic> {
        self.active.as_deref()
    }

    /// Analyse the active tactic for `squad`.
    pub fn analyze_active(&self, catalog: &AttributeCatalog, squad: &[PlayerSnapshot]) -> Result<TacticAnalysis> {
        let tactic = self.active().ok_or(SquadError::NoActiveTactic)?;
        Ok(analyze_tactic(catalog, tactic, squad))
    }
}
