//! # squad_core - Position Suitability Scoring for Football Manager Squads
//!
//! Given a player's attribute snapshot and the key/preferred attribute sets a
//! position, role and duty call for, computes a 0-100 suitability score, ranks
//! a squad per position and classifies how well each position is covered.
//!
//! ## Features
//! - Static requirement catalog with role code <-> name resolution
//! - Pure, deterministic scoring engine
//! - Coverage classification and recruitment suggestions
//! - Whole-tactic batch analysis (slots scored in parallel)

pub mod catalog;
pub mod error;
pub mod models;
pub mod scoring;
pub mod tactic;
pub mod validation;

pub use catalog::{
    default_catalog, load_catalog, AttributeCatalog, CatalogSource, LoadedCatalog, RoleDirectory,
    RoleIdentifier,
};
pub use error::{CatalogError, Result, SquadError};
pub use models::{Duty, PlayerAttributes, PlayerSnapshot, PositionRequirement};
pub use scoring::{
    analyze_position, classify_coverage, score_attributes, score_player, suggest_targets,
    AttributeScore, AttributeShortfall, CoverageLevel, PlayerPositionScore, PositionAnalysis,
    RecruitmentSuggestion,
};
pub use tactic::{
    analyze_tactic, rank_slots_for_player, AnalysisContext, SlotAnalysis, SlotFit, Tactic,
    TacticAnalysis, TacticSlot, UnresolvedSlot,
};
pub use validation::{PlayerValidator, ValidationError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
