use thiserror::Error;

use crate::models::{Duty, ParseDutyError};
use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// No requirement for this triple. This is a configuration gap, not a zero score.
    #[error("No requirement defined for {position} / {role} / {duty}")]
    NotFound {
        position: String,
        role: String,
        duty: Duty,
    },

    #[error("Unknown role code: {0}")]
    UnknownRoleCode(String),

    #[error("Duplicate role entry: {0}")]
    DuplicateRole(String),

    #[error("Unsupported catalog schema version: found {found}, expected {expected}")]
    SchemaVersion { found: u32, expected: u32 },

    #[error("Unsupported catalog format: {path}")]
    UnsupportedFormat { path: String },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// True for lookup misses (unknown role code included), false for load failures.
    pub fn is_lookup_miss(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. } | CatalogError::UnknownRoleCode(_))
    }
}

#[derive(Error, Debug)]
pub enum SquadError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Duty(#[from] ParseDutyError),

    #[error("No active tactic selected")]
    NoActiveTactic,
}

pub type Result<T> = std::result::Result<T, SquadError>;
