//! Attribute requirement catalog
//!
//! Static (position, role, duty) -> key/preferred attribute lists, loaded once
//! and never mutated afterwards. Lookups are a strict three-level walk: a miss
//! at any level is `CatalogError::NotFound`, never a default requirement.
//!
//! - `roles` - code/name directory used to canonicalise role identifiers
//! - `source` - embedded default data and file/env resolution

pub mod roles;
pub mod source;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::CatalogError;
use crate::models::{Duty, PositionRequirement};

pub use roles::{RoleDirectory, RoleEntry, RoleIdentifier};
pub use source::{
    default_catalog, load_catalog, resolve_catalog_path, CatalogSource, LoadedCatalog,
    CATALOG_PATH_ENV, EMBEDDED_CATALOG_YAML,
};

pub const CATALOG_SCHEMA_VERSION: u32 = 1;

type DutyTable = BTreeMap<Duty, PositionRequirement>;
type RoleTable = BTreeMap<String, DutyTable>;

/// On-disk catalog layout (YAML or JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub schema_version: u32,
    #[serde(default)]
    pub roles: Vec<RoleEntry>,
    /// position code -> role name -> duty -> requirement
    #[serde(default)]
    pub positions: BTreeMap<String, RoleTable>,
}

/// Something worth flagging in otherwise loadable catalog data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    /// Neither key nor preferred attributes; every player would score 0.
    Degenerate { position: String, role: String, duty: Duty },
    /// Attribute listed as both key and preferred.
    Overlap { position: String, role: String, duty: Duty, attributes: Vec<String> },
    /// Role name used under a position but missing from the role directory.
    UnlistedRole { position: String, role: String },
}

#[derive(Debug, Clone, Default)]
pub struct AttributeCatalog {
    roles: RoleDirectory,
    positions: BTreeMap<String, RoleTable>,
}

impl AttributeCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn from_file_data(file: CatalogFile) -> Result<Self, CatalogError> {
        if file.schema_version != CATALOG_SCHEMA_VERSION {
            return Err(CatalogError::SchemaVersion {
                found: file.schema_version,
                expected: CATALOG_SCHEMA_VERSION,
            });
        }
        let catalog = Self {
            roles: RoleDirectory::from_entries(file.roles)?,
            positions: file.positions,
        };
        catalog.log_diagnostics();
        Ok(catalog)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        Self::from_file_data(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Self::from_file_data(serde_json::from_str(json)?)
    }

    /// Load a catalog file, picking the parser from the extension.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let text = std::fs::read_to_string(path)?;
        match ext.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            Some("json") => Self::from_json_str(&text),
            _ => Err(CatalogError::UnsupportedFormat { path: path.display().to_string() }),
        }
    }

    /// Requirement for a (position, role, duty) triple.
    ///
    /// A role code missing from the directory fails with
    /// `CatalogError::UnknownRoleCode` before the walk starts; every other miss
    /// is `CatalogError::NotFound`. Both are configuration gaps, so callers
    /// that only care about "is this defined" should test
    /// [`CatalogError::is_lookup_miss`].
    pub fn get_requirement(
        &self,
        position: &str,
        role: &RoleIdentifier,
        duty: Duty,
    ) -> Result<&PositionRequirement, CatalogError> {
        let role_name = self.roles.canonical_name(role)?;
        self.positions
            .get(position)
            .and_then(|roles| roles.get(role_name))
            .and_then(|duties| duties.get(&duty))
            .ok_or_else(|| CatalogError::NotFound {
                position: position.to_string(),
                role: role_name.to_string(),
                duty,
            })
    }

    pub fn roles(&self) -> &RoleDirectory {
        &self.roles
    }

    pub fn position_codes(&self) -> impl Iterator<Item = &str> {
        self.positions.keys().map(String::as_str)
    }

    pub fn roles_for(&self, position: &str) -> Vec<&str> {
        self.positions
            .get(position)
            .map(|roles| roles.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn duties_for(&self, position: &str, role_name: &str) -> Vec<Duty> {
        self.positions
            .get(position)
            .and_then(|roles| roles.get(role_name))
            .map(|duties| duties.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Number of (position, role, duty) entries.
    pub fn len(&self) -> usize {
        self.positions
            .values()
            .flat_map(|roles| roles.values())
            .map(|duties| duties.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn diagnostics(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();
        for (position, roles) in &self.positions {
            for (role, duties) in roles {
                if !self.roles.is_empty() && self.roles.code_for(role).is_none() {
                    issues.push(CatalogIssue::UnlistedRole {
                        position: position.clone(),
                        role: role.clone(),
                    });
                }
                for (duty, req) in duties {
                    if req.is_degenerate() {
                        issues.push(CatalogIssue::Degenerate {
                            position: position.clone(),
                            role: role.clone(),
                            duty: *duty,
                        });
                    }
                    let overlap = req.overlapping_attributes();
                    if !overlap.is_empty() {
                        issues.push(CatalogIssue::Overlap {
                            position: position.clone(),
                            role: role.clone(),
                            duty: *duty,
                            attributes: overlap.into_iter().map(str::to_string).collect(),
                        });
                    }
                }
            }
        }
        issues
    }

    fn log_diagnostics(&self) {
        for issue in self.diagnostics() {
            match issue {
                CatalogIssue::Degenerate { position, role, duty } => {
                    tracing::warn!(%position, %role, %duty, "requirement has no attributes");
                }
                CatalogIssue::Overlap { position, role, duty, attributes } => {
                    tracing::warn!(%position, %role, %duty, ?attributes, "attributes listed as both key and preferred");
                }
                CatalogIssue::UnlistedRole { position, role } => {
                    tracing::debug!(%position, %role, "role has no code in the directory");
                }
            }
        }
        tracing::info!(
            positions = self.positions.len(),
            roles = self.roles.len(),
            entries = self.len(),
            "attribute catalog loaded"
        );
    }
}

/// Builds a catalog in code, mainly for synthetic catalogs in tests.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    roles: Vec<RoleEntry>,
    positions: BTreeMap<String, RoleTable>,
}

impl CatalogBuilder {
    pub fn role(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.roles.push(RoleEntry { code: code.into(), name: name.into() });
        self
    }

    pub fn requirement(
        mut self,
        position: impl Into<String>,
        role_name: impl Into<String>,
        duty: Duty,
        requirement: PositionRequirement,
    ) -> Self {
        self.positions
            .entry(position.into())
            .or_default()
            .entry(role_name.into())
            .or_default()
            .insert(duty, requirement);
        self
    }

    pub fn build(self) -> Result<AttributeCatalog, CatalogError> {
        AttributeCatalog::from_file_data(CatalogFile {
            schema_version: CATALOG_SCHEMA_VERSION,
            roles: self.roles,
            positions: self.positions,
        })
    }
}
