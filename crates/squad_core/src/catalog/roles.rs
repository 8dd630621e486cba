//! Role code <-> role name directory
//!
//! Squad exports and tactic screens refer to roles by short code (`FB`, `CD`,
//! `W`), the requirement catalog is keyed by full role name (`Full Back`).
//! Every lookup resolves to the full name first.
//!
//! Codes are matched after trimming and upper-casing. Names match exactly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::CatalogError;

/// How a caller refers to a role.
///
/// Serialized as a single-key map, `{ code: FB }` or `{ name: Full Back }`, in
/// every format (YAML included), so tactic files never rely on guessing which
/// form a string is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RoleIdentifierRepr", into = "RoleIdentifierRepr")]
pub enum RoleIdentifier {
    Code(String),
    Name(String),
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RoleIdentifierRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl TryFrom<RoleIdentifierRepr> for RoleIdentifier {
    type Error = String;

    fn try_from(repr: RoleIdentifierRepr) -> Result<Self, Self::Error> {
        match (repr.code, repr.name) {
            (Some(code), None) => Ok(RoleIdentifier::Code(code)),
            (None, Some(name)) => Ok(RoleIdentifier::Name(name)),
            (Some(_), Some(_)) => Err("role must give either `code` or `name`, not both".to_string()),
            (None, None) => Err("role needs a `code` or a `name`".to_string()),
        }
    }
}

impl From<RoleIdentifier> for RoleIdentifierRepr {
    fn from(role: RoleIdentifier) -> Self {
        match role {
            RoleIdentifier::Code(code) => Self { code: Some(code), name: None },
            RoleIdentifier::Name(name) => Self { code: None, name: Some(name) },
        }
    }
}

impl RoleIdentifier {
    pub fn code(code: impl Into<String>) -> Self {
        RoleIdentifier::Code(code.into())
    }

    pub fn name(name: impl Into<String>) -> Self {
        RoleIdentifier::Name(name.into())
    }
}

impl fmt::Display for RoleIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleIdentifier::Code(c) => write!(f, "code {}", c),
            RoleIdentifier::Name(n) => f.write_str(n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleEntry {
    pub code: String,
    pub name: String,
}

/// Bidirectional code/name table. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct RoleDirectory {
    entries: Vec<RoleEntry>,
    by_code: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

impl RoleDirectory {
    /// Build from catalog entries. A repeated code or name is rejected.
    pub fn from_entries(entries: Vec<RoleEntry>) -> Result<Self, CatalogError> {
        let mut dir = RoleDirectory::default();
        for entry in entries {
            let code = normalize_code(&entry.code);
            if dir.by_code.contains_key(&code) {
                return Err(CatalogError::DuplicateRole(entry.code));
            }
            if dir.by_name.contains_key(&entry.name) {
                return Err(CatalogError::DuplicateRole(entry.name));
            }
            let idx = dir.entries.len();
            dir.by_code.insert(code.clone(), idx);
            dir.by_name.insert(entry.name.clone(), idx);
            dir.entries.push(RoleEntry { code, name: entry.name });
        }
        Ok(dir)
    }

    /// Canonical (full) role name for an identifier.
    ///
    /// Names pass through unchanged even when the directory has no entry for
    /// them; the catalog lookup decides whether they exist. Unknown codes fail.
    pub fn canonical_name<'a>(&'a self, role: &'a RoleIdentifier) -> Result<&'a str, CatalogError> {
        match role {
            RoleIdentifier::Name(name) => Ok(name.as_str()),
            RoleIdentifier::Code(code) => self
                .by_code
                .get(&normalize_code(code))
                .map(|&idx| self.entries[idx].name.as_str())
                .ok_or_else(|| CatalogError::UnknownRoleCode(code.clone())),
        }
    }

    pub fn code_for(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(|&idx| self.entries[idx].code.as_str())
    }

    pub fn entries(&self) -> &[RoleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
