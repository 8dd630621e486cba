//! Role duties and per-role attribute requirements

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Tactical duty refining a role's attribute priorities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Duty {
    Defend,
    Support,
    Attack,
    Stopper,
    Cover,
    Automatic,
}

impl Duty {
    pub const ALL: [Duty; 6] = [
        Duty::Defend,
        Duty::Support,
        Duty::Attack,
        Duty::Stopper,
        Duty::Cover,
        Duty::Automatic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Duty::Defend => "defend",
            Duty::Support => "support",
            Duty::Attack => "attack",
            Duty::Stopper => "stopper",
            Duty::Cover => "cover",
            Duty::Automatic => "automatic",
        }
    }
}

impl fmt::Display for Duty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown duty: {0}")]
pub struct ParseDutyError(pub String);

impl FromStr for Duty {
    type Err = ParseDutyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Duty::ALL
            .into_iter()
            .find(|d| d.as_str() == lowered)
            .ok_or_else(|| ParseDutyError(s.to_string()))
    }
}

/// Key and preferred attribute names for one (position, role, duty) triple.
///
/// Both lists keep catalog order; the recruitment advisor reads the leading
/// entries. Well-formed data keeps the two lists disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRequirement {
    #[serde(rename = "key", alias = "key_attributes", default)]
    pub key_attributes: Vec<String>,
    #[serde(rename = "preferred", alias = "preferred_attributes", default)]
    pub preferred_attributes: Vec<String>,
}

impl PositionRequirement {
    pub fn new<K, P>(key: K, preferred: P) -> Self
    where
        K: IntoIterator,
        K::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            key_attributes: key.into_iter().map(Into::into).collect(),
            preferred_attributes: preferred.into_iter().map(Into::into).collect(),
        }
    }

    /// No key and no preferred attributes: every player scores 0.
    pub fn is_degenerate(&self) -> bool {
        self.key_attributes.is_empty() && self.preferred_attributes.is_empty()
    }

    /// Attributes listed as both key and preferred.
    pub fn overlapping_attributes(&self) -> Vec<&str> {
        self.key_attributes
            .iter()
            .filter(|k| self.preferred_attributes.contains(k))
            .map(String::as_str)
            .collect()
    }

    /// Every referenced attribute, key first.
    pub fn all_attributes(&self) -> impl Iterator<Item = &str> {
        self.key_attributes
            .iter()
            .chain(self.preferred_attributes.iter())
            .map(String::as_str)
    }
}
