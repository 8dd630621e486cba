//! Player snapshot model
//!
//! A snapshot is one immutable reading of a player's attributes, as exported
//! from the game at a point in time. The scoring engine only ever reads one
//! snapshot at a time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute value on the in-game 1-20 scale.
pub type AttributeValue = u8;

/// Flat attribute name -> value map for one snapshot.
///
/// Names match exactly (case-sensitive). A name that is not present reads as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerAttributes(BTreeMap<String, AttributeValue>);

impl PlayerAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `name`, or 0 when the attribute was never recorded.
    pub fn get(&self, name: &str) -> AttributeValue {
        self.0.get(name).copied().unwrap_or(0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: AttributeValue) {
        self.0.insert(name.into(), value);
    }

    /// Builder-style insert, handy for fixtures.
    pub fn with(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, AttributeValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, AttributeValue)> for PlayerAttributes {
    fn from_iter<I: IntoIterator<Item = (S, AttributeValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Identity, ability figures and attributes for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub age: Option<u8>,
    /// Current ability (1-200)
    #[serde(default)]
    pub current_ability: Option<u8>,
    /// Potential ability (1-200)
    #[serde(default)]
    pub potential_ability: Option<u8>,
    #[serde(default)]
    pub attributes: PlayerAttributes,
}

impl PlayerSnapshot {
    pub fn new(id: u32, name: impl Into<String>, attributes: PlayerAttributes) -> Self {
        Self {
            id,
            name: name.into(),
            age: None,
            current_ability: None,
            potential_ability: None,
            attributes,
        }
    }
}
