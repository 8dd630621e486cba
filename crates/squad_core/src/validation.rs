//! Validation for imported player snapshots
//!
//! Import tooling runs these checks before handing snapshots to the scoring
//! engine. The engine itself accepts any values and never rejects a snapshot.

use crate::models::PlayerSnapshot;
use std::fmt;

/// Ability figures (CA/PA) use the 1-200 scale.
pub const ABILITY_MIN: u8 = 1;
pub const ABILITY_MAX: u8 = 200;

/// Attributes use the 1-20 scale.
pub const ATTRIBUTE_MIN: u8 = 1;
pub const ATTRIBUTE_MAX: u8 = 20;

/// Oldest age accepted on import.
pub const AGE_MAX: u8 = 60;

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    InvalidName(String),

    InvalidAge(u8),

    /// Current ability outside 1-200
    InvalidCA(u8),

    /// Potential ability outside 1-200
    InvalidPA(u8),

    InvalidAttribute { attribute: String, value: u8 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidName(msg) => write!(f, "Invalid name: {}", msg),
            ValidationError::InvalidAge(age) => {
                write!(f, "Invalid age: {}. Must be at most {}", age, AGE_MAX)
            }
            ValidationError::InvalidCA(ca) => {
                write!(f, "Invalid CA: {}. Must be between {} and {}", ca, ABILITY_MIN, ABILITY_MAX)
            }
            ValidationError::InvalidPA(pa) => {
                write!(f, "Invalid PA: {}. Must be between {} and {}", pa, ABILITY_MIN, ABILITY_MAX)
            }
            ValidationError::InvalidAttribute { attribute, value } => write!(
                f,
                "Invalid attribute {}: {}. Must be between {} and {}",
                attribute, value, ATTRIBUTE_MIN, ATTRIBUTE_MAX
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

pub struct PlayerValidator;

impl PlayerValidator {
    pub fn validate_name(name: &str) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::InvalidName("Name cannot be empty".to_string()));
        }
        if name.chars().count() > 100 {
            return Err(ValidationError::InvalidName(
                "Name cannot exceed 100 characters".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_age(age: u8) -> Result<(), ValidationError> {
        if age > AGE_MAX {
            return Err(ValidationError::InvalidAge(age));
        }
        Ok(())
    }

    pub fn validate_ca(ca: u8) -> Result<(), ValidationError> {
        if !(ABILITY_MIN..=ABILITY_MAX).contains(&ca) {
            return Err(ValidationError::InvalidCA(ca));
        }
        Ok(())
    }

    pub fn validate_pa(pa: u8) -> Result<(), ValidationError> {
        if !(ABILITY_MIN..=ABILITY_MAX).contains(&pa) {
            return Err(ValidationError::InvalidPA(pa));
        }
        Ok(())
    }

    pub fn validate_attribute(attribute: &str, value: u8) -> Result<(), ValidationError> {
        if !(ATTRIBUTE_MIN..=ATTRIBUTE_MAX).contains(&value) {
            return Err(ValidationError::InvalidAttribute {
                attribute: attribute.to_string(),
                value,
            });
        }
        Ok(())
    }

    /// Validate every populated field of a snapshot, stopping at the first error.
    pub fn validate_snapshot(player: &PlayerSnapshot) -> Result<(), ValidationError> {
        Self::validate_name(&player.name)?;
        if let Some(age) = player.age {
            Self::validate_age(age)?;
        }
        if let Some(ca) = player.current_ability {
            Self::validate_ca(ca)?;
        }
        if let Some(pa) = player.potential_ability {
            Self::validate_pa(pa)?;
        }
        for (name, value) in player.attributes.iter() {
            Self::validate_attribute(name, value)?;
        }
        Ok(())
    }
}
