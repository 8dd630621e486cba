//! Data model shared by the catalog, the scoring engine and tactic analysis.

pub mod player;
pub mod requirement;

pub use player::{AttributeValue, PlayerAttributes, PlayerSnapshot};
pub use requirement::{Duty, ParseDutyError, PositionRequirement};
