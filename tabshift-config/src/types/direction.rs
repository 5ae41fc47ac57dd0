//! Move direction settings.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Configured direction in which the active tab is slid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Slide towards the start of the sequence
    Left,
    /// Slide towards the end of the sequence
    Right,
    /// Let the engine choose (currently always left)
    #[default]
    Auto,
}

impl Direction {
    /// Resolve `Auto` into a concrete direction.
    pub fn resolve(self) -> MoveDirection {
        match self {
            Direction::Left | Direction::Auto => MoveDirection::Left,
            Direction::Right => MoveDirection::Right,
        }
    }

    /// All directions for UI iteration
    pub fn all() -> &'static [Direction] {
        &[Direction::Left, Direction::Right, Direction::Auto]
    }

    /// Config keyword for this direction
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Auto => "auto",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "auto" => Ok(Direction::Auto),
            other => Err(ConfigError::Validation(format!(
                "unknown direction '{other}' (expected left, right or auto)"
            ))),
        }
    }
}

/// Concrete direction of a move request sent to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Left,
    Right,
}

impl fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveDirection::Left => f.write_str("left"),
            MoveDirection::Right => f.write_str("right"),
        }
    }
}
