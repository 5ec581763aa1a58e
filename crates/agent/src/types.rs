use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Unique identifier for any agent placed in the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the player character.
    pub const PLAYER: Self = Self(0);

    /// Returns true if this entity represents the player.
    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<EntityId> for Value {
    fn from(id: EntityId) -> Self {
        Value::from(id.0)
    }
}

/// Discrete grid position expressed in tile coordinates.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Tile distance with diagonal steps (Chebyshev).
    pub fn distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Moves up to `max_steps` tiles toward `target`, diagonals allowed.
    pub fn step_toward(self, target: Self, max_steps: u32) -> Self {
        Self::new(
            step_axis(self.x, target.x, max_steps),
            step_axis(self.y, target.y, max_steps),
        )
    }

    /// Shifts the position, stopping at the edge of the grid.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

fn step_axis(from: i32, to: i32, max_steps: u32) -> i32 {
    let limit = i64::from(max_steps);
    let delta = (i64::from(to) - i64::from(from)).clamp(-limit, limit);
    // Lands between `from` and `to`, so it always fits
    i32::try_from(i64::from(from) + delta).unwrap_or(to)
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<Position> for Value {
    fn from(position: Position) -> Self {
        json!({ "x": position.x, "y": position.y })
    }
}

/// Simulation step counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}
