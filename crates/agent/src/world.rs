//! The world context lent to agents on every tick.
//!
//! The world tracks where every agent stands and records what they did, one
//! [`WorldEvent`] per performed action. Rendering and map loading live
//! elsewhere; this is the minimal state the stock actions operate on.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::{AgentError, Result};
use crate::types::{EntityId, Position, Tick};

/// Default distance at which agents can kick or talk to each other.
pub const DEFAULT_INTERACT_RANGE: u32 = 1;

/// Something an agent did during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorldEvent {
    Moved {
        tick: Tick,
        actor: EntityId,
        from: Position,
        to: Position,
    },
    Kicked {
        tick: Tick,
        actor: EntityId,
        target: EntityId,
    },
    Talked {
        tick: Tick,
        actor: EntityId,
        target: EntityId,
    },
    Stood {
        tick: Tick,
        actor: EntityId,
    },
}

impl WorldEvent {
    pub fn actor(&self) -> EntityId {
        match *self {
            Self::Moved { actor, .. }
            | Self::Kicked { actor, .. }
            | Self::Talked { actor, .. }
            | Self::Stood { actor, .. } => actor,
        }
    }

    pub fn tick(&self) -> Tick {
        match *self {
            Self::Moved { tick, .. }
            | Self::Kicked { tick, .. }
            | Self::Talked { tick, .. }
            | Self::Stood { tick, .. } => tick,
        }
    }
}

/// Agent positions, the event log, and the RNG used for wandering.
#[derive(Debug)]
pub struct World {
    tick: Tick,
    positions: BTreeMap<EntityId, Position>,
    events: Vec<WorldEvent>,
    rng: StdRng,
    interact_range: u32,
}

impl World {
    /// Creates an empty world whose random choices are derived from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            tick: Tick::ZERO,
            positions: BTreeMap::new(),
            events: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            interact_range: DEFAULT_INTERACT_RANGE,
        }
    }

    #[must_use]
    pub fn with_interact_range(mut self, range: u32) -> Self {
        self.interact_range = range;
        self
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn interact_range(&self) -> u32 {
        self.interact_range
    }

    pub fn events(&self) -> &[WorldEvent] {
        &self.events
    }

    /// Events recorded for `actor`, oldest first.
    pub fn events_of(&self, actor: EntityId) -> impl Iterator<Item = &WorldEvent> + '_ {
        self.events.iter().filter(move |event| event.actor() == actor)
    }

    /// Advances the simulation clock by one tick.
    pub fn advance(&mut self) -> Tick {
        self.tick = self.tick.next();
        self.tick
    }

    /// Places a new entity.
    pub fn spawn(&mut self, id: EntityId, position: Position) -> Result<()> {
        if self.positions.contains_key(&id) {
            return Err(AgentError::DuplicateEntity(id));
        }
        self.positions.insert(id, position);
        debug!(entity = %id, %position, "spawned entity");
        Ok(())
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn position(&self, id: EntityId) -> Result<Position> {
        self.positions
            .get(&id)
            .copied()
            .ok_or(AgentError::UnknownEntity(id))
    }

    pub fn distance(&self, a: EntityId, b: EntityId) -> Result<u32> {
        Ok(self.position(a)?.distance(self.position(b)?))
    }

    /// Moves `actor` up to `speed` tiles toward `destination`.
    pub fn move_toward(
        &mut self,
        actor: EntityId,
        destination: Position,
        speed: u32,
    ) -> Result<Position> {
        let from = self.position(actor)?;
        let to = from.step_toward(destination, speed);
        self.positions.insert(actor, to);
        self.events.push(WorldEvent::Moved {
            tick: self.tick,
            actor,
            from,
            to,
        });
        Ok(to)
    }

    pub fn kick(&mut self, actor: EntityId, target: EntityId) -> Result<()> {
        self.position(actor)?;
        self.position(target)?;
        self.events.push(WorldEvent::Kicked {
            tick: self.tick,
            actor,
            target,
        });
        Ok(())
    }

    pub fn talk(&mut self, actor: EntityId, target: EntityId) -> Result<()> {
        self.position(actor)?;
        self.position(target)?;
        self.events.push(WorldEvent::Talked {
            tick: self.tick,
            actor,
            target,
        });
        Ok(())
    }

    pub fn stand(&mut self, actor: EntityId) -> Result<()> {
        self.position(actor)?;
        self.events.push(WorldEvent::Stood {
            tick: self.tick,
            actor,
        });
        Ok(())
    }

    /// Picks a destination `min..max` tiles away from `from` on each axis,
    /// in a random direction per axis.
    pub fn random_destination(&mut self, from: Position, min: i32, max: i32) -> Position {
        let mut roll = || {
            let distance = if min < max {
                self.rng.gen_range(min..max)
            } else {
                min
            };
            if self.rng.gen_bool(0.5) {
                -distance
            } else {
                distance
            }
        };
        let dx = roll();
        let dy = roll();
        from.offset(dx, dy)
    }
}
