//! Headless simulation client.
//!
//! # Architecture
//!
//! ```text
//! Simulation (tick loop)
//!   ├─→ World (positions, event log, seeded RNG)
//!   ├─→ Player agent (scripted orders)
//!   └─→ NPC agents (idle or wandering)
//! ```
//!
//! Every tick advances the world clock and updates each agent once, player
//! first. The player works through a script of orders, one batch at a time;
//! the run ends when the script is exhausted and the player's queue has
//! drained, or when the tick limit is hit.

mod builder;
pub mod config;
pub mod logging;

pub use builder::SimulationBuilder;
pub use config::SimConfig;

use std::collections::VecDeque;
use std::time::Duration;

use agent::{Agent, AgentState, EntityId, FollowUp, World};
use anyhow::{Context, Result};
use tokio::time;

/// One scripted player order: approach `target`, then interact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Order {
    pub target: EntityId,
    pub then: FollowUp,
}

/// Outcome of a finished run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub ticks: u64,
    pub events: usize,
    /// False if the tick limit was reached first.
    pub completed: bool,
    pub player_state: AgentState,
}

/// World and agents driven by a fixed-rate tick loop.
pub struct Simulation {
    world: World,
    player: Agent,
    npcs: Vec<Agent>,
    script: VecDeque<Order>,
    tick_limit: u64,
    tick_interval: Duration,
}

impl Simulation {
    /// Create a new SimulationBuilder.
    pub fn builder() -> SimulationBuilder {
        SimulationBuilder::new()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &Agent {
        &self.player
    }

    pub fn npcs(&self) -> &[Agent] {
        &self.npcs
    }

    /// Returns true once every order has been issued and carried out.
    pub fn is_done(&self) -> bool {
        self.script.is_empty()
            && !self.player.is_busy()
            && !matches!(self.player.state(), AgentState::Approach | AgentState::Run)
    }

    /// Runs ticks until the script is done or the tick limit is reached.
    ///
    /// # Errors
    ///
    /// Returns an error if the player cannot be given its next order or one
    /// of its actions fails.
    pub async fn run(mut self) -> Result<Summary> {
        let mut interval =
            (!self.tick_interval.is_zero()).then(|| time::interval(self.tick_interval));

        while !self.is_done() && self.world.tick().0 < self.tick_limit {
            if let Some(interval) = interval.as_mut() {
                interval.tick().await;
            }
            self.tick()?;
        }

        let summary = self.summary();
        if summary.completed {
            tracing::info!(ticks = summary.ticks, "script completed");
        } else {
            tracing::warn!(limit = self.tick_limit, "tick limit reached before script completed");
        }
        Ok(summary)
    }

    /// Advances the world by one tick.
    pub fn tick(&mut self) -> Result<()> {
        let tick = self.world.advance();

        if !self.player.is_busy()
            && let Some(order) = self.script.pop_front()
        {
            tracing::info!(%tick, target = %order.target, then = ?order.then, "player order");
            self.player
                .approach(order.target, order.then)
                .context("Failed to issue player order")?;
        }

        self.player
            .update(&mut self.world)
            .with_context(|| format!("Player action failed at {tick}"))?;

        for npc in &mut self.npcs {
            if let Err(e) = npc.update(&mut self.world) {
                tracing::warn!(agent = %npc.id(), "NPC action failed: {}", e);
                npc.stop();
            }
        }
        Ok(())
    }

    pub fn summary(&self) -> Summary {
        Summary {
            ticks: self.world.tick().0,
            events: self.world.events().len(),
            completed: self.is_done(),
            player_state: self.player.state(),
        }
    }
}
