//! Simulation builder.

use std::collections::VecDeque;

use agent::{Agent, EntityId, FollowUp, Position, WanderRange, World, stock_table};
use anyhow::{Context, Result};

use crate::{Order, SimConfig, Simulation};

/// Builder for constructing a Simulation from configuration.
///
/// NPC `#1` stands still and is the target of the first order; every other
/// NPC wanders. Without an explicit script, the player kicks `#1` and then
/// talks to `#2`, skipping orders whose target was not placed.
#[derive(Default)]
pub struct SimulationBuilder {
    config: Option<SimConfig>,
    script: Option<Vec<Order>>,
}

impl SimulationBuilder {
    /// Create a new SimulationBuilder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration (required).
    pub fn config(mut self, config: SimConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the default player script.
    pub fn script(mut self, orders: impl IntoIterator<Item = Order>) -> Self {
        self.script = Some(orders.into_iter().collect());
        self
    }

    /// Build the Simulation.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is not set or an order targets
    /// an entity that was not placed.
    pub fn build(self) -> Result<Simulation> {
        let config = self
            .config
            .context("Config is required. Use .config() to set it.")?;

        let table = stock_table();
        let mut world = World::new(config.seed).with_interact_range(config.interact_range);

        world.spawn(EntityId::PLAYER, Position::ORIGIN)?;
        let player = Agent::player("player", table.clone()).with_speed(config.pc_speed);

        let mut npcs = Vec::new();
        for n in 1..=config.npc_count {
            let id = EntityId(n);
            world.spawn(id, npc_position(n))?;

            let npc = Agent::new(id, format!("npc-{n}"), table.clone());
            let npc = if n == 1 {
                npc
            } else {
                npc.with_wander(WanderRange::default())
            };
            npcs.push(npc);
        }

        let script = match self.script {
            Some(orders) => orders,
            None => default_script()
                .into_iter()
                .filter(|order| world.contains(order.target))
                .collect(),
        };
        for order in &script {
            if !world.contains(order.target) {
                anyhow::bail!("Order targets unknown entity {}", order.target);
            }
        }

        tracing::info!(
            npcs = npcs.len(),
            orders = script.len(),
            seed = config.seed,
            "simulation built"
        );

        Ok(Simulation {
            world,
            player,
            npcs,
            script: VecDeque::from(script),
            tick_limit: config.tick_limit,
            tick_interval: config.tick_interval,
        })
    }
}

fn default_script() -> [Order; 2] {
    [
        Order {
            target: EntityId(1),
            then: FollowUp::Kick,
        },
        Order {
            target: EntityId(2),
            then: FollowUp::Talk,
        },
    ]
}

fn npc_position(n: u32) -> Position {
    let n = i32::try_from(n).unwrap_or(i32::MAX);
    Position::new(n.saturating_mul(3), n.saturating_sub(1))
}
