//! Agents and their per-tick update.
//!
//! An [`Agent`] owns an [`ActionQueue`] and turns high-level commands ("run
//! there", "go kick him") into queue entries built from the stock commands.
//! The game loop calls [`Agent::update`] once per tick.

use std::sync::Arc;

use action_queue::builder::named;
use action_queue::{ActionQueue, Arguments, CheckRef};
use tracing::{debug, trace};

use crate::commands::{self, CommandTable, args_for};
use crate::error::Result;
use crate::types::{EntityId, Position};
use crate::world::World;

/// What an agent is currently busy with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AgentState {
    /// Freshly placed, nothing decided yet.
    #[default]
    None,
    /// Standing around.
    Idle,
    /// Moving toward another agent to interact with it.
    Approach,
    /// Running to a location.
    Run,
    /// Walking to a random nearby location.
    Wander,
    /// In a conversation.
    Talk,
}

/// Interaction performed once an approach brings the agent in range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FollowUp {
    Kick,
    Talk,
}

impl FollowUp {
    fn command(self) -> &'static str {
        match self {
            Self::Kick => commands::KICK,
            Self::Talk => commands::TALK,
        }
    }

    fn resting_state(self) -> AgentState {
        match self {
            Self::Kick => AgentState::Idle,
            Self::Talk => AgentState::Talk,
        }
    }
}

/// Distance band, in tiles per axis, for random wandering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WanderRange {
    pub min: i32,
    pub max: i32,
}

impl Default for WanderRange {
    fn default() -> Self {
        Self { min: 2, max: 4 }
    }
}

/// A player character or NPC driven by an action queue.
pub struct Agent {
    id: EntityId,
    name: String,
    speed: u32,
    state: AgentState,
    /// State entered once the current batch drains.
    resting: AgentState,
    wander_range: Option<WanderRange>,
    queue: ActionQueue<World, crate::AgentError>,
}

impl Agent {
    pub fn new(id: EntityId, name: impl Into<String>, table: Arc<CommandTable>) -> Self {
        Self {
            id,
            name: name.into(),
            speed: 1,
            state: AgentState::None,
            resting: AgentState::Idle,
            wander_range: None,
            queue: ActionQueue::with_table(table),
        }
    }

    /// The player character, controlled by explicit commands only.
    pub fn player(name: impl Into<String>, table: Arc<CommandTable>) -> Self {
        Self::new(EntityId::PLAYER, name, table)
    }

    /// Tiles moved per tick (builder pattern).
    #[must_use]
    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed.max(1);
        self
    }

    /// Wander randomly whenever there is nothing else to do (builder pattern).
    #[must_use]
    pub fn with_wander(mut self, range: WanderRange) -> Self {
        self.wander_range = Some(range);
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn queue(&self) -> &ActionQueue<World, crate::AgentError> {
        &self.queue
    }

    /// Returns true while commands are waiting in the queue.
    pub fn is_busy(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Runs to `location`, one step of `speed` tiles per tick.
    pub fn run_to(&mut self, location: Position) -> Result<()> {
        self.issue(
            commands::MOVE_TOWARD,
            self.args().with("to", location).with("speed", self.speed),
            Some((commands::AT, self.args().with("to", location))),
        )?;
        self.enter(AgentState::Run, AgentState::Idle);
        Ok(())
    }

    /// Moves toward `target` until within interaction range, then performs `then`.
    ///
    /// If the target is already in range, the interaction happens on the
    /// next tick without any movement.
    pub fn approach(&mut self, target: EntityId, then: FollowUp) -> Result<()> {
        self.issue(
            commands::MOVE_TOWARD,
            self.args().with("target", target).with("speed", self.speed),
            Some((commands::WITHIN_RANGE, self.args().with("target", target))),
        )?;
        self.issue(then.command(), self.args().with("target", target), None)?;
        self.enter(AgentState::Approach, then.resting_state());
        Ok(())
    }

    /// Kicks `target` on the next tick, wherever it stands.
    pub fn kick(&mut self, target: EntityId) -> Result<()> {
        self.issue(commands::KICK, self.args().with("target", target), None)?;
        self.enter(AgentState::Idle, AgentState::Idle);
        Ok(())
    }

    /// Talks to `target` on the next tick and stays in conversation.
    pub fn talk(&mut self, target: EntityId) -> Result<()> {
        self.issue(commands::TALK, self.args().with("target", target), None)?;
        self.enter(AgentState::Talk, AgentState::Talk);
        Ok(())
    }

    /// Issues a named command exactly as given, optionally repeated until a
    /// named check passes.
    ///
    /// Used for commands coming from data, such as dialogue scripts.
    ///
    /// # Errors
    ///
    /// [`AgentError::Queue`](crate::AgentError::Queue) if either name is not
    /// a registered command.
    pub fn command(
        &mut self,
        name: &str,
        args: Arguments,
        until: Option<(&str, Arguments)>,
    ) -> Result<()> {
        self.issue(name, args, until)?;
        self.enter(self.state, AgentState::Idle);
        Ok(())
    }

    /// Drops every pending command and stands still.
    pub fn stop(&mut self) {
        self.queue.clear();
        self.state = AgentState::Idle;
    }

    /// Advances the agent by one tick.
    ///
    /// Performs at most one queued action. When the queue has nothing left to
    /// do, the agent settles: players go idle, wandering NPCs pick a new
    /// destination. Returns whether an action was performed.
    pub fn update(&mut self, world: &mut World) -> Result<bool> {
        let step = self.queue.step(world)?;
        trace!(agent = %self.id, ?step, "agent step");

        if !step.performed() {
            self.settle(world)?;
        }
        Ok(step.performed())
    }

    fn settle(&mut self, world: &mut World) -> Result<()> {
        match self.state {
            AgentState::Run | AgentState::Approach => {
                self.state = self.resting;
                if self.state == AgentState::Idle {
                    world.stand(self.id)?;
                }
            }
            AgentState::Wander => {
                self.state = AgentState::Idle;
                world.stand(self.id)?;
            }
            AgentState::None | AgentState::Idle => match self.wander_range {
                Some(range) => self.wander(world, range)?,
                None if self.state == AgentState::None => {
                    self.state = AgentState::Idle;
                    world.stand(self.id)?;
                }
                None => {}
            },
            AgentState::Talk => {}
        }
        Ok(())
    }

    /// Walks to a random spot `range` tiles away on each axis.
    ///
    /// Agents configured with [`with_wander`](Self::with_wander) do this on
    /// their own whenever they run out of commands.
    pub fn wander(&mut self, world: &mut World, range: WanderRange) -> Result<()> {
        let from = world.position(self.id)?;
        let to = world.random_destination(from, range.min, range.max);
        // Wandering is a slow walk
        let speed = self.speed.saturating_sub(1).max(1);
        self.issue(
            commands::MOVE_TOWARD,
            self.args().with("to", to).with("speed", speed),
            Some((commands::AT, self.args().with("to", to))),
        )?;
        self.enter(AgentState::Wander, AgentState::Idle);
        Ok(())
    }

    fn issue(
        &mut self,
        action: &str,
        args: Arguments,
        until: Option<(&str, Arguments)>,
    ) -> Result<()> {
        let check = until.map(|(name, args)| CheckRef::named(name, args));
        self.queue.enqueue(named(action, args), check)?;
        debug!(agent = %self.id, command = action, queued = self.queue.len(), "command issued");
        Ok(())
    }

    fn enter(&mut self, state: AgentState, resting: AgentState) {
        self.state = state;
        self.resting = resting;
    }

    fn args(&self) -> Arguments {
        args_for(self.id)
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("state", &self.state)
            .field("queue", &self.queue)
            .finish()
    }
}
