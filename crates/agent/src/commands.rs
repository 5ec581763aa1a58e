//! Stock commands shared by every agent.
//!
//! Commands are registered by name in an [`ActionTable`], so scripts and
//! dialogue can issue them as data. Every command takes the acting entity as
//! its first positional argument; everything else is passed by name.
//!
//! | name | kind | named arguments |
//! |------|------|-----------------|
//! | `move_toward` | action | `to: Position` or `target: EntityId`, `speed: u32 = 1` |
//! | `kick` | action | `target: EntityId` |
//! | `talk` | action | `target: EntityId` |
//! | `stand` | action | |
//! | `at` | check | `to: Position` |
//! | `within_range` | check | `target: EntityId`, `range: u32 = world range` |

use std::sync::Arc;

use action_queue::{ActionTable, Arguments};

use crate::error::{AgentError, Result};
use crate::types::{EntityId, Position};
use crate::world::World;

pub const MOVE_TOWARD: &str = "move_toward";
pub const KICK: &str = "kick";
pub const TALK: &str = "talk";
pub const STAND: &str = "stand";
pub const AT: &str = "at";
pub const WITHIN_RANGE: &str = "within_range";

/// Table shared by all agents.
pub type CommandTable = ActionTable<World, AgentError>;

/// Builds the table of stock commands.
pub fn stock_table() -> Arc<CommandTable> {
    let table = ActionTable::new()
        .with_action(MOVE_TOWARD, move_toward)
        .with_action(KICK, |world: &mut World, args: &Arguments| {
            world.kick(actor(args)?, args.get_named("target")?)
        })
        .with_action(TALK, |world: &mut World, args: &Arguments| {
            world.talk(actor(args)?, args.get_named("target")?)
        })
        .with_action(STAND, |world: &mut World, args: &Arguments| {
            world.stand(actor(args)?)
        })
        .with_check(AT, |world: &World, args: &Arguments| {
            let to: Position = args.get_named("to")?;
            Ok(world.position(actor(args)?)? == to)
        })
        .with_check(WITHIN_RANGE, |world: &World, args: &Arguments| {
            let range = args.get_named_or("range", world.interact_range())?;
            Ok(world.distance(actor(args)?, args.get_named("target")?)? <= range)
        });
    Arc::new(table)
}

/// Arguments for a command issued by `actor`.
pub fn args_for(actor: EntityId) -> Arguments {
    Arguments::new().arg(actor)
}

fn actor(args: &Arguments) -> Result<EntityId> {
    Ok(args.get(0)?)
}

fn move_toward(world: &mut World, args: &Arguments) -> Result<()> {
    let actor = actor(args)?;
    let speed = args.get_named_or("speed", 1)?;
    let destination = if args.named_values().contains_key("to") {
        args.get_named::<Position>("to")?
    } else {
        world.position(args.get_named("target")?)?
    };
    world.move_toward(actor, destination, speed)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::WorldEvent;

    fn world() -> World {
        let mut world = World::new(1);
        world.spawn(EntityId::PLAYER, Position::ORIGIN).unwrap();
        world.spawn(EntityId(1), Position::new(3, 0)).unwrap();
        world
    }

    #[test]
    fn stock_names_are_registered() {
        let table = stock_table();
        assert_eq!(table.action_names(), vec![KICK, MOVE_TOWARD, STAND, TALK]);
        assert_eq!(table.check_names(), vec![AT, WITHIN_RANGE]);
    }

    #[test]
    fn move_toward_target_until_in_range() {
        let table = stock_table();
        let mut world = world();
        let mut step = table
            .bind_action(MOVE_TOWARD, args_for(EntityId::PLAYER).with("target", EntityId(1)))
            .unwrap();
        let mut in_range = table
            .bind_check(WITHIN_RANGE, args_for(EntityId::PLAYER).with("target", EntityId(1)))
            .unwrap();

        let mut moves = 0;
        while !in_range.is_complete(&world).unwrap() {
            step.perform(&mut world).unwrap();
            moves += 1;
        }

        assert_eq!(moves, 2);
        assert_eq!(world.position(EntityId::PLAYER).unwrap(), Position::new(2, 0));
    }

    #[test]
    fn move_toward_location_with_speed() {
        let table = stock_table();
        let mut world = world();
        let to = Position::new(-4, 4);
        let mut run = table
            .bind_action(
                MOVE_TOWARD,
                args_for(EntityId::PLAYER).with("to", to).with("speed", 2),
            )
            .unwrap();
        let mut arrived = table
            .bind_check(AT, args_for(EntityId::PLAYER).with("to", to))
            .unwrap();

        run.perform(&mut world).unwrap();
        assert!(!arrived.is_complete(&world).unwrap());
        run.perform(&mut world).unwrap();
        assert!(arrived.is_complete(&world).unwrap());
    }

    #[test]
    fn kick_records_event() {
        let table = stock_table();
        let mut world = world();
        let mut kick = table
            .bind_action(KICK, args_for(EntityId::PLAYER).with("target", EntityId(1)))
            .unwrap();

        kick.perform(&mut world).unwrap();

        assert!(matches!(
            world.events(),
            [WorldEvent::Kicked { target: EntityId(1), .. }]
        ));
    }

    #[test]
    fn missing_arguments_are_reported() {
        let table = stock_table();
        let mut world = world();
        let mut kick = table.bind_action(KICK, args_for(EntityId::PLAYER)).unwrap();

        assert!(matches!(
            kick.perform(&mut world),
            Err(AgentError::Argument(_))
        ));
    }
}
