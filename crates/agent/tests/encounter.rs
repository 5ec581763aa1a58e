//! Several agents sharing one world, driven tick by tick.

use action_queue::Arguments;
use agent::{
    Agent, AgentState, EntityId, FollowUp, Position, WanderRange, World, WorldEvent, commands,
    stock_table,
};
use serde_json::json;

const GUARD: EntityId = EntityId(1);
const VILLAGER: EntityId = EntityId(2);

fn tick_all(world: &mut World, agents: &mut [Agent]) {
    world.advance();
    for agent in agents.iter_mut() {
        agent.update(world).unwrap();
    }
}

#[test]
fn player_catches_a_wandering_villager() {
    let table = stock_table();
    let mut world = World::new(5);
    world.spawn(EntityId::PLAYER, Position::ORIGIN).unwrap();
    world.spawn(VILLAGER, Position::new(5, 5)).unwrap();

    let mut agents = vec![
        Agent::player("pc", table.clone()).with_speed(2),
        Agent::new(VILLAGER, "villager", table).with_wander(WanderRange::default()),
    ];
    agents[0].approach(VILLAGER, FollowUp::Talk).unwrap();

    for _ in 0..100 {
        if agents[0].state() == AgentState::Talk {
            break;
        }
        tick_all(&mut world, &mut agents);
    }

    assert_eq!(agents[0].state(), AgentState::Talk);
    let talked = world
        .events_of(EntityId::PLAYER)
        .filter(|event| matches!(event, WorldEvent::Talked { target: VILLAGER, .. }))
        .count();
    assert_eq!(talked, 1);
}

#[test]
fn npcs_only_act_on_their_own_entity() {
    let table = stock_table();
    let mut world = World::new(9);
    world.spawn(GUARD, Position::new(-3, 0)).unwrap();
    world.spawn(VILLAGER, Position::new(3, 0)).unwrap();

    let mut agents = vec![
        Agent::new(GUARD, "guard", table.clone()),
        Agent::new(VILLAGER, "villager", table).with_wander(WanderRange::default()),
    ];

    for _ in 0..20 {
        tick_all(&mut world, &mut agents);
    }

    // The guard only stood up once; the villager did all the walking
    assert_eq!(world.position(GUARD).unwrap(), Position::new(-3, 0));
    assert_eq!(world.events_of(GUARD).count(), 1);
    assert!(
        world
            .events_of(VILLAGER)
            .any(|event| matches!(event, WorldEvent::Moved { .. }))
    );
}

#[test]
fn commands_from_data() {
    let table = stock_table();
    let mut world = World::new(1);
    world.spawn(GUARD, Position::ORIGIN).unwrap();
    let mut guard = Agent::new(GUARD, "guard", table);

    // As a dialogue script would hand them over
    let patrol: Arguments = serde_json::from_value(json!({
        "positional": [1],
        "named": { "to": { "x": 2, "y": -2 } }
    }))
    .unwrap();
    let arrived = patrol.clone();

    guard
        .command(commands::MOVE_TOWARD, patrol, Some((commands::AT, arrived)))
        .unwrap();
    while guard.update(&mut world).unwrap() {
        world.advance();
    }

    assert_eq!(world.position(GUARD).unwrap(), Position::new(2, -2));
    assert!(!guard.is_busy());
}

#[test]
fn far_off_destinations_are_walked_one_step_at_a_time() {
    let table = stock_table();
    let mut world = World::new(1);
    world.spawn(GUARD, Position::new(-10, 0)).unwrap();
    let mut guard = Agent::new(GUARD, "guard", table);

    let edge: Arguments = serde_json::from_value(json!({
        "positional": [1],
        "named": { "to": { "x": i32::MAX, "y": i32::MIN } }
    }))
    .unwrap();

    guard
        .command(commands::MOVE_TOWARD, edge.clone(), Some((commands::AT, edge)))
        .unwrap();
    world.advance();
    assert!(guard.update(&mut world).unwrap());

    assert_eq!(world.position(GUARD).unwrap(), Position::new(-9, -1));
    assert!(guard.is_busy());
}
