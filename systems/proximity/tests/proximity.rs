use glam::Vec2;
use maze_escape_core::{
    Command, Difficulty, DifficultySettings, Event, MapDefinition, MapIndex, Phase, TileCoord,
    TileKind,
};
use maze_escape_system_proximity::Proximity;
use maze_escape_world::{self as world, query, World};

fn hallway() -> MapDefinition {
    MapDefinition {
        rows: vec![
            "########".to_owned(),
            "# $ +  #".to_owned(),
            "########".to_owned(),
        ],
        start: Some([1, 1]),
        goal: [6, 1],
    }
}

fn start() -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::StartSession {
            difficulty: Difficulty::Easy,
            map_index: MapIndex::new(0),
            map: hallway(),
            settings: DifficultySettings::standard(Difficulty::Easy),
        },
        &mut events,
    );
    world
}

fn step_to(world: &mut World, proximity: &Proximity, position: Vec2) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::MoveAvatar {
            position,
            direction: Vec2::NEG_X,
        },
        &mut events,
    );

    let goal = query::goal(world).expect("session running");
    let maze = query::maze(world).expect("session running");
    let mut commands = Vec::new();
    proximity.handle(
        query::phase(world),
        position,
        goal,
        |tile| maze.classify(tile),
        &mut commands,
    );
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

#[test]
fn pill_is_consumed_once() {
    let mut world = start();
    let proximity = Proximity::default();

    let near_miss = step_to(&mut world, &proximity, Vec2::new(2.2, -1.0));
    assert!(!near_miss
        .iter()
        .any(|event| matches!(event, Event::PickupConsumed { .. })));

    let hit = step_to(&mut world, &proximity, Vec2::new(2.1, -1.0));
    assert!(hit.contains(&Event::PickupConsumed {
        tile: TileCoord::new(2, -1),
        kind: TileKind::EnergyPill,
    }));

    let again = step_to(&mut world, &proximity, Vec2::new(2.0, -1.0));
    assert!(!again
        .iter()
        .any(|event| matches!(event, Event::PickupConsumed { .. })));
    assert_eq!(
        query::maze(&world)
            .expect("session running")
            .classify(TileCoord::new(2, -1)),
        TileKind::Open
    );
}

#[test]
fn power_up_switches_to_overhead_phase() {
    let mut world = start();
    let events = step_to(&mut world, &Proximity::default(), Vec2::new(4.0, -1.0));

    assert_eq!(query::phase(&world), Phase::PoweredUp);
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::PowerUpStarted { .. })));
}

#[test]
fn reaching_goal_wins() {
    let mut world = start();
    let events = step_to(&mut world, &Proximity::default(), Vec2::new(5.9, -1.0));

    assert_eq!(query::phase(&world), Phase::Won);
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::GoalReached { .. })));
}
