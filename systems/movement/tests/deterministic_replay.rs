use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use maze_escape_core::{
    Command, Difficulty, DifficultySettings, Event, InputState, Key, MapDefinition, MapIndex,
    TileCoord,
};
use maze_escape_system_movement::Movement;
use maze_escape_world::{self as world, query, World};

#[test]
fn deterministic_replay_produces_identical_snapshots() {
    let first = replay(scripted_inputs());
    let second = replay(scripted_inputs());

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert!(
        first
            .events
            .iter()
            .any(|event| matches!(event, EventRecord::AvatarMoved { .. })),
        "script never moved the avatar"
    );
}

fn replay(inputs: Vec<(u32, InputState)>) -> ReplayOutcome {
    let mut world = World::new();
    let movement = Movement::default();
    let mut log = Vec::new();

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::StartSession {
            difficulty: Difficulty::Medium,
            map_index: MapIndex::new(0),
            map: plaza(),
            settings: DifficultySettings::standard(Difficulty::Medium),
        },
        &mut events,
    );
    record_events(&events, &mut log);

    let dt = Duration::from_millis(33);
    for (frames, input) in inputs {
        for _ in 0..frames {
            let mut events = Vec::new();
            world::apply(&mut world, Command::Tick { dt }, &mut events);

            let avatar = query::avatar(&world).expect("session running");
            let mut commands = Vec::new();
            movement.handle(
                query::phase(&world),
                &avatar,
                &input,
                dt,
                0.8,
                |tile| query::is_passable(&world, tile),
                &mut commands,
            );
            for command in commands {
                world::apply(&mut world, command, &mut events);
            }
            record_events(&events, &mut log);
        }
    }

    let avatar = query::avatar(&world).expect("session running");
    ReplayOutcome {
        tile: TileCoord::containing(avatar.pose.position),
        position_bits: (
            avatar.pose.position.x.to_bits(),
            avatar.pose.position.y.to_bits(),
        ),
        distance_bits: avatar.distance_moved.to_bits(),
        events: log,
    }
}

fn record_events(events: &[Event], log: &mut Vec<EventRecord>) {
    log.extend(events.iter().filter_map(EventRecord::from_event));
}

fn scripted_inputs() -> Vec<(u32, InputState)> {
    vec![
        (20, InputState::holding(&[Key::Forward])),
        (15, InputState::holding(&[Key::TurnRight])),
        (40, InputState::holding(&[Key::Forward, Key::TurnLeft])),
        (10, InputState::new()),
        (30, InputState::holding(&[Key::Sprint])),
        (25, InputState::holding(&[Key::Backward, Key::TurnRight])),
    ]
}

fn plaza() -> MapDefinition {
    MapDefinition {
        rows: [
            "#########",
            "#       #",
            "# ## ## #",
            "#       #",
            "# ## ## #",
            "#       #",
            "#########",
        ]
        .iter()
        .map(|row| (*row).to_owned())
        .collect(),
        start: Some([1, 1]),
        goal: [7, 5],
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    tile: TileCoord,
    position_bits: (u32, u32),
    distance_bits: u32,
    events: Vec<EventRecord>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum EventRecord {
    TimeAdvanced { dt_micros: u128 },
    AvatarMoved { to: (u32, u32), distance: u32 },
    SessionStarted { spawn: TileCoord },
}

impl EventRecord {
    fn from_event(event: &Event) -> Option<Self> {
        match event {
            Event::TimeAdvanced { dt } => Some(Self::TimeAdvanced {
                dt_micros: dt.as_micros(),
            }),
            Event::AvatarMoved {
                to, distance_moved, ..
            } => Some(Self::AvatarMoved {
                to: (to.x.to_bits(), to.y.to_bits()),
                distance: distance_moved.to_bits(),
            }),
            Event::SessionStarted { spawn, .. } => Some(Self::SessionStarted { spawn: *spawn }),
            _ => None,
        }
    }
}
