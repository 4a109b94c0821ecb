use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use maze_escape_core::{Difficulty, Event, GameConfig, InputState, Key, Phase};
use maze_escape_game_loop::{GameLoop, MemoryScoreBoard};
use maze_escape_system_bootstrap::{MapCatalog, MapSelection};

#[test]
fn deterministic_replay_produces_identical_fingerprints() {
    let first = replay(17);
    let second = replay(17);

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert!(first.moves > 0, "script never moved the avatar");
}

fn replay(seed: u64) -> ReplayOutcome {
    let catalog = MapCatalog::builtin().expect("bundled maps parse");
    let mut game = GameLoop::new(GameConfig::default(), catalog, MemoryScoreBoard::new(), seed);
    let _ = game
        .start(Difficulty::Medium, MapSelection::Random)
        .expect("session starts");

    let mut outcome = ReplayOutcome::default();
    for (frames, input) in script() {
        for _ in 0..frames {
            let report = game.tick(&input, Duration::from_millis(16));
            for event in &report.events {
                match event {
                    Event::AvatarMoved { to, .. } => {
                        outcome.moves += 1;
                        outcome.last_position = (to.x.to_bits(), to.y.to_bits());
                    }
                    Event::PhaseChanged { to, .. } => outcome.phases.push(*to),
                    Event::PickupConsumed { tile, .. } => outcome.pickups.push((tile.x(), tile.y())),
                    _ => {}
                }
            }
            outcome.distance_bits = report.frame.distance_moved.to_bits();
            outcome.energy_bits = report
                .frame
                .avatar
                .map_or(0, |avatar| avatar.energy.to_bits());
        }
    }
    outcome
}

fn script() -> Vec<(u32, InputState)> {
    vec![
        (45, InputState::holding(&[Key::Forward])),
        (30, InputState::holding(&[Key::TurnRight])),
        (60, InputState::holding(&[Key::Forward, Key::TurnLeft])),
        (5, InputState::holding(&[Key::Pause])),
        (20, InputState::holding(&[])),
        (5, InputState::holding(&[Key::Pause])),
        (90, InputState::holding(&[Key::Sprint])),
        (40, InputState::holding(&[Key::Backward, Key::TurnRight])),
        (120, InputState::holding(&[Key::Forward])),
    ]
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    moves: u32,
    last_position: (u32, u32),
    distance_bits: u32,
    energy_bits: u32,
    phases: Vec<Phase>,
    pickups: Vec<(i32, i32)>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}
