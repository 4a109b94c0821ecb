#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame driver that sequences the Maze Escape systems against the world.

mod scores;

use std::time::Duration;

use log::{debug, info};
use maze_escape_core::{
    clamp_delta, AvatarSnapshot, Command, Difficulty, Event, GameConfig, InputState, Key,
    MalformedMapError, MapIndex, Phase, ScoreBoard, ScoreKey, TileCoord,
};
use maze_escape_system_bootstrap::{MapCatalog, MapSelection};
use maze_escape_system_energy::Energy;
use maze_escape_system_movement::Movement;
use maze_escape_system_proximity::Proximity;
use maze_escape_world::{self as world, query, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

pub use self::scores::{record_best, BestScoreUpdate, MemoryScoreBoard};

/// Failure to start a session.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StartError {
    /// The catalog holds no maps for the difficulty.
    #[error("no {difficulty} maps are available")]
    NoMaps {
        /// Requested difficulty.
        difficulty: Difficulty,
    },
    /// The requested index is past the end of the difficulty's pool.
    #[error("{difficulty} map {index} does not exist")]
    UnknownMap {
        /// Requested difficulty.
        difficulty: Difficulty,
        /// Requested index.
        index: MapIndex,
    },
    /// The selected map failed validation.
    #[error("selected map is malformed")]
    Malformed(#[from] MalformedMapError),
    /// Restart was requested before any session was started.
    #[error("no session has been started yet")]
    NothingToRestart,
}

/// How [`GameLoop::restart`] chooses the next map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestartMode {
    /// Replay the map of the previous session.
    SameMap,
    /// Draw a fresh random map of the same difficulty.
    NewMap,
}

/// Read-only view of the session after a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameState {
    /// Phase after the tick.
    pub phase: Phase,
    /// Avatar snapshot, absent on the title screen.
    pub avatar: Option<AvatarSnapshot>,
    /// Remaining energy as a fraction of the ceiling.
    pub energy_ratio: f32,
    /// Cumulative distance travelled.
    pub distance_moved: f32,
    /// Time left in the overhead view.
    pub power_up_remaining: Option<Duration>,
    /// Goal tile of the running maze.
    pub goal: Option<TileCoord>,
    /// Key the running session records its best under.
    pub score_key: Option<ScoreKey>,
    /// Best recorded distance for the running map.
    pub best_distance: Option<f32>,
}

/// Everything an adapter needs to present one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    /// Events broadcast by the world, in application order.
    pub events: Vec<Event>,
    /// State after the tick.
    pub frame: FrameState,
    /// Best distance stored by this tick, if the session was won with a new best.
    pub best_score: Option<BestScoreUpdate>,
}

/// Owns the world and sequences every system once per frame.
#[derive(Debug)]
pub struct GameLoop<S> {
    world: World,
    config: GameConfig,
    catalog: MapCatalog,
    rng: ChaCha8Rng,
    scores: S,
    movement: Movement,
    energy: Energy,
    proximity: Proximity,
    previous_input: InputState,
    last_start: Option<(Difficulty, MapIndex)>,
}

impl<S> GameLoop<S>
where
    S: ScoreBoard,
{
    /// Creates a loop on the title screen. `seed` drives random map selection.
    #[must_use]
    pub fn new(config: GameConfig, catalog: MapCatalog, scores: S, seed: u64) -> Self {
        Self {
            world: World::new(),
            config,
            catalog,
            rng: ChaCha8Rng::seed_from_u64(seed),
            scores,
            movement: Movement::new(config.movement),
            energy: Energy::new(config.movement),
            proximity: Proximity::new(config.movement.avatar_radius),
            previous_input: InputState::new(),
            last_start: None,
        }
    }

    /// Starts a session, replacing any session already running.
    pub fn start(
        &mut self,
        difficulty: Difficulty,
        selection: MapSelection,
    ) -> Result<Vec<Event>, StartError> {
        let (index, map) = match self.catalog.select(difficulty, selection, &mut self.rng) {
            Some((index, map)) => (index, map.clone()),
            None => {
                return Err(match selection {
                    MapSelection::Fixed(index) if !self.catalog.maps(difficulty).is_empty() => {
                        StartError::UnknownMap { difficulty, index }
                    }
                    _ => StartError::NoMaps { difficulty },
                })
            }
        };

        let mut events = Vec::new();
        world::apply(
            &mut self.world,
            Command::StartSession {
                difficulty,
                map_index: index,
                map,
                settings: self.config.difficulties.settings(difficulty),
            },
            &mut events,
        );

        if let Some(error) = events.iter().find_map(|event| match event {
            Event::SessionRejected { error } => Some(error.clone()),
            _ => None,
        }) {
            return Err(StartError::Malformed(error));
        }

        self.last_start = Some((difficulty, index));
        self.previous_input = InputState::new();
        info!("session started on {difficulty} map {index}");
        Ok(events)
    }

    /// Starts over on the previous difficulty.
    pub fn restart(&mut self, mode: RestartMode) -> Result<Vec<Event>, StartError> {
        let (difficulty, index) = self.last_start.ok_or(StartError::NothingToRestart)?;
        let selection = match mode {
            RestartMode::SameMap => MapSelection::Fixed(index),
            RestartMode::NewMap => MapSelection::Random,
        };
        self.start(difficulty, selection)
    }

    /// Discards the running session and returns to the title screen.
    pub fn return_to_menu(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::EndSession, &mut events);
        events
    }

    /// Advances the session by one frame of `dt` with the provided held keys.
    pub fn tick(&mut self, input: &InputState, dt: Duration) -> TickReport {
        let dt = clamp_delta(dt);
        let mut events = Vec::new();

        let pause_pressed = input.is_held(Key::Pause) && !self.previous_input.is_held(Key::Pause);
        self.previous_input = *input;
        if pause_pressed {
            match query::phase(&self.world) {
                Phase::Playing => self.apply(Command::Pause, &mut events),
                Phase::Paused => self.apply(Command::Resume, &mut events),
                phase => debug!("pause ignored while {phase}"),
            }
        }

        self.apply(Command::Tick { dt }, &mut events);
        if query::phase(&self.world) != Phase::Playing {
            return self.report(events, None);
        }

        if let Some(settings) = query::settings(&self.world) {
            let mut commands = Vec::new();
            self.energy.handle(
                query::phase(&self.world),
                &settings,
                input,
                dt,
                &mut commands,
            );
            self.apply_all(commands, &mut events);
        }
        if query::phase(&self.world) != Phase::Playing {
            return self.report(events, None);
        }

        if let Some(avatar) = query::avatar(&self.world) {
            let speed = self.energy.speed(&avatar, input);
            let mut commands = Vec::new();
            let world = &self.world;
            self.movement.handle(
                query::phase(world),
                &avatar,
                input,
                dt,
                speed,
                |tile| query::is_passable(world, tile),
                &mut commands,
            );
            self.apply_all(commands, &mut events);
        }

        let mut commands = Vec::new();
        if let (Some(avatar), Some(maze)) = (query::avatar(&self.world), query::maze(&self.world)) {
            self.proximity.handle(
                query::phase(&self.world),
                avatar.pose.position,
                maze.goal(),
                |tile| maze.classify(tile),
                &mut commands,
            );
        }
        self.apply_all(commands, &mut events);

        let best_score = events.iter().find_map(|event| match event {
            Event::GoalReached { distance_moved } => Some(*distance_moved),
            _ => None,
        });
        let best_score = best_score.and_then(|distance| {
            let key = query::score_key(&self.world)?;
            record_best(&mut self.scores, key, distance)
        });

        self.report(events, best_score)
    }

    /// Snapshot of the current session without advancing it.
    #[must_use]
    pub fn frame(&self) -> FrameState {
        let avatar = query::avatar(&self.world);
        let score_key = query::score_key(&self.world);
        FrameState {
            phase: query::phase(&self.world),
            avatar,
            energy_ratio: avatar.map_or(0.0, |avatar| avatar.energy_ratio()),
            distance_moved: avatar.map_or(0.0, |avatar| avatar.distance_moved),
            power_up_remaining: query::power_up_remaining(&self.world),
            goal: query::goal(&self.world),
            score_key,
            best_distance: score_key.and_then(|key| self.scores.best(&key)),
        }
    }

    /// Read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Tuning the loop was configured with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Score board collaborator.
    #[must_use]
    pub fn scores(&self) -> &S {
        &self.scores
    }

    /// Consumes the loop and hands back its score board.
    #[must_use]
    pub fn into_scores(self) -> S {
        self.scores
    }

    fn apply(&mut self, command: Command, events: &mut Vec<Event>) {
        world::apply(&mut self.world, command, events);
    }

    fn apply_all(&mut self, commands: Vec<Command>, events: &mut Vec<Event>) {
        for command in commands {
            self.apply(command, events);
        }
    }

    fn report(&self, events: Vec<Event>, best_score: Option<BestScoreUpdate>) -> TickReport {
        TickReport {
            events,
            frame: self.frame(),
            best_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor_catalog() -> MapCatalog {
        MapCatalog::from_toml_str(
            r########"
            [[easy]]
            start = [1, 1]
            goal = [5, 1]
            map = [
                "#######",
                "#     #",
                "#######",
            ]
            "########,
        )
        .expect("catalog parses")
    }

    #[test]
    fn start_reports_missing_maps() {
        let mut game = GameLoop::new(
            GameConfig::default(),
            corridor_catalog(),
            MemoryScoreBoard::new(),
            0,
        );
        assert_eq!(
            game.start(Difficulty::Hard, MapSelection::Random),
            Err(StartError::NoMaps {
                difficulty: Difficulty::Hard,
            })
        );
        assert_eq!(
            game.start(Difficulty::Easy, MapSelection::Fixed(MapIndex::new(4))),
            Err(StartError::UnknownMap {
                difficulty: Difficulty::Easy,
                index: MapIndex::new(4),
            })
        );
        assert_eq!(
            game.restart(RestartMode::SameMap),
            Err(StartError::NothingToRestart)
        );
    }

    #[test]
    fn malformed_map_keeps_title_screen() {
        let catalog = MapCatalog::from_toml_str(
            r#"
            [[easy]]
            goal = [0, 0]
            map = ["P  "]
            "#,
        )
        .expect("catalog parses");
        let mut game = GameLoop::new(GameConfig::default(), catalog, MemoryScoreBoard::new(), 0);

        let result = game.start(Difficulty::Easy, MapSelection::Random);
        assert!(matches!(result, Err(StartError::Malformed(_))));
        assert_eq!(game.frame().phase, Phase::Idle);
    }

    #[test]
    fn idle_ticks_do_not_drain_before_start() {
        let mut game = GameLoop::new(
            GameConfig::default(),
            corridor_catalog(),
            MemoryScoreBoard::new(),
            0,
        );
        let report = game.tick(&InputState::new(), Duration::from_millis(33));
        assert_eq!(report.frame.phase, Phase::Idle);
        assert!(report.frame.avatar.is_none());
        assert_eq!(
            report.events,
            vec![Event::TimeAdvanced {
                dt: Duration::from_millis(33),
            }]
        );
    }
}
