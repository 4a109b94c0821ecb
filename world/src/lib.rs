#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Escape.

mod avatar;
mod maze;

use std::time::Duration;

use log::{debug, info, warn};
use maze_escape_core::{
    round_half_up, Command, Difficulty, DifficultySettings, Event, MapDefinition, MapIndex, Phase,
    TileKind, WELCOME_BANNER,
};

use self::avatar::Avatar;
pub use self::maze::MazeGrid;

/// Represents the authoritative Maze Escape world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    phase: Phase,
    session: Option<Session>,
    tick_index: u64,
}

impl World {
    /// Creates a world showing the title screen with no session running.
    #[must_use]
    pub fn new() -> Self {
        Self {
            banner: WELCOME_BANNER,
            phase: Phase::Idle,
            session: None,
            tick_index: 0,
        }
    }

    fn transition(&mut self, to: Phase, out_events: &mut Vec<Event>) {
        let from = self.phase;
        if from == to {
            return;
        }
        debug!("phase {from} -> {to}");
        self.phase = to;
        out_events.push(Event::PhaseChanged { from, to });
    }

    fn start_session(
        &mut self,
        difficulty: Difficulty,
        map_index: MapIndex,
        map: &MapDefinition,
        settings: DifficultySettings,
        out_events: &mut Vec<Event>,
    ) {
        let maze = match MazeGrid::build(map) {
            Ok(maze) => maze,
            Err(error) => {
                warn!("rejected {difficulty} map {map_index}: {error}");
                out_events.push(Event::SessionRejected { error });
                return;
            }
        };

        self.end_session(out_events);

        let spawn = maze.spawn();
        let avatar = Avatar::spawn(spawn, settings.max_energy);
        info!(
            "starting {difficulty} map {map_index} ({}x{}) at {spawn}",
            maze.width(),
            maze.height()
        );
        out_events.push(Event::SessionStarted {
            difficulty,
            map_index,
            spawn,
        });
        out_events.push(Event::EnergyChanged {
            energy: avatar.energy(),
            max_energy: avatar.max_energy(),
        });
        self.session = Some(Session {
            difficulty,
            map_index,
            settings,
            maze,
            avatar,
            power_up_remaining: Duration::ZERO,
        });
        self.transition(Phase::Playing, out_events);
    }

    fn end_session(&mut self, out_events: &mut Vec<Event>) {
        if self.session.take().is_some() {
            out_events.push(Event::SessionEnded);
        }
        self.transition(Phase::Idle, out_events);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
struct Session {
    difficulty: Difficulty,
    map_index: MapIndex,
    settings: DifficultySettings,
    maze: MazeGrid,
    avatar: Avatar,
    power_up_remaining: Duration,
}

/// Length of the overhead view granted by a power-up on a maze of this height.
#[must_use]
pub fn power_up_duration(maze_height: u32) -> Duration {
    let seconds = round_half_up(1.0 + maze_height as f32 / 10.0 * 2.0);
    Duration::from_secs(seconds.max(0.0) as u64)
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartSession {
            difficulty,
            map_index,
            map,
            settings,
        } => world.start_session(difficulty, map_index, &map, settings, out_events),
        Command::EndSession => world.end_session(out_events),
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });

            if world.phase != Phase::PoweredUp {
                return;
            }
            let Some(session) = world.session.as_mut() else {
                return;
            };
            session.power_up_remaining = session.power_up_remaining.saturating_sub(dt);
            if session.power_up_remaining.is_zero() {
                out_events.push(Event::PowerUpExpired);
                world.transition(Phase::Playing, out_events);
            }
        }
        Command::DrainEnergy { amount } => {
            if world.phase != Phase::Playing {
                return;
            }
            let Some(session) = world.session.as_mut() else {
                return;
            };
            let energy = session.avatar.drain(amount);
            out_events.push(Event::EnergyChanged {
                energy,
                max_energy: session.avatar.max_energy(),
            });
            if energy <= 0.0 {
                info!(
                    "energy depleted after {:.2} tiles",
                    session.avatar.distance_moved()
                );
                out_events.push(Event::EnergyDepleted);
                world.transition(Phase::Lost, out_events);
            }
        }
        Command::MoveAvatar {
            position,
            direction,
        } => {
            if world.phase != Phase::Playing {
                return;
            }
            let Some(session) = world.session.as_mut() else {
                return;
            };
            let from = session.avatar.pose().position;
            let _ = session.avatar.move_to(position, direction);
            out_events.push(Event::AvatarMoved {
                from,
                to: session.avatar.pose().position,
                direction: session.avatar.pose().direction,
                distance_moved: session.avatar.distance_moved(),
            });
        }
        Command::ConsumePickup { tile } => {
            if world.phase != Phase::Playing {
                return;
            }
            let Some(session) = world.session.as_mut() else {
                return;
            };
            let Some(kind) = session.maze.consume(tile) else {
                debug!("ignoring consume of {tile}: no pickup present");
                return;
            };
            debug!("consumed {kind:?} at {tile}");
            out_events.push(Event::PickupConsumed { tile, kind });

            match kind {
                TileKind::EnergyPill => {
                    let amount = session
                        .settings
                        .pickup
                        .amount(session.avatar.max_energy());
                    let energy = session.avatar.restore(amount);
                    out_events.push(Event::EnergyChanged {
                        energy,
                        max_energy: session.avatar.max_energy(),
                    });
                }
                TileKind::PowerUp => {
                    let duration = power_up_duration(session.maze.height());
                    session.power_up_remaining = duration;
                    out_events.push(Event::PowerUpStarted { duration });
                    world.transition(Phase::PoweredUp, out_events);
                }
                _ => {}
            }
        }
        Command::ReachGoal => {
            if world.phase != Phase::Playing {
                return;
            }
            let Some(session) = world.session.as_ref() else {
                return;
            };
            let distance_moved = session.avatar.distance_moved();
            info!(
                "goal reached on {} map {} after {distance_moved:.2} tiles",
                session.difficulty, session.map_index
            );
            out_events.push(Event::GoalReached { distance_moved });
            world.transition(Phase::Won, out_events);
        }
        Command::Pause => {
            if world.phase == Phase::Playing {
                world.transition(Phase::Paused, out_events);
            }
        }
        Command::Resume => {
            if world.phase == Phase::Paused {
                world.transition(Phase::Playing, out_events);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::{MazeGrid, World};
    use maze_escape_core::{
        AvatarSnapshot, Difficulty, DifficultySettings, MapIndex, Phase, ScoreKey, TileCoord,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Current session phase.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.phase
    }

    /// Number of ticks applied since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Provides read-only access to the running maze.
    #[must_use]
    pub fn maze(world: &World) -> Option<&MazeGrid> {
        world.session.as_ref().map(|session| &session.maze)
    }

    /// Captures a read-only view of the avatar.
    #[must_use]
    pub fn avatar(world: &World) -> Option<AvatarSnapshot> {
        world
            .session
            .as_ref()
            .map(|session| session.avatar.snapshot())
    }

    /// Difficulty of the running session.
    #[must_use]
    pub fn difficulty(world: &World) -> Option<Difficulty> {
        world.session.as_ref().map(|session| session.difficulty)
    }

    /// Map index of the running session.
    #[must_use]
    pub fn map_index(world: &World) -> Option<MapIndex> {
        world.session.as_ref().map(|session| session.map_index)
    }

    /// Key under which the running session's best distance is stored.
    #[must_use]
    pub fn score_key(world: &World) -> Option<ScoreKey> {
        world
            .session
            .as_ref()
            .map(|session| ScoreKey::new(session.difficulty, session.map_index))
    }

    /// Energy budget of the running session.
    #[must_use]
    pub fn settings(world: &World) -> Option<DifficultySettings> {
        world.session.as_ref().map(|session| session.settings)
    }

    /// Time left on the power-up countdown, if one is running.
    #[must_use]
    pub fn power_up_remaining(world: &World) -> Option<Duration> {
        world
            .session
            .as_ref()
            .map(|session| session.power_up_remaining)
            .filter(|remaining| !remaining.is_zero())
    }

    /// Goal tile of the running maze.
    #[must_use]
    pub fn goal(world: &World) -> Option<TileCoord> {
        maze(world).map(MazeGrid::goal)
    }

    /// Reports whether the avatar may occupy the tile; impassable without a session.
    #[must_use]
    pub fn is_passable(world: &World, tile: TileCoord) -> bool {
        maze(world).map_or(false, |maze| maze.is_passable(tile))
    }
}
