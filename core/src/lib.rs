#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Escape engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems and
//! presentation layers to react to. Systems consume immutable snapshots and
//! respond exclusively with new command batches.

use std::{fmt, str::FromStr, time::Duration};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Escape.";

/// Largest frame delta the engine integrates in a single tick.
///
/// Frame hitches are capped to one thirtieth of a second so a long stall can
/// never carry the avatar through a wall.
pub const MAX_FRAME_DELTA: Duration = Duration::from_nanos(33_333_333);

/// Glyph that marks an impassable wall in a map definition.
pub const WALL_GLYPH: char = '#';
/// Glyph that marks a power-up pickup in a map definition.
pub const POWER_UP_GLYPH: char = '+';
/// Glyph that marks an energy pill pickup in a map definition.
pub const ENERGY_PILL_GLYPH: char = '$';
/// Glyph that marks an open floor tile in a map definition.
pub const OPEN_GLYPH: char = ' ';
/// Legacy glyph that marks the spawn tile when no explicit start is given.
pub const SPAWN_GLYPH: char = 'P';

/// Clamps a raw frame delta to [`MAX_FRAME_DELTA`].
#[must_use]
pub fn clamp_delta(dt: Duration) -> Duration {
    dt.min(MAX_FRAME_DELTA)
}

/// Rounds to the nearest integer, resolving halves toward positive infinity.
///
/// Tile lookups depend on this exact rule: `-2.5` maps to `-2`, not `-3`.
#[must_use]
pub fn round_half_up(value: f32) -> f32 {
    (value + 0.5).floor()
}

/// Difficulty tiers that select the map pool and energy budget.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Small mazes with a forgiving energy budget.
    Easy,
    /// Mid-sized mazes.
    Medium,
    /// Large mazes with a long trek to the goal.
    Hard,
}

impl Difficulty {
    /// Every difficulty in ascending order.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Lowercase identifier used in score keys and configuration files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(UnknownDifficulty(value.to_owned())),
        }
    }
}

/// Error produced when parsing a difficulty from an unrecognised label.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown difficulty `{0}` (expected easy, medium or hard)")]
pub struct UnknownDifficulty(pub String);

/// Position of a map within the pool of a single difficulty.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct MapIndex(u32);

impl MapIndex {
    /// Creates a new map index with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for MapIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key under which a best distance is persisted.
///
/// Renders as the difficulty label followed by the map index, e.g. `easy0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScoreKey {
    difficulty: Difficulty,
    map_index: MapIndex,
}

impl ScoreKey {
    /// Creates a score key for the provided difficulty and map.
    #[must_use]
    pub const fn new(difficulty: Difficulty, map_index: MapIndex) -> Self {
        Self {
            difficulty,
            map_index,
        }
    }

    /// Difficulty the score was achieved on.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Map the score was achieved on.
    #[must_use]
    pub const fn map_index(&self) -> MapIndex {
        self.map_index
    }
}

impl fmt::Display for ScoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.difficulty, self.map_index)
    }
}

/// Persistence collaborator that remembers the best distance per map.
///
/// Implementations decide where the values live; the engine only reads and
/// writes through this trait.
pub trait ScoreBoard {
    /// Returns the best recorded distance for the key, if any.
    fn best(&self, key: &ScoreKey) -> Option<f32>;

    /// Stores a new best distance for the key.
    fn set_best(&mut self, key: ScoreKey, distance: f32);
}

/// Location of a single maze tile expressed in world coordinates.
///
/// Columns map directly to `x`. Rows grow downward in the map text but map to
/// decreasing `y`, so text row `i` lives at `y = -i`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TileCoord {
    x: i32,
    y: i32,
}

impl TileCoord {
    /// Creates a tile coordinate from world-space integer components.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Converts a text `(column, row)` pair into world tile coordinates.
    #[must_use]
    pub fn from_text(column: u32, row: u32) -> Self {
        let x = i32::try_from(column).unwrap_or(i32::MAX);
        let y = i32::try_from(row).map_or(i32::MIN, |row| -row);
        Self { x, y }
    }

    /// Returns the tile whose centre is nearest to the provided world point.
    #[must_use]
    pub fn containing(point: Vec2) -> Self {
        Self {
            x: round_half_up(point.x) as i32,
            y: round_half_up(point.y) as i32,
        }
    }

    /// World-space column of the tile.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// World-space row of the tile (zero or negative inside a map).
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// World-space centre of the tile.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Classification of a maze tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Impassable wall.
    Wall,
    /// Passable floor.
    Open,
    /// Passable tile that ends the session when reached.
    Goal,
    /// Passable pickup that triggers the overhead power-up view.
    PowerUp,
    /// Passable pickup that restores energy.
    EnergyPill,
    /// Sentinel returned for coordinates outside the grid.
    OutOfBounds,
}

impl TileKind {
    /// Reports whether the avatar may occupy the tile.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        matches!(
            self,
            Self::Open | Self::Goal | Self::PowerUp | Self::EnergyPill
        )
    }

    /// Reports whether the tile holds a consumable pickup.
    #[must_use]
    pub const fn is_pickup(self) -> bool {
        matches!(self, Self::PowerUp | Self::EnergyPill)
    }
}

/// Textual map definition consumed when a session starts.
///
/// `rows` is a rectangular list of equal-length strings. `start` and `goal`
/// are `[column, row]` pairs in text coordinates. Older maps mark the spawn
/// with a single [`SPAWN_GLYPH`] instead of an explicit `start`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDefinition {
    /// Rows of the map, top row first.
    #[serde(rename = "map")]
    pub rows: Vec<String>,
    /// Explicit spawn location as `[column, row]`.
    #[serde(default)]
    pub start: Option<[u32; 2]>,
    /// Goal location as `[column, row]`.
    pub goal: [u32; 2],
}

/// Structural problems that prevent a map definition from becoming a maze.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MalformedMapError {
    /// The definition contains no rows or only empty rows.
    #[error("map definition is empty")]
    Empty,
    /// A row's length differs from the first row.
    #[error("row {row} has {found} tiles but the map is {expected} tiles wide")]
    RaggedRow {
        /// Zero-based row index of the offending row.
        row: usize,
        /// Width established by the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A character outside the map alphabet was found.
    #[error("unknown glyph {glyph:?} at column {column}, row {row}")]
    UnknownGlyph {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        column: usize,
        /// Offending character.
        glyph: char,
    },
    /// Neither an explicit start nor a spawn glyph was provided.
    #[error("map definition has no spawn")]
    MissingSpawn,
    /// More than one spawn location was found.
    #[error("second spawn found at column {column}, row {row}")]
    DuplicateSpawn {
        /// Zero-based row index of the extra spawn.
        row: usize,
        /// Zero-based column index of the extra spawn.
        column: usize,
    },
    /// The spawn lies outside the grid.
    #[error("spawn at column {column}, row {row} lies outside the map")]
    SpawnOutOfBounds {
        /// Requested column.
        column: u32,
        /// Requested row.
        row: u32,
    },
    /// The spawn lies on a wall.
    #[error("spawn at column {column}, row {row} is a wall")]
    SpawnBlocked {
        /// Requested column.
        column: u32,
        /// Requested row.
        row: u32,
    },
    /// The goal lies outside the grid.
    #[error("goal at column {column}, row {row} lies outside the map")]
    GoalOutOfBounds {
        /// Requested column.
        column: u32,
        /// Requested row.
        row: u32,
    },
    /// The goal lies on a wall.
    #[error("goal at column {column}, row {row} is a wall")]
    GoalBlocked {
        /// Requested column.
        column: u32,
        /// Requested row.
        row: u32,
    },
    /// Spawn and goal share a tile, so the goal could never be approached.
    #[error("goal at column {column}, row {row} coincides with the spawn")]
    GoalOnSpawn {
        /// Shared column.
        column: u32,
        /// Shared row.
        row: u32,
    },
}

/// Logical keys the platform layer reports to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Key {
    /// Move forward.
    Forward,
    /// Move backward.
    Backward,
    /// Rotate counter-clockwise.
    TurnLeft,
    /// Rotate clockwise.
    TurnRight,
    /// Move forward at boosted speed while burning energy faster.
    Sprint,
    /// Toggle the pause screen.
    Pause,
}

impl Key {
    /// Every logical key.
    pub const ALL: [Self; 6] = [
        Self::Forward,
        Self::Backward,
        Self::TurnLeft,
        Self::TurnRight,
        Self::Sprint,
        Self::Pause,
    ];

    /// Identifier used by scripts and configuration files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::TurnLeft => "turn-left",
            Self::TurnRight => "turn-right",
            Self::Sprint => "sprint",
            Self::Pause => "pause",
        }
    }

    const fn mask(self) -> u8 {
        match self {
            Self::Forward => 1 << 0,
            Self::Backward => 1 << 1,
            Self::TurnLeft => 1 << 2,
            Self::TurnRight => 1 << 3,
            Self::Sprint => 1 << 4,
            Self::Pause => 1 << 5,
        }
    }
}

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .ok_or_else(|| UnknownKey(value.to_owned()))
    }
}

/// Error produced when parsing a key from an unrecognised label.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown key `{0}`")]
pub struct UnknownKey(pub String);

/// Press and release notifications queued by the platform layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEvent {
    /// The key went down.
    Pressed(Key),
    /// The key went up.
    Released(Key),
    /// The window lost focus; every key counts as released.
    FocusLost,
}

/// Snapshot of the keys held during a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InputState {
    held: u8,
}

impl InputState {
    /// Creates a snapshot with no keys held.
    #[must_use]
    pub const fn new() -> Self {
        Self { held: 0 }
    }

    /// Creates a snapshot holding exactly the provided keys.
    #[must_use]
    pub fn holding(keys: &[Key]) -> Self {
        let mut state = Self::new();
        for key in keys {
            state.press(*key);
        }
        state
    }

    /// Marks the key as held.
    pub fn press(&mut self, key: Key) {
        self.held |= key.mask();
    }

    /// Marks the key as released.
    pub fn release(&mut self, key: Key) {
        self.held &= !key.mask();
    }

    /// Releases every key, as required when the window loses focus.
    pub fn clear_all(&mut self) {
        self.held = 0;
    }

    /// Folds a queued key event into the snapshot.
    pub fn apply(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Pressed(key) => self.press(key),
            KeyEvent::Released(key) => self.release(key),
            KeyEvent::FocusLost => self.clear_all(),
        }
    }

    /// Reports whether the key is currently held.
    #[must_use]
    pub const fn is_held(&self, key: Key) -> bool {
        self.held & key.mask() != 0
    }
}

/// Discrete session state that drives all engine behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No session is running; the title screen is showing.
    Idle,
    /// The avatar is under player control.
    Playing,
    /// A power-up countdown is running; the avatar is frozen.
    PoweredUp,
    /// The player paused the session.
    Paused,
    /// The goal was reached.
    Won,
    /// Energy ran out.
    Lost,
}

impl Phase {
    /// Reports whether the phase only exits through restart or menu actions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// Reports whether a session exists in this phase.
    #[must_use]
    pub const fn has_session(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
            Self::PoweredUp => "powered-up",
            Self::Paused => "paused",
            Self::Won => "won",
            Self::Lost => "lost",
        };
        f.write_str(label)
    }
}

/// Position and facing of the avatar on the ground plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    /// World-space position of the avatar centre.
    pub position: Vec2,
    /// Unit facing vector. Forward motion travels along its negation.
    pub direction: Vec2,
}

impl Pose {
    /// Creates a pose from a position and facing vector.
    #[must_use]
    pub const fn new(position: Vec2, direction: Vec2) -> Self {
        Self {
            position,
            direction,
        }
    }
}

/// Distances from the avatar centre to each edge of its axis-aligned box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HalfExtents {
    /// Extent toward negative `x`.
    pub left: f32,
    /// Extent toward positive `x`.
    pub right: f32,
    /// Extent toward positive `y`.
    pub top: f32,
    /// Extent toward negative `y`.
    pub bottom: f32,
}

/// Immutable representation of the avatar used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AvatarSnapshot {
    /// Current position and facing.
    pub pose: Pose,
    /// Cumulative distance actually travelled after collision correction.
    pub distance_moved: f32,
    /// Remaining energy.
    pub energy: f32,
    /// Energy ceiling for the session's difficulty.
    pub max_energy: f32,
}

impl AvatarSnapshot {
    /// Remaining energy as a fraction of the ceiling, in `0.0..=1.0`.
    #[must_use]
    pub fn energy_ratio(&self) -> f32 {
        if self.max_energy <= 0.0 {
            return 0.0;
        }
        (self.energy / self.max_energy).clamp(0.0, 1.0)
    }
}

/// Movement and footprint constants shared by every difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    /// Speed floor reached when energy is exhausted, in tiles per second.
    pub min_speed: f32,
    /// Speed at full energy, in tiles per second.
    pub max_speed: f32,
    /// Multiplier applied to the speed ceiling while sprinting.
    pub sprint_speed_multiplier: f32,
    /// Multiplier applied to the energy drain while sprinting.
    pub sprint_drain_multiplier: f32,
    /// Rotation rate for both turn keys, in radians per second.
    pub turn_speed: f32,
    /// Radius of the avatar footprint; also the proximity radius.
    pub avatar_radius: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            min_speed: 0.3,
            max_speed: 0.8,
            sprint_speed_multiplier: 2.0,
            sprint_drain_multiplier: 5.0,
            turn_speed: std::f32::consts::FRAC_PI_2,
            avatar_radius: 0.25,
        }
    }
}

/// Amount of energy restored by an energy pill.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnergyPickup {
    /// Restores a fraction of the difficulty's energy ceiling.
    Fraction {
        /// Share of `max_energy` restored.
        fraction: f32,
    },
    /// Restores a fixed amount regardless of difficulty.
    Fixed {
        /// Energy restored.
        amount: f32,
    },
}

impl EnergyPickup {
    /// Energy restored for a session with the provided ceiling.
    #[must_use]
    pub fn amount(self, max_energy: f32) -> f32 {
        match self {
            Self::Fraction { fraction } => fraction * max_energy,
            Self::Fixed { amount } => amount,
        }
    }
}

impl Default for EnergyPickup {
    fn default() -> Self {
        Self::Fraction { fraction: 0.2 }
    }
}

/// Energy budget applied to a session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultySettings {
    /// Energy at session start and the ceiling for refills.
    pub max_energy: f32,
    /// Energy drained per second while playing without sprinting.
    pub energy_per_second: f32,
    /// Refill granted by an energy pill.
    #[serde(default)]
    pub pickup: EnergyPickup,
}

impl DifficultySettings {
    /// Built-in settings for the provided difficulty.
    #[must_use]
    pub fn standard(difficulty: Difficulty) -> Self {
        let max_energy = match difficulty {
            Difficulty::Easy => 60.0,
            Difficulty::Medium => 150.0,
            Difficulty::Hard => 400.0,
        };
        Self {
            max_energy,
            energy_per_second: 1.0,
            pickup: EnergyPickup::default(),
        }
    }
}

/// Energy settings keyed by difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTable {
    /// Settings used for [`Difficulty::Easy`].
    #[serde(default = "easy_settings")]
    pub easy: DifficultySettings,
    /// Settings used for [`Difficulty::Medium`].
    #[serde(default = "medium_settings")]
    pub medium: DifficultySettings,
    /// Settings used for [`Difficulty::Hard`].
    #[serde(default = "hard_settings")]
    pub hard: DifficultySettings,
}

impl DifficultyTable {
    /// Looks up the settings for the provided difficulty.
    #[must_use]
    pub const fn settings(&self, difficulty: Difficulty) -> DifficultySettings {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: easy_settings(),
            medium: medium_settings(),
            hard: hard_settings(),
        }
    }
}

fn easy_settings() -> DifficultySettings {
    DifficultySettings::standard(Difficulty::Easy)
}

fn medium_settings() -> DifficultySettings {
    DifficultySettings::standard(Difficulty::Medium)
}

fn hard_settings() -> DifficultySettings {
    DifficultySettings::standard(Difficulty::Hard)
}

/// Complete tuning surface loaded by adapters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Movement and footprint constants.
    pub movement: MovementTuning,
    /// Energy budgets per difficulty.
    pub difficulties: DifficultyTable,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Builds a fresh maze and avatar, replacing any running session.
    StartSession {
        /// Difficulty selected by the player.
        difficulty: Difficulty,
        /// Index of the map within the difficulty's pool.
        map_index: MapIndex,
        /// Map to build.
        map: MapDefinition,
        /// Energy budget for the session.
        settings: DifficultySettings,
    },
    /// Tears down the running session and returns to the title screen.
    EndSession,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Removes energy from the avatar.
    DrainEnergy {
        /// Energy to remove.
        amount: f32,
    },
    /// Moves the avatar to an already collision-resolved pose.
    MoveAvatar {
        /// Resolved position.
        position: Vec2,
        /// Resolved facing vector.
        direction: Vec2,
    },
    /// Consumes the pickup lying on the provided tile.
    ConsumePickup {
        /// Tile holding the pickup.
        tile: TileCoord,
    },
    /// Reports that the avatar reached the goal.
    ReachGoal,
    /// Pauses a running session.
    Pause,
    /// Resumes a paused session.
    Resume,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A new session was built.
    SessionStarted {
        /// Difficulty of the session.
        difficulty: Difficulty,
        /// Map index of the session.
        map_index: MapIndex,
        /// Tile the avatar spawned on.
        spawn: TileCoord,
    },
    /// A session could not be built from the provided map.
    SessionRejected {
        /// Structural problem found in the map.
        error: MalformedMapError,
    },
    /// The running session was discarded.
    SessionEnded,
    /// The simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// The session phase changed.
    PhaseChanged {
        /// Phase before the transition.
        from: Phase,
        /// Phase after the transition.
        to: Phase,
    },
    /// The avatar pose changed.
    AvatarMoved {
        /// Position before the move.
        from: Vec2,
        /// Position after the move.
        to: Vec2,
        /// Facing after the move.
        direction: Vec2,
        /// Cumulative distance after the move.
        distance_moved: f32,
    },
    /// The avatar's energy changed.
    EnergyChanged {
        /// Energy after the change.
        energy: f32,
        /// Energy ceiling of the session.
        max_energy: f32,
    },
    /// A pickup was removed from the maze.
    PickupConsumed {
        /// Tile that held the pickup.
        tile: TileCoord,
        /// Kind of pickup that was consumed.
        kind: TileKind,
    },
    /// A power-up countdown started.
    PowerUpStarted {
        /// Length of the countdown.
        duration: Duration,
    },
    /// The power-up countdown ran out.
    PowerUpExpired,
    /// The avatar reached the goal.
    GoalReached {
        /// Distance travelled over the session.
        distance_moved: f32,
    },
    /// Energy ran out.
    EnergyDepleted,
}
