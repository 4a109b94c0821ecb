#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Proximity checks that turn avatar positions into goal and pickup commands.

use glam::Vec2;
use maze_escape_core::{Command, Phase, TileCoord, TileKind};

/// Pure system that detects the goal and pickups near the avatar.
#[derive(Clone, Copy, Debug)]
pub struct Proximity {
    radius: f32,
}

impl Proximity {
    /// Creates a detector for an avatar of the provided radius.
    #[must_use]
    pub const fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// Emits [`Command::ReachGoal`] when the goal is close enough, otherwise
    /// [`Command::ConsumePickup`] for a pickup lying under the avatar centre.
    pub fn handle<F>(
        &self,
        phase: Phase,
        position: Vec2,
        goal: TileCoord,
        classify: F,
        out: &mut Vec<Command>,
    ) where
        F: Fn(TileCoord) -> TileKind,
    {
        if phase != Phase::Playing {
            return;
        }

        if check_goal(position, goal.center(), self.radius) {
            out.push(Command::ReachGoal);
            return;
        }

        let tile = TileCoord::containing(position);
        if check_pickup(position, tile, classify(tile), self.radius) {
            out.push(Command::ConsumePickup { tile });
        }
    }
}

impl Default for Proximity {
    fn default() -> Self {
        Self::new(0.25)
    }
}

/// Reports whether `position` lies strictly inside the trigger circle of `target`.
///
/// The trigger compares squared distance against `radius² / 2`.
#[must_use]
pub fn within_reach(position: Vec2, target: Vec2, radius: f32) -> bool {
    position.distance_squared(target) < radius * radius / 2.0
}

/// Reports whether the avatar at `position` has reached the goal centre.
#[must_use]
pub fn check_goal(position: Vec2, goal: Vec2, radius: f32) -> bool {
    within_reach(position, goal, radius)
}

/// Reports whether the avatar at `position` collects the pickup on `tile`.
#[must_use]
pub fn check_pickup(position: Vec2, tile: TileCoord, kind: TileKind, radius: f32) -> bool {
    kind.is_pickup() && within_reach(position, tile.center(), radius)
}
