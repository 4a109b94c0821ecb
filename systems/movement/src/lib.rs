#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that turns, translates and wall-clamps the avatar.

use std::time::Duration;

use glam::Vec2;
use maze_escape_core::{
    AvatarSnapshot, Command, HalfExtents, InputState, Key, MovementTuning, Phase, Pose, TileCoord,
};

/// Pure system that reads held keys and emits collision-resolved avatar moves.
#[derive(Clone, Copy, Debug)]
pub struct Movement {
    tuning: MovementTuning,
}

impl Movement {
    /// Creates a movement system using the provided tuning.
    #[must_use]
    pub const fn new(tuning: MovementTuning) -> Self {
        Self { tuning }
    }

    /// Tuning the system resolves movement with.
    #[must_use]
    pub const fn tuning(&self) -> MovementTuning {
        self.tuning
    }

    /// Resolves the avatar's next pose and emits a move command when it changed.
    ///
    /// Nothing is emitted outside [`Phase::Playing`]; the power-up countdown and
    /// pause both gate the resolver here.
    #[allow(clippy::too_many_arguments)]
    pub fn handle<F>(
        &self,
        phase: Phase,
        avatar: &AvatarSnapshot,
        input: &InputState,
        dt: Duration,
        speed: f32,
        is_passable: F,
        out: &mut Vec<Command>,
    ) where
        F: Fn(TileCoord) -> bool,
    {
        if phase != Phase::Playing {
            return;
        }

        let resolved = resolve(
            avatar.pose,
            input,
            dt.as_secs_f32(),
            speed,
            &self.tuning,
            &is_passable,
        );
        if resolved != avatar.pose {
            out.push(Command::MoveAvatar {
                position: resolved.position,
                direction: resolved.direction,
            });
        }
    }
}

impl Default for Movement {
    fn default() -> Self {
        Self::new(MovementTuning::default())
    }
}

/// Upper bound on sub-steps taken for a single resolution.
const MAX_SUB_STEPS: u32 = 256;

/// Computes the pose reached from `pose` after `dt` seconds of held input.
///
/// Long translations are split into sub-steps no longer than a quarter of the
/// avatar radius so that a probe can never jump across a wall tile.
pub fn resolve<F>(
    pose: Pose,
    input: &InputState,
    dt: f32,
    speed: f32,
    tuning: &MovementTuning,
    is_passable: &F,
) -> Pose
where
    F: Fn(TileCoord) -> bool,
{
    let direction = turn(pose.direction, input, tuning.turn_speed, dt);
    let mut delta = displacement(direction, input, speed, dt);
    if !delta.is_finite() {
        delta = Vec2::ZERO;
    }

    let extents = half_extents(direction, tuning.avatar_radius);
    let max_step = tuning.avatar_radius * 0.25;
    let steps = if max_step > 0.0 {
        ((delta.length() / max_step).ceil() as u32).clamp(1, MAX_SUB_STEPS)
    } else {
        1
    };
    let step = delta / steps as f32;

    let mut position = pose.position;
    for _ in 0..steps {
        let corrected = clamp_to_walls(position + step, extents, is_passable);
        // Axis clamps cannot stop a diagonal slip through a wall corner.
        if is_passable(TileCoord::containing(position))
            && !is_passable(TileCoord::containing(corrected))
        {
            break;
        }
        position = corrected;
    }

    Pose::new(position, direction)
}

/// Rotates the facing vector according to the held turn keys.
#[must_use]
pub fn turn(direction: Vec2, input: &InputState, turn_speed: f32, dt: f32) -> Vec2 {
    let mut angle = 0.0;
    if input.is_held(Key::TurnLeft) {
        angle += turn_speed * dt;
    }
    if input.is_held(Key::TurnRight) {
        angle -= turn_speed * dt;
    }
    if angle == 0.0 {
        return direction;
    }

    let rotated = Vec2::from_angle(angle).rotate(direction).normalize_or_zero();
    if rotated == Vec2::ZERO {
        direction
    } else {
        rotated
    }
}

/// Translation implied by the held movement keys. Forward runs along `-direction`.
#[must_use]
pub fn displacement(direction: Vec2, input: &InputState, speed: f32, dt: f32) -> Vec2 {
    let heading = if input.is_held(Key::Sprint) {
        1.0
    } else {
        let forward = if input.is_held(Key::Forward) { 1.0 } else { 0.0 };
        let backward = if input.is_held(Key::Backward) { 1.0 } else { 0.0 };
        forward - backward
    };

    -direction * (heading * speed * dt)
}

/// Axis-aligned half extents of the triangular footprint facing `direction`.
///
/// The triangle is inscribed in a circle of `radius`, with its tip along the
/// facing vector, so every extent lies between `radius / 2` and `radius`.
#[must_use]
pub fn half_extents(direction: Vec2, radius: f32) -> HalfExtents {
    let mut forward = direction.normalize_or_zero();
    if forward == Vec2::ZERO {
        forward = Vec2::NEG_X;
    }
    let lateral = forward.perp();
    let back = -0.5 * radius * forward;
    let spread = 0.75_f32.sqrt() * radius * lateral;
    let corners = [forward * radius, back + spread, back - spread];

    let min = corners.iter().copied().fold(Vec2::splat(f32::MAX), Vec2::min);
    let max = corners.iter().copied().fold(Vec2::splat(f32::MIN), Vec2::max);

    HalfExtents {
        left: -min.x,
        right: max.x,
        top: max.y,
        bottom: -min.y,
    }
}

/// Clamps each axis so the footprint edge rests on the boundary of any blocked
/// tile its probe lands in. Probes run left, right, top, bottom, each sampled
/// from the position as corrected so far.
#[must_use]
pub fn clamp_to_walls<F>(position: Vec2, extents: HalfExtents, is_passable: &F) -> Vec2
where
    F: Fn(TileCoord) -> bool,
{
    let mut position = position;

    let left = TileCoord::containing(Vec2::new(position.x - extents.left, position.y));
    if !is_passable(left) {
        position.x = left.x() as f32 + 0.5 + extents.left;
    }

    let right = TileCoord::containing(Vec2::new(position.x + extents.right, position.y));
    if !is_passable(right) {
        position.x = right.x() as f32 - 0.5 - extents.right;
    }

    let top = TileCoord::containing(Vec2::new(position.x, position.y + extents.top));
    if !is_passable(top) {
        position.y = top.y() as f32 - 0.5 - extents.top;
    }

    let bottom = TileCoord::containing(Vec2::new(position.x, position.y - extents.bottom));
    if !is_passable(bottom) {
        position.y = bottom.y() as f32 + 0.5 + extents.bottom;
    }

    position
}
