//! Authoritative avatar state owned by the running session.

use glam::Vec2;
use maze_escape_core::{AvatarSnapshot, Pose, TileCoord};

/// Facing assigned at spawn. Forward travel runs along its negation, i.e. `+x`.
const SPAWN_DIRECTION: Vec2 = Vec2::new(-1.0, 0.0);

/// Mutable avatar record stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct Avatar {
    pose: Pose,
    distance_moved: f32,
    energy: f32,
    max_energy: f32,
}

impl Avatar {
    /// Places a fresh avatar on the centre of the spawn tile with full energy.
    pub(crate) fn spawn(tile: TileCoord, max_energy: f32) -> Self {
        let max_energy = max_energy.max(0.0);
        Self {
            pose: Pose::new(tile.center(), SPAWN_DIRECTION),
            distance_moved: 0.0,
            energy: max_energy,
            max_energy,
        }
    }

    /// Moves to a resolved pose and returns the distance actually covered.
    pub(crate) fn move_to(&mut self, position: Vec2, direction: Vec2) -> f32 {
        let step = self.pose.position.distance(position);
        self.pose = Pose::new(position, direction.normalize_or_zero());
        if step.is_finite() {
            self.distance_moved += step;
        }
        step
    }

    /// Removes energy, flooring at zero, and returns the remaining amount.
    pub(crate) fn drain(&mut self, amount: f32) -> f32 {
        self.energy = (self.energy - amount.max(0.0)).max(0.0);
        self.energy
    }

    /// Restores energy up to the ceiling and returns the new amount.
    pub(crate) fn restore(&mut self, amount: f32) -> f32 {
        self.energy = (self.energy + amount.max(0.0)).min(self.max_energy);
        self.energy
    }

    pub(crate) const fn pose(&self) -> Pose {
        self.pose
    }

    pub(crate) const fn distance_moved(&self) -> f32 {
        self.distance_moved
    }

    pub(crate) const fn energy(&self) -> f32 {
        self.energy
    }

    pub(crate) const fn max_energy(&self) -> f32 {
        self.max_energy
    }

    pub(crate) fn snapshot(&self) -> AvatarSnapshot {
        AvatarSnapshot {
            pose: self.pose,
            distance_moved: self.distance_moved,
            energy: self.energy,
            max_energy: self.max_energy,
        }
    }
}
