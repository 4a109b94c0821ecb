#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Energy drain and speed derivation for the avatar.

use std::time::Duration;

use maze_escape_core::{
    AvatarSnapshot, Command, DifficultySettings, InputState, Key, MovementTuning, Phase,
};

/// Pure system that converts elapsed play time into energy drain.
#[derive(Clone, Copy, Debug)]
pub struct Energy {
    tuning: MovementTuning,
}

impl Energy {
    /// Creates an energy system using the provided tuning.
    #[must_use]
    pub const fn new(tuning: MovementTuning) -> Self {
        Self { tuning }
    }

    /// Emits the drain owed for `dt` of play. Silent outside [`Phase::Playing`].
    pub fn handle(
        &self,
        phase: Phase,
        settings: &DifficultySettings,
        input: &InputState,
        dt: Duration,
        out: &mut Vec<Command>,
    ) {
        if phase != Phase::Playing {
            return;
        }

        let amount = drain_amount(settings, &self.tuning, input.is_held(Key::Sprint), dt);
        if amount > 0.0 {
            out.push(Command::DrainEnergy { amount });
        }
    }

    /// Speed the avatar may travel at this frame.
    #[must_use]
    pub fn speed(&self, avatar: &AvatarSnapshot, input: &InputState) -> f32 {
        derive_speed(
            avatar.energy,
            avatar.max_energy,
            input.is_held(Key::Sprint),
            &self.tuning,
        )
    }
}

impl Default for Energy {
    fn default() -> Self {
        Self::new(MovementTuning::default())
    }
}

/// Energy consumed over `dt`, multiplied while sprinting.
#[must_use]
pub fn drain_amount(
    settings: &DifficultySettings,
    tuning: &MovementTuning,
    sprinting: bool,
    dt: Duration,
) -> f32 {
    let multiplier = if sprinting {
        tuning.sprint_drain_multiplier
    } else {
        1.0
    };
    (settings.energy_per_second * dt.as_secs_f32() * multiplier).max(0.0)
}

/// Speed proportional to the remaining energy, floored at the minimum speed.
///
/// Sprinting multiplies the ceiling, so a full-energy sprint runs at
/// `max_speed * sprint_speed_multiplier`.
#[must_use]
pub fn derive_speed(energy: f32, max_energy: f32, sprinting: bool, tuning: &MovementTuning) -> f32 {
    let ratio = if max_energy > 0.0 {
        (energy / max_energy).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let ceiling = if sprinting {
        tuning.max_speed * tuning.sprint_speed_multiplier
    } else {
        tuning.max_speed
    };
    (ratio * ceiling).max(tuning.min_speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use maze_escape_core::{Difficulty, Pose};

    fn snapshot(energy: f32, max_energy: f32) -> AvatarSnapshot {
        AvatarSnapshot {
            pose: Pose::new(Default::default(), Default::default()),
            distance_moved: 0.0,
            energy,
            max_energy,
        }
    }

    #[test]
    fn speed_tracks_energy_ratio() {
        let tuning = MovementTuning::default();
        assert_relative_eq!(derive_speed(60.0, 60.0, false, &tuning), 0.8);
        assert_relative_eq!(derive_speed(45.0, 60.0, false, &tuning), 0.6);
        assert_relative_eq!(derive_speed(6.0, 60.0, false, &tuning), 0.3);
        assert_relative_eq!(derive_speed(0.0, 60.0, false, &tuning), 0.3);
    }

    #[test]
    fn sprinting_doubles_the_ceiling() {
        let tuning = MovementTuning::default();
        assert_relative_eq!(derive_speed(60.0, 60.0, true, &tuning), 1.6);
        assert_relative_eq!(derive_speed(30.0, 60.0, true, &tuning), 0.8);
    }

    #[test]
    fn zero_ceiling_falls_back_to_minimum() {
        let tuning = MovementTuning::default();
        assert_relative_eq!(derive_speed(5.0, 0.0, false, &tuning), 0.3);
    }

    #[test]
    fn handle_emits_drain_only_while_playing() {
        let energy = Energy::default();
        let settings = DifficultySettings::standard(Difficulty::Easy);
        let input = InputState::holding(&[Key::Sprint]);
        let mut out = Vec::new();

        energy.handle(
            Phase::PoweredUp,
            &settings,
            &input,
            Duration::from_secs(1),
            &mut out,
        );
        assert!(out.is_empty());

        energy.handle(
            Phase::Playing,
            &settings,
            &input,
            Duration::from_secs(1),
            &mut out,
        );
        assert_eq!(out, vec![Command::DrainEnergy { amount: 5.0 }]);
    }

    #[test]
    fn speed_reads_the_snapshot() {
        let energy = Energy::default();
        let walking = InputState::holding(&[Key::Forward]);
        assert_relative_eq!(energy.speed(&snapshot(30.0, 60.0), &walking), 0.4);
    }
}
