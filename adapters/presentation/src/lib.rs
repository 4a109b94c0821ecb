#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for Maze Escape adapters.

mod text;

use std::{fmt, time::Duration};

use anyhow::Result as AnyResult;
use glam::{Vec2, Vec3};
use maze_escape_core::{Event, Phase, TileCoord, TileKind};
use maze_escape_game_loop::{FrameState, TickReport};
use maze_escape_world::MazeGrid;

pub use self::text::TextBackend;

/// Height of the follow camera above the ground plane.
const FOLLOW_HEIGHT: f32 = 1.5;
/// Distance the follow camera trails behind the avatar.
const FOLLOW_DISTANCE: f32 = 1.0;
/// Rate at which the camera closes on its target, per second.
const CAMERA_SPEED: f32 = 10.0;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Colour used to draw a tile, or `None` for bare floor.
#[must_use]
pub fn tile_color(kind: TileKind) -> Option<Color> {
    match kind {
        TileKind::Wall => Some(Color::from_rgb_u8(0, 255, 0)),
        TileKind::Goal => Some(Color::from_rgb_u8(255, 215, 0)),
        TileKind::PowerUp => Some(Color::from_rgb_u8(64, 160, 255)),
        TileKind::EnergyPill => Some(Color::from_rgb_u8(255, 64, 160)),
        TileKind::Open | TileKind::OutOfBounds => None,
    }
}

/// Single drawable tile of the maze.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileSprite {
    /// Tile the sprite sits on; its centre is the sprite's world position.
    pub tile: TileCoord,
    /// Content of the tile.
    pub kind: TileKind,
    /// Fill colour.
    pub color: Color,
}

/// Static geometry of a maze, rebuilt whenever a pickup disappears.
#[derive(Clone, Debug, PartialEq)]
pub struct MazeScene {
    /// Maze width in tiles.
    pub width: u32,
    /// Maze height in tiles.
    pub height: u32,
    /// Every non-floor tile.
    pub sprites: Vec<TileSprite>,
}

impl MazeScene {
    /// Builds the scene for the provided maze.
    #[must_use]
    pub fn from_maze(maze: &MazeGrid) -> Self {
        let sprites = maze
            .tiles_with_coords()
            .filter_map(|(tile, kind)| {
                tile_color(kind).map(|color| TileSprite { tile, kind, color })
            })
            .collect();
        Self {
            width: maze.width(),
            height: maze.height(),
            sprites,
        }
    }

    /// Removes the sprite on a consumed pickup tile.
    pub fn remove(&mut self, tile: TileCoord) {
        self.sprites.retain(|sprite| sprite.tile != tile);
    }

    /// World-space centre of the maze on the ground plane.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.width.saturating_sub(1)) as f32 / 2.0,
            -((self.height.saturating_sub(1)) as f32 / 2.0),
        )
    }
}

/// Camera placement requested for the frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraMode {
    /// Chase view trailing the avatar.
    Follow {
        /// Eye position.
        eye: Vec3,
        /// Point the camera looks at.
        look_at: Vec3,
    },
    /// Top-down view over the whole maze while a power-up runs.
    Overhead {
        /// Eye position above the maze centre.
        eye: Vec3,
        /// Maze centre on the ground plane.
        look_at: Vec3,
    },
    /// No session is running.
    Menu,
}

impl CameraMode {
    /// Follow camera targets for the avatar pose.
    #[must_use]
    pub fn follow(position: Vec2, direction: Vec2) -> Self {
        let heading = -direction;
        let eye = (position - heading * FOLLOW_DISTANCE).extend(FOLLOW_HEIGHT);
        let look_at = (position + heading).extend(0.0);
        Self::Follow { eye, look_at }
    }

    /// Overhead camera high enough to frame the whole maze.
    #[must_use]
    pub fn overhead(scene: &MazeScene) -> Self {
        let center = scene.center();
        let elevation = scene.width.max(scene.height) as f32 * 1.2;
        Self::Overhead {
            eye: center.extend(elevation),
            look_at: center.extend(0.0),
        }
    }
}

/// Smooths camera motion by easing toward the requested placement.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraRig {
    eye: Vec3,
    look_at: Vec3,
    primed: bool,
}

impl CameraRig {
    /// Eases toward `mode` over `dt` and returns the eye and look-at points.
    pub fn update(&mut self, mode: CameraMode, dt: Duration) -> Option<(Vec3, Vec3)> {
        let (eye, look_at) = match mode {
            CameraMode::Follow { eye, look_at } | CameraMode::Overhead { eye, look_at } => {
                (eye, look_at)
            }
            CameraMode::Menu => {
                self.primed = false;
                return None;
            }
        };

        if self.primed {
            let blend = (dt.as_secs_f32() * CAMERA_SPEED).min(1.0);
            self.eye = self.eye.lerp(eye, blend);
            self.look_at = self.look_at.lerp(look_at, blend);
        } else {
            self.eye = eye;
            self.look_at = look_at;
            self.primed = true;
        }
        Some((self.eye, self.look_at))
    }
}

/// Full-screen overlay shown over the maze.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Overlay {
    /// Title screen with difficulty selection.
    Title,
    /// Game paused.
    Paused,
    /// Goal reached.
    Won {
        /// Distance travelled in the session.
        distance: f32,
        /// Best distance on record for the map.
        best: Option<f32>,
        /// Whether this session set the record.
        new_best: bool,
    },
    /// Energy ran out.
    Lost {
        /// Distance travelled before running out.
        distance: f32,
    },
}

impl fmt::Display for Overlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => f.write_str("choose a difficulty: easy, medium or hard"),
            Self::Paused => f.write_str("paused"),
            Self::Won {
                distance,
                best,
                new_best,
            } => {
                write!(f, "escaped in {distance:.2} tiles")?;
                if *new_best {
                    f.write_str(" (new best!)")
                } else if let Some(best) = best {
                    write!(f, " (best {best:.2})")
                } else {
                    Ok(())
                }
            }
            Self::Lost { distance } => write!(f, "out of energy after {distance:.2} tiles"),
        }
    }
}

/// Audio cue triggered by a discrete event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// An energy pill was eaten.
    EnergyPill,
    /// A power-up was collected.
    PowerUp,
    /// The overhead view ended.
    PowerUpExpired,
    /// The goal was reached.
    Goal,
    /// Energy ran out.
    Depleted,
}

impl SoundCue {
    /// Cue associated with an event, if any.
    #[must_use]
    pub fn for_event(event: &Event) -> Option<Self> {
        match event {
            Event::PickupConsumed {
                kind: TileKind::EnergyPill,
                ..
            } => Some(Self::EnergyPill),
            Event::PowerUpStarted { .. } => Some(Self::PowerUp),
            Event::PowerUpExpired => Some(Self::PowerUpExpired),
            Event::GoalReached { .. } => Some(Self::Goal),
            Event::EnergyDepleted => Some(Self::Depleted),
            _ => None,
        }
    }
}

/// Heads-up display values for a running session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hud {
    /// Remaining energy as a whole percentage.
    pub energy_percent: u8,
    /// Distance travelled so far.
    pub distance: f32,
    /// Best distance on record for the map.
    pub best: Option<f32>,
    /// Seconds left in the overhead view.
    pub power_up_seconds: Option<f32>,
}

impl Hud {
    /// Derives the HUD from a frame, or `None` on the title screen.
    #[must_use]
    pub fn from_frame(frame: &FrameState) -> Option<Self> {
        if frame.avatar.is_none() {
            return None;
        }
        Some(Self {
            energy_percent: (frame.energy_ratio * 100.0).round().clamp(0.0, 100.0) as u8,
            distance: frame.distance_moved,
            best: frame.best_distance,
            power_up_seconds: frame.power_up_remaining.map(|left| left.as_secs_f32()),
        })
    }
}

impl fmt::Display for Hud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "energy {:>3}% | distance {:.2}",
            self.energy_percent, self.distance
        )?;
        if let Some(best) = self.best {
            write!(f, " | best {best:.2}")?;
        }
        if let Some(seconds) = self.power_up_seconds {
            write!(f, " | overhead {seconds:.1}s")?;
        }
        Ok(())
    }
}

/// Presentation-neutral description of one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Phase the frame was produced in.
    pub phase: Phase,
    /// Overlay to show, if any.
    pub overlay: Option<Overlay>,
    /// Requested camera placement.
    pub camera: CameraMode,
    /// HUD values while a session runs.
    pub hud: Option<Hud>,
    /// Cues to play this frame, in event order.
    pub cues: Vec<SoundCue>,
    /// Solid color used to clear the frame.
    pub clear_color: Color,
}

impl Presentation {
    /// Derives the presentation for a tick report.
    #[must_use]
    pub fn from_report(report: &TickReport, scene: Option<&MazeScene>) -> Self {
        let frame = &report.frame;
        let overlay = match frame.phase {
            Phase::Idle => Some(Overlay::Title),
            Phase::Paused => Some(Overlay::Paused),
            Phase::Won => Some(Overlay::Won {
                distance: frame.distance_moved,
                best: frame.best_distance,
                new_best: report.best_score.is_some(),
            }),
            Phase::Lost => Some(Overlay::Lost {
                distance: frame.distance_moved,
            }),
            Phase::Playing | Phase::PoweredUp => None,
        };

        let camera = match (frame.phase, frame.avatar, scene) {
            (Phase::PoweredUp, _, Some(scene)) => CameraMode::overhead(scene),
            (_, Some(avatar), _) => CameraMode::follow(avatar.pose.position, avatar.pose.direction),
            _ => CameraMode::Menu,
        };

        let background = Color::from_rgb_u8(16, 16, 24);
        let clear_color = if frame.phase == Phase::PoweredUp {
            background.lighten(0.25)
        } else {
            background
        };

        Self {
            phase: frame.phase,
            overlay,
            camera,
            hud: Hud::from_frame(frame),
            cues: report.events.iter().filter_map(SoundCue::for_event).collect(),
            clear_color,
        }
    }
}

/// Backend capable of presenting Maze Escape frames.
pub trait PresentationBackend {
    /// Presents a single frame.
    fn present(&mut self, presentation: &Presentation) -> AnyResult<()>;

    /// Flushes any buffered output once the session is over.
    fn finish(&mut self) -> AnyResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_escape_core::MapDefinition;

    fn maze() -> MazeGrid {
        MazeGrid::build(&MapDefinition {
            rows: vec![
                "######".to_owned(),
                "#  +$#".to_owned(),
                "######".to_owned(),
            ],
            start: Some([1, 1]),
            goal: [2, 1],
        })
        .expect("valid map")
    }

    #[test]
    fn lighten_moves_channels_toward_white() {
        let color = Color::from_rgb_u8(0, 0, 0).lighten(0.5);
        assert_eq!(color.red, 0.5);
        assert_eq!(color.alpha, 1.0);
    }

    #[test]
    fn scene_lists_walls_and_pickups() {
        let mut scene = MazeScene::from_maze(&maze());
        assert_eq!(scene.sprites.len(), 14 + 3);
        assert!(scene
            .sprites
            .iter()
            .any(|sprite| sprite.kind == TileKind::Goal));

        scene.remove(TileCoord::new(4, -1));
        assert!(!scene
            .sprites
            .iter()
            .any(|sprite| sprite.kind == TileKind::EnergyPill));
        assert_eq!(scene.center(), Vec2::new(2.5, -1.0));
    }

    #[test]
    fn follow_camera_trails_the_heading() {
        let CameraMode::Follow { eye, look_at } = CameraMode::follow(Vec2::ZERO, Vec2::NEG_X)
        else {
            panic!("expected follow camera");
        };
        assert_eq!(eye, Vec3::new(-1.0, 0.0, 1.5));
        assert_eq!(look_at, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn rig_snaps_then_eases() {
        let mut rig = CameraRig::default();
        let first = CameraMode::Follow {
            eye: Vec3::ZERO,
            look_at: Vec3::X,
        };
        assert_eq!(
            rig.update(first, Duration::from_millis(16)),
            Some((Vec3::ZERO, Vec3::X))
        );

        let second = CameraMode::Follow {
            eye: Vec3::new(10.0, 0.0, 0.0),
            look_at: Vec3::X,
        };
        let (eye, _) = rig
            .update(second, Duration::from_millis(50))
            .expect("camera active");
        assert!((eye.x - 5.0).abs() < 1e-4);

        assert_eq!(rig.update(CameraMode::Menu, Duration::ZERO), None);
    }

    #[test]
    fn overlay_text_mentions_new_records() {
        let overlay = Overlay::Won {
            distance: 12.345,
            best: Some(12.345),
            new_best: true,
        };
        assert_eq!(overlay.to_string(), "escaped in 12.35 tiles (new best!)");
        assert_eq!(
            Overlay::Lost { distance: 3.0 }.to_string(),
            "out of energy after 3.00 tiles"
        );
    }
}
