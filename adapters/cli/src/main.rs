#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Maze Escape session.

mod logging;
mod scores;
mod script;

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result as AnyResult};
use clap::Parser;
use log::{debug, info};
use maze_escape_core::{Difficulty, Event, GameConfig, MapIndex, Phase, ScoreBoard};
use maze_escape_game_loop::{FrameState, GameLoop};
use maze_escape_presentation::{
    CameraRig, MazeScene, Presentation, PresentationBackend, TextBackend,
};
use maze_escape_system_bootstrap::{MapCatalog, MapSelection};
use maze_escape_world::query;

use crate::{scores::JsonScoreBoard, script::Script};

/// Escape a maze before your energy runs out.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Difficulty of the maze: easy, medium or hard.
    #[arg(short, long, default_value = "easy")]
    difficulty: Difficulty,
    /// Play the map at this index instead of a random one.
    #[arg(short, long)]
    map_index: Option<u32>,
    /// Seed for random map selection.
    #[arg(long)]
    seed: Option<u64>,
    /// TOML file overriding movement and energy tuning.
    #[arg(long)]
    config: Option<PathBuf>,
    /// TOML file replacing the bundled map catalog.
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// JSON file holding best distances.
    #[arg(long)]
    scores: Option<PathBuf>,
    /// Timed key script driving the avatar.
    #[arg(long)]
    script: Option<PathBuf>,
    /// Simulated frame length in milliseconds.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
    /// Simulated time after which the session is abandoned.
    #[arg(long, default_value_t = 120.0)]
    max_seconds: f64,
    /// Frames between HUD lines.
    #[arg(long, default_value_t = 30)]
    hud_interval: u32,
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> AnyResult<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = match args.config.as_deref() {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };
    let catalog = match args.catalog.as_deref() {
        Some(path) => load_catalog(path)?,
        None => MapCatalog::builtin().context("bundled map catalog is invalid")?,
    };
    let scores = match args.scores.as_deref() {
        Some(path) => JsonScoreBoard::open(path)?,
        None => JsonScoreBoard::in_memory(),
    };
    let mut script = match args.script.as_deref() {
        Some(path) => load_script(path)?,
        None => Script::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    let selection = args
        .map_index
        .map_or(MapSelection::Random, |index| {
            MapSelection::Fixed(MapIndex::new(index))
        });
    let frame = Duration::from_millis(args.frame_ms.max(1));
    let limit = Duration::try_from_secs_f64(args.max_seconds)
        .context("--max-seconds must be a non-negative number")?;

    let mut game = GameLoop::new(config, catalog, scores, seed);
    writeln!(io::stdout(), "{}", query::welcome_banner(game.world()))
        .context("failed to write banner")?;

    let events = game
        .start(args.difficulty, selection)
        .with_context(|| format!("failed to start a {} session", args.difficulty))?;
    for event in &events {
        debug!("{event:?}");
    }
    let mut scene = query::maze(game.world()).map(MazeScene::from_maze);
    info!(
        "seed {seed}, {} scripted events, frame {}ms",
        script.len(),
        frame.as_millis()
    );

    let mut backend = TextBackend::new(io::stdout().lock(), args.hud_interval);
    let mut rig = CameraRig::default();
    let mut elapsed = Duration::ZERO;
    let mut last = game.frame();
    while elapsed <= limit {
        let input = script.advance(elapsed);
        let report = game.tick(&input, frame);
        elapsed += frame;

        if let Some(scene) = scene.as_mut() {
            for event in &report.events {
                if let Event::PickupConsumed { tile, .. } = event {
                    scene.remove(*tile);
                }
            }
        }
        let presentation = Presentation::from_report(&report, scene.as_ref());
        if let Some((eye, look_at)) = rig.update(presentation.camera, frame) {
            debug!("camera at {eye} looking at {look_at}");
        }
        backend.present(&presentation)?;

        last = report.frame;
        if last.phase.is_terminal() {
            break;
        }
    }
    backend.finish()?;
    drop(backend);

    print_summary(&last, elapsed, game.scores())?;
    game.into_scores().save()
}

fn load_config(path: &Path) -> AnyResult<GameConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config from {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("{} is not a valid config", path.display()))
}

fn load_catalog(path: &Path) -> AnyResult<MapCatalog> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read map catalog from {}", path.display()))?;
    MapCatalog::from_toml_str(&contents)
        .with_context(|| format!("{} is not a valid map catalog", path.display()))
}

fn load_script(path: &Path) -> AnyResult<Script> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read script from {}", path.display()))?;
    Script::parse(&contents).with_context(|| format!("invalid script {}", path.display()))
}

fn print_summary<S: ScoreBoard>(
    frame: &FrameState,
    elapsed: Duration,
    scores: &S,
) -> AnyResult<()> {
    let mut out = io::stdout().lock();
    let outcome = match frame.phase {
        Phase::Won => "escaped",
        Phase::Lost => "ran out of energy",
        _ => "gave up",
    };
    writeln!(
        out,
        "{outcome} after {:.1}s, {:.2} tiles travelled",
        elapsed.as_secs_f32(),
        frame.distance_moved
    )
    .context("failed to write summary")?;
    if let Some(key) = frame.score_key {
        match scores.best(&key) {
            Some(best) => writeln!(out, "best for {key}: {best:.2} tiles"),
            None => writeln!(out, "no best recorded for {key}"),
        }
        .context("failed to write summary")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_parse_with_defaults() {
        let args = Args::try_parse_from(["maze-escape", "--difficulty", "hard", "-m", "0"])
            .expect("arguments parse");
        assert_eq!(args.difficulty, Difficulty::Hard);
        assert_eq!(args.map_index, Some(0));
        assert_eq!(args.frame_ms, 16);
        assert!(args.script.is_none());
    }

    #[test]
    fn unknown_difficulty_is_rejected() {
        assert!(Args::try_parse_from(["maze-escape", "--difficulty", "nightmare"]).is_err());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("tuning.toml");
        fs::write(
            &path,
            "[movement]\nmax_speed = 1.5\n\n[difficulties.easy]\nmax_energy = 90.0\nenergy_per_second = 2.0\npickup = { amount = 150.0 }\n",
        )
        .expect("write config");

        let config = load_config(&path).expect("config loads");
        assert_eq!(config.movement.max_speed, 1.5);
        assert_eq!(config.movement.min_speed, 0.3);
        assert_eq!(config.difficulties.easy.max_energy, 90.0);
        assert_eq!(
            config.difficulties.easy.pickup,
            maze_escape_core::EnergyPickup::Fixed { amount: 150.0 }
        );
        assert_eq!(config.difficulties.hard.max_energy, 400.0);
    }

    #[test]
    fn missing_config_names_the_path() {
        let error = load_config(Path::new("/nonexistent/tuning.toml")).expect_err("missing");
        assert!(error.to_string().contains("/nonexistent/tuning.toml"));
    }
}
