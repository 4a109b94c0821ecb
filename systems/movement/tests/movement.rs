use std::time::Duration;

use approx::assert_relative_eq;
use glam::Vec2;
use maze_escape_core::{
    AvatarSnapshot, Command, Difficulty, DifficultySettings, InputState, Key, MapDefinition,
    MapIndex, MovementTuning, Phase, Pose, TileCoord,
};
use maze_escape_system_movement::{half_extents, resolve, Movement};
use maze_escape_world::{self as world, query, MazeGrid, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const FRAME: f32 = 1.0 / 30.0;

#[test]
fn forward_motion_clamps_against_wall_edge() {
    let maze = build_maze(MapDefinition {
        rows: vec![
            "#####".to_owned(),
            "#   #".to_owned(),
            "#  ##".to_owned(),
            "#   #".to_owned(),
            "#####".to_owned(),
        ],
        start: Some([2, 2]),
        goal: [1, 1],
    });
    let tuning = MovementTuning::default();
    let pose = Pose::new(Vec2::new(2.0, -2.0), Vec2::NEG_X);
    let input = InputState::holding(&[Key::Forward]);

    let resolved = resolve(pose, &input, 1.0, 0.8, &tuning, &|tile| {
        maze.is_passable(tile)
    });

    let right = half_extents(Vec2::NEG_X, tuning.avatar_radius).right;
    assert_eq!(resolved.position.x, 3.0 - 0.5 - right);
    assert_eq!(resolved.position.y, -2.0);
}

#[test]
fn random_walk_never_enters_walls() {
    let maze = build_maze(labyrinth());
    let tuning = MovementTuning::default();
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
    let mut pose = Pose::new(maze.spawn().center(), Vec2::NEG_X);
    let keys = [
        Key::Forward,
        Key::Backward,
        Key::TurnLeft,
        Key::TurnRight,
        Key::Sprint,
    ];

    for frame in 0..20_000 {
        let mut input = InputState::new();
        for key in keys {
            if rng.gen_bool(0.4) {
                input.press(key);
            }
        }
        let speed = if input.is_held(Key::Sprint) {
            rng.gen_range(0.3..=1.6)
        } else {
            rng.gen_range(0.3..=0.8)
        };

        pose = resolve(pose, &input, FRAME, speed, &tuning, &|tile| {
            maze.is_passable(tile)
        });

        let tile = TileCoord::containing(pose.position);
        assert!(
            maze.is_passable(tile),
            "frame {frame}: avatar centre entered {tile} at {:?}",
            pose.position
        );
    }
}

#[test]
fn distance_moved_never_decreases() {
    let mut world = start_world(labyrinth());
    let movement = Movement::default();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut previous = 0.0;

    for _ in 0..600 {
        let input = if rng.gen_bool(0.5) {
            InputState::holding(&[Key::Forward, Key::TurnLeft])
        } else {
            InputState::holding(&[Key::Forward])
        };
        let avatar = query::avatar(&world).expect("session running");
        let mut commands = Vec::new();
        movement.handle(
            query::phase(&world),
            &avatar,
            &input,
            Duration::from_secs_f32(FRAME),
            0.8,
            |tile| query::is_passable(&world, tile),
            &mut commands,
        );
        let mut events = Vec::new();
        for command in commands {
            world::apply(&mut world, command, &mut events);
        }

        let distance = query::avatar(&world).expect("session running").distance_moved;
        assert!(distance >= previous, "distance shrank from {previous} to {distance}");
        previous = distance;
    }

    assert!(previous > 0.0, "walk never left the spawn tile");
}

#[test]
fn sprinting_covers_twice_the_ground() {
    let tuning = MovementTuning::default();
    let open = |_: TileCoord| true;
    let start = Pose::new(Vec2::ZERO, Vec2::NEG_X);

    let walk = resolve(start, &InputState::holding(&[Key::Forward]), FRAME, 0.8, &tuning, &open);
    let sprint = resolve(start, &InputState::holding(&[Key::Sprint]), FRAME, 1.6, &tuning, &open);

    assert_relative_eq!(walk.position.x, 0.8 * FRAME, epsilon = 1e-6);
    assert_relative_eq!(sprint.position.x, 2.0 * walk.position.x, epsilon = 1e-6);
}

#[test]
fn powered_up_avatar_holds_still() {
    let movement = Movement::default();
    let avatar = AvatarSnapshot {
        pose: Pose::new(Vec2::new(1.0, -1.0), Vec2::NEG_X),
        distance_moved: 0.0,
        energy: 10.0,
        max_energy: 10.0,
    };
    let mut commands = Vec::new();
    movement.handle(
        Phase::PoweredUp,
        &avatar,
        &InputState::holding(&[Key::Forward, Key::TurnLeft]),
        Duration::from_millis(33),
        0.8,
        |_| true,
        &mut commands,
    );
    assert!(commands.is_empty());
}

fn labyrinth() -> MapDefinition {
    MapDefinition {
        rows: [
            "P #######",
            "  #   # #",
            "# # ### #",
            "#   #   #",
            "### # ###",
            "#       #",
            "### ### #",
            "#     #  ",
            "#######  ",
        ]
        .iter()
        .map(|row| (*row).to_owned())
        .collect(),
        start: None,
        goal: [8, 8],
    }
}

fn build_maze(definition: MapDefinition) -> MazeGrid {
    MazeGrid::build(&definition).expect("valid map")
}

fn start_world(map: MapDefinition) -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::StartSession {
            difficulty: Difficulty::Easy,
            map_index: MapIndex::new(0),
            map,
            settings: DifficultySettings::standard(Difficulty::Easy),
        },
        &mut events,
    );
    assert_eq!(query::phase(&world), Phase::Playing);
    world
}
