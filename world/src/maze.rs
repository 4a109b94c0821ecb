//! Static tile grid built from a textual map definition.

use maze_escape_core::{
    MalformedMapError, MapDefinition, TileCoord, TileKind, ENERGY_PILL_GLYPH, OPEN_GLYPH,
    POWER_UP_GLYPH, SPAWN_GLYPH, WALL_GLYPH,
};

/// Passability and pickup lookup for a single maze.
///
/// The grid is pure data: presentation layers key their own visuals by the
/// same [`TileCoord`] values. The only mutation after construction is
/// [`MazeGrid::consume`], which turns a pickup into open floor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGrid {
    width: u32,
    height: u32,
    tiles: Vec<TileKind>,
    spawn: TileCoord,
    goal: TileCoord,
}

impl MazeGrid {
    /// Builds a maze, validating every structural invariant of the definition.
    pub fn build(definition: &MapDefinition) -> Result<Self, MalformedMapError> {
        let width = definition
            .rows
            .first()
            .map_or(0, |row| row.chars().count());
        if width == 0 {
            return Err(MalformedMapError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * definition.rows.len());
        let mut spawn_glyphs: Vec<(usize, usize)> = Vec::new();

        for (row_index, row) in definition.rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(MalformedMapError::RaggedRow {
                    row: row_index,
                    expected: width,
                    found,
                });
            }

            for (column_index, glyph) in row.chars().enumerate() {
                let kind = match glyph {
                    WALL_GLYPH => TileKind::Wall,
                    POWER_UP_GLYPH => TileKind::PowerUp,
                    ENERGY_PILL_GLYPH => TileKind::EnergyPill,
                    OPEN_GLYPH => TileKind::Open,
                    SPAWN_GLYPH => {
                        spawn_glyphs.push((column_index, row_index));
                        TileKind::Open
                    }
                    _ => {
                        return Err(MalformedMapError::UnknownGlyph {
                            row: row_index,
                            column: column_index,
                            glyph,
                        })
                    }
                };
                tiles.push(kind);
            }
        }

        let width = u32::try_from(width).map_err(|_| MalformedMapError::Empty)?;
        let height =
            u32::try_from(definition.rows.len()).map_err(|_| MalformedMapError::Empty)?;

        let [spawn_column, spawn_row] = resolve_spawn(definition.start, &spawn_glyphs)?;
        let mut grid = Self {
            width,
            height,
            tiles,
            spawn: TileCoord::from_text(spawn_column, spawn_row),
            goal: TileCoord::from_text(definition.goal[0], definition.goal[1]),
        };

        match grid.classify(grid.spawn) {
            TileKind::OutOfBounds => {
                return Err(MalformedMapError::SpawnOutOfBounds {
                    column: spawn_column,
                    row: spawn_row,
                })
            }
            TileKind::Wall => {
                return Err(MalformedMapError::SpawnBlocked {
                    column: spawn_column,
                    row: spawn_row,
                })
            }
            _ => {}
        }

        let [goal_column, goal_row] = definition.goal;
        match grid.classify(grid.goal) {
            TileKind::OutOfBounds => {
                return Err(MalformedMapError::GoalOutOfBounds {
                    column: goal_column,
                    row: goal_row,
                })
            }
            TileKind::Wall => {
                return Err(MalformedMapError::GoalBlocked {
                    column: goal_column,
                    row: goal_row,
                })
            }
            _ => {}
        }
        if grid.goal == grid.spawn {
            return Err(MalformedMapError::GoalOnSpawn {
                column: goal_column,
                row: goal_row,
            });
        }

        if let Some(index) = grid.index(grid.goal) {
            if let Some(slot) = grid.tiles.get_mut(index) {
                *slot = TileKind::Goal;
            }
        }

        Ok(grid)
    }

    /// Classifies the tile, returning [`TileKind::OutOfBounds`] outside the grid.
    #[must_use]
    pub fn classify(&self, tile: TileCoord) -> TileKind {
        self.index(tile)
            .and_then(|index| self.tiles.get(index).copied())
            .unwrap_or(TileKind::OutOfBounds)
    }

    /// Reports whether the avatar may occupy the tile.
    #[must_use]
    pub fn is_passable(&self, tile: TileCoord) -> bool {
        self.classify(tile).is_passable()
    }

    /// Turns a pickup into open floor, returning the kind that was consumed.
    ///
    /// Consuming anything other than a pickup is a no-op that returns `None`,
    /// so repeated consumption of the same tile leaves the grid unchanged.
    pub fn consume(&mut self, tile: TileCoord) -> Option<TileKind> {
        let index = self.index(tile)?;
        let slot = self.tiles.get_mut(index)?;
        if !slot.is_pickup() {
            return None;
        }
        let consumed = *slot;
        *slot = TileKind::Open;
        Some(consumed)
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Tile the avatar spawns on.
    #[must_use]
    pub const fn spawn(&self) -> TileCoord {
        self.spawn
    }

    /// Tile that ends the session when reached.
    #[must_use]
    pub const fn goal(&self) -> TileCoord {
        self.goal
    }

    /// Iterates over the pickups that have not been consumed yet.
    pub fn pickups(&self) -> impl Iterator<Item = (TileCoord, TileKind)> + '_ {
        self.tiles_with_coords()
            .filter(|(_, kind)| kind.is_pickup())
    }

    /// Iterates over every tile together with its world coordinate, row by row.
    pub fn tiles_with_coords(&self) -> impl Iterator<Item = (TileCoord, TileKind)> + '_ {
        let width = self.width.max(1);
        self.tiles.iter().enumerate().map(move |(index, kind)| {
            let index = u32::try_from(index).unwrap_or(u32::MAX);
            (TileCoord::from_text(index % width, index / width), *kind)
        })
    }

    fn index(&self, tile: TileCoord) -> Option<usize> {
        let column = u32::try_from(tile.x()).ok()?;
        let row = u32::try_from(tile.y().checked_neg()?).ok()?;
        if column >= self.width || row >= self.height {
            return None;
        }
        let width = usize::try_from(self.width).ok()?;
        let row = usize::try_from(row).ok()?;
        let column = usize::try_from(column).ok()?;
        Some(row * width + column)
    }
}

fn resolve_spawn(
    start: Option<[u32; 2]>,
    spawn_glyphs: &[(usize, usize)],
) -> Result<[u32; 2], MalformedMapError> {
    if let Some(start) = start {
        let conflicting = spawn_glyphs.iter().find(|(column, row)| {
            u32::try_from(*column).ok() != Some(start[0])
                || u32::try_from(*row).ok() != Some(start[1])
        });
        if let Some((column, row)) = conflicting {
            return Err(MalformedMapError::DuplicateSpawn {
                row: *row,
                column: *column,
            });
        }
        return Ok(start);
    }

    match spawn_glyphs {
        [] => Err(MalformedMapError::MissingSpawn),
        [(column, row)] => {
            let column = u32::try_from(*column).map_err(|_| MalformedMapError::MissingSpawn)?;
            let row = u32::try_from(*row).map_err(|_| MalformedMapError::MissingSpawn)?;
            Ok([column, row])
        }
        [_, (column, row), ..] => Err(MalformedMapError::DuplicateSpawn {
            row: *row,
            column: *column,
        }),
    }
}
