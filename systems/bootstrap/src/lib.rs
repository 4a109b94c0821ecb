#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Map catalog that prepares the mazes offered by each difficulty.

use log::{debug, info};
use maze_escape_core::{Difficulty, MapDefinition, MapIndex};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use thiserror::Error;

const EASY_MAPS: &str = include_str!("../maps/easy.toml");
const MEDIUM_MAPS: &str = include_str!("../maps/medium.toml");
const HARD_MAPS: &str = include_str!("../maps/hard.toml");

/// Failure raised while parsing a map catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A bundled map file failed to parse.
    #[error("bundled {difficulty} maps are not valid toml")]
    Bundled {
        /// Difficulty whose pool failed to parse.
        difficulty: Difficulty,
        /// Underlying parse failure.
        #[source]
        source: toml::de::Error,
    },
    /// A user supplied catalog failed to parse.
    #[error("map catalog is not valid toml")]
    Parse(#[from] toml::de::Error),
}

/// How a session picks its map from the difficulty's pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapSelection {
    /// Draw a uniformly random map.
    Random,
    /// Use the map at the provided index.
    Fixed(MapIndex),
}

/// Map definitions grouped by difficulty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MapCatalog {
    #[serde(default)]
    easy: Vec<MapDefinition>,
    #[serde(default)]
    medium: Vec<MapDefinition>,
    #[serde(default)]
    hard: Vec<MapDefinition>,
}

#[derive(Deserialize)]
struct MapPool {
    #[serde(default)]
    maps: Vec<MapDefinition>,
}

impl MapCatalog {
    /// Loads the mazes bundled with the game.
    pub fn builtin() -> Result<Self, CatalogError> {
        let catalog = Self {
            easy: parse_pool(Difficulty::Easy, EASY_MAPS)?,
            medium: parse_pool(Difficulty::Medium, MEDIUM_MAPS)?,
            hard: parse_pool(Difficulty::Hard, HARD_MAPS)?,
        };
        debug!(
            "bundled catalog holds {}/{}/{} maps",
            catalog.easy.len(),
            catalog.medium.len(),
            catalog.hard.len()
        );
        Ok(catalog)
    }

    /// Parses a catalog with `[[easy]]`, `[[medium]]` and `[[hard]]` tables.
    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(contents)?)
    }

    /// Maps offered for the provided difficulty.
    #[must_use]
    pub fn maps(&self, difficulty: Difficulty) -> &[MapDefinition] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    /// Looks up a single map.
    #[must_use]
    pub fn get(&self, difficulty: Difficulty, index: MapIndex) -> Option<&MapDefinition> {
        let index = usize::try_from(index.get()).ok()?;
        self.maps(difficulty).get(index)
    }

    /// Resolves a selection to a concrete index, drawing from `rng` for
    /// [`MapSelection::Random`]. Returns `None` for an empty pool or an index
    /// past its end.
    pub fn select(
        &self,
        difficulty: Difficulty,
        selection: MapSelection,
        rng: &mut ChaCha8Rng,
    ) -> Option<(MapIndex, &MapDefinition)> {
        let pool = self.maps(difficulty);
        let index = match selection {
            MapSelection::Fixed(index) => index,
            MapSelection::Random => {
                if pool.is_empty() {
                    return None;
                }
                let drawn = rng.gen_range(0..pool.len());
                MapIndex::new(u32::try_from(drawn).ok()?)
            }
        };
        let map = self.get(difficulty, index)?;
        info!("selected {difficulty} map {index}");
        Some((index, map))
    }
}

fn parse_pool(difficulty: Difficulty, contents: &str) -> Result<Vec<MapDefinition>, CatalogError> {
    let pool: MapPool = toml::from_str(contents)
        .map_err(|source| CatalogError::Bundled { difficulty, source })?;
    Ok(pool.maps)
}
