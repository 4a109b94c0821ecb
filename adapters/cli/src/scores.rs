//! Best distances persisted as a flat JSON object such as `{"easy0": 31.5}`.

use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result as AnyResult};
use log::debug;
use maze_escape_core::{ScoreBoard, ScoreKey};

/// Score board backed by an optional JSON file.
#[derive(Debug, Default)]
pub(crate) struct JsonScoreBoard {
    path: Option<PathBuf>,
    entries: BTreeMap<String, f32>,
    dirty: bool,
}

impl JsonScoreBoard {
    /// Loads the scores stored at `path`. A missing file starts empty.
    pub(crate) fn open(path: &Path) -> AnyResult<Self> {
        let entries = match fs::read_to_string(path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents)
                .with_context(|| format!("{} is not a valid score file", path.display()))?,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!("no score file at {}, starting fresh", path.display());
                BTreeMap::new()
            }
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("failed to read scores from {}", path.display()))
            }
        };

        Ok(Self {
            path: Some(path.to_path_buf()),
            entries,
            dirty: false,
        })
    }

    /// Score board that is never written to disk.
    pub(crate) fn in_memory() -> Self {
        Self::default()
    }

    /// Writes the scores back if any changed since loading.
    pub(crate) fn save(&mut self) -> AnyResult<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        if !self.dirty {
            return Ok(());
        }

        let json =
            serde_json::to_string_pretty(&self.entries).context("failed to encode scores")?;
        fs::write(path, json)
            .with_context(|| format!("failed to write scores to {}", path.display()))?;
        self.dirty = false;
        Ok(())
    }
}

impl ScoreBoard for JsonScoreBoard {
    fn best(&self, key: &ScoreKey) -> Option<f32> {
        self.entries.get(&key.to_string()).copied()
    }

    fn set_best(&mut self, key: ScoreKey, distance: f32) {
        let _ = self.entries.insert(key.to_string(), distance);
        self.dirty = true;
    }
}
