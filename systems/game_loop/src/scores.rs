//! Best-score bookkeeping shared by the loop and its adapters.

use std::collections::BTreeMap;

use log::info;
use maze_escape_core::{ScoreBoard, ScoreKey};

/// New best distance recorded when a session was won.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BestScoreUpdate {
    /// Map the score belongs to.
    pub key: ScoreKey,
    /// Distance travelled in the winning session.
    pub distance: f32,
    /// Best distance before this session, if one was recorded.
    pub previous: Option<f32>,
}

/// Score board held entirely in memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryScoreBoard {
    entries: BTreeMap<ScoreKey, f32>,
}

impl MemoryScoreBoard {
    /// Creates an empty score board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates over every recorded best in key order.
    pub fn iter(&self) -> impl Iterator<Item = (ScoreKey, f32)> + '_ {
        self.entries.iter().map(|(key, distance)| (*key, *distance))
    }
}

impl ScoreBoard for MemoryScoreBoard {
    fn best(&self, key: &ScoreKey) -> Option<f32> {
        self.entries.get(key).copied()
    }

    fn set_best(&mut self, key: ScoreKey, distance: f32) {
        let _ = self.entries.insert(key, distance);
    }
}

/// Stores `distance` when it beats the recorded best. Shorter is better and a
/// first completion always counts.
pub fn record_best<S>(scores: &mut S, key: ScoreKey, distance: f32) -> Option<BestScoreUpdate>
where
    S: ScoreBoard + ?Sized,
{
    let previous = scores.best(&key);
    if previous.is_some_and(|best| best <= distance) {
        return None;
    }

    info!("new best for {key}: {distance:.2} tiles");
    scores.set_best(key, distance);
    Some(BestScoreUpdate {
        key,
        distance,
        previous,
    })
}
