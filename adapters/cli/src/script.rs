//! Timed key scripts that drive headless sessions.
//!
//! Each non-empty line holds `<seconds> press <key>`, `<seconds> release <key>`
//! or `<seconds> blur`. Text after `#` is ignored.

use std::time::Duration;

use maze_escape_core::{InputState, Key, KeyEvent, UnknownKey};
use thiserror::Error;

/// Problem found while parsing a script.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub(crate) enum ScriptError {
    /// The timestamp is missing, negative or not a number.
    #[error("line {line}: invalid timestamp `{value}`")]
    InvalidTime { line: usize, value: String },
    /// The action is not `press`, `release` or `blur`.
    #[error("line {line}: unknown action `{value}`")]
    UnknownAction { line: usize, value: String },
    /// `press` or `release` without a key.
    #[error("line {line}: missing key")]
    MissingKey { line: usize },
    /// The key label is not recognised.
    #[error("line {line}: {source}")]
    UnknownKey {
        line: usize,
        #[source]
        source: UnknownKey,
    },
    /// Extra words after the event.
    #[error("line {line}: unexpected `{value}`")]
    Trailing { line: usize, value: String },
}

/// One scheduled key event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ScriptStep {
    pub(crate) at: Duration,
    pub(crate) event: KeyEvent,
}

/// Key events ordered by the time they fire.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Script {
    steps: Vec<ScriptStep>,
    cursor: usize,
    input: InputState,
}

impl Script {
    /// Parses a script, keeping lines with equal timestamps in file order.
    pub(crate) fn parse(text: &str) -> Result<Self, ScriptError> {
        let mut steps = Vec::new();
        for (number, raw) in text.lines().enumerate() {
            let line = number + 1;
            let content = raw.split('#').next().unwrap_or_default().trim();
            if content.is_empty() {
                continue;
            }
            steps.push(parse_step(line, content)?);
        }
        steps.sort_by(|a, b| a.at.cmp(&b.at));

        Ok(Self {
            steps,
            cursor: 0,
            input: InputState::new(),
        })
    }

    /// Number of scheduled events.
    pub(crate) fn len(&self) -> usize {
        self.steps.len()
    }

    /// Folds every event due by `elapsed` into the held keys and returns them.
    pub(crate) fn advance(&mut self, elapsed: Duration) -> InputState {
        while let Some(step) = self.steps.get(self.cursor) {
            if step.at > elapsed {
                break;
            }
            self.input.apply(step.event);
            self.cursor += 1;
        }
        self.input
    }
}

fn parse_step(line: usize, content: &str) -> Result<ScriptStep, ScriptError> {
    let mut words = content.split_whitespace();
    let time = words.next().unwrap_or_default();
    let at = time
        .parse::<f64>()
        .ok()
        .and_then(|seconds| Duration::try_from_secs_f64(seconds).ok())
        .ok_or_else(|| ScriptError::InvalidTime {
            line,
            value: time.to_owned(),
        })?;

    let event = match words.next() {
        Some("blur") => KeyEvent::FocusLost,
        Some(action @ ("press" | "release")) => {
            let label = words.next().ok_or(ScriptError::MissingKey { line })?;
            let key = label
                .parse::<Key>()
                .map_err(|source| ScriptError::UnknownKey { line, source })?;
            if action == "press" {
                KeyEvent::Pressed(key)
            } else {
                KeyEvent::Released(key)
            }
        }
        other => {
            return Err(ScriptError::UnknownAction {
                line,
                value: other.unwrap_or_default().to_owned(),
            })
        }
    };

    if let Some(extra) = words.next() {
        return Err(ScriptError::Trailing {
            line,
            value: extra.to_owned(),
        });
    }
    Ok(ScriptStep { at, event })
}
