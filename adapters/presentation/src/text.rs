//! Line-oriented backend that narrates frames to any writer.

use std::io::Write;

use anyhow::{Context, Result as AnyResult};

use crate::{Overlay, Presentation, PresentationBackend, SoundCue};

/// Writes HUD lines, overlays and cues as plain text.
#[derive(Debug)]
pub struct TextBackend<W> {
    out: W,
    hud_interval: u32,
    frames: u64,
    last_overlay: Option<Overlay>,
}

impl<W> TextBackend<W>
where
    W: Write,
{
    /// Creates a backend printing a HUD line every `hud_interval` frames.
    #[must_use]
    pub fn new(out: W, hud_interval: u32) -> Self {
        Self {
            out,
            hud_interval: hud_interval.max(1),
            frames: 0,
            last_overlay: None,
        }
    }

    /// Consumes the backend and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W> PresentationBackend for TextBackend<W>
where
    W: Write,
{
    fn present(&mut self, presentation: &Presentation) -> AnyResult<()> {
        for cue in &presentation.cues {
            writeln!(self.out, "* {}", cue_label(*cue)).context("failed to write cue")?;
        }

        if presentation.overlay != self.last_overlay {
            if let Some(overlay) = presentation.overlay {
                writeln!(self.out, "== {overlay} ==").context("failed to write overlay")?;
            }
            self.last_overlay = presentation.overlay;
        }

        if let Some(hud) = presentation.hud {
            if self.frames % u64::from(self.hud_interval) == 0 {
                writeln!(self.out, "[{}] {hud}", presentation.phase)
                    .context("failed to write hud")?;
            }
            self.frames += 1;
        }
        Ok(())
    }

    fn finish(&mut self) -> AnyResult<()> {
        self.out.flush().context("failed to flush presentation output")
    }
}

fn cue_label(cue: SoundCue) -> &'static str {
    match cue {
        SoundCue::EnergyPill => "energy restored",
        SoundCue::PowerUp => "overhead view",
        SoundCue::PowerUpExpired => "overhead view ended",
        SoundCue::Goal => "goal reached",
        SoundCue::Depleted => "energy depleted",
    }
}
