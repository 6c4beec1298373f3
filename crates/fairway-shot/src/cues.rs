//! Sound cues scheduled to play after a delay on the presentation clock.

use crate::collaborators::SoundSink;
use crate::surface::SoundClip;

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingCue {
    clip: SoundClip,
    volume: f32,
    remaining: f32,
}

/// Queue of delayed one-shot cues, drained by [`DelayedCues::tick`].
#[derive(Debug, Clone, Default)]
pub struct DelayedCues {
    pending: Vec<PendingCue>,
}

impl DelayedCues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plays `clip` at `volume` once `delay` seconds have passed.
    pub fn schedule(&mut self, clip: SoundClip, volume: f32, delay: f32) {
        self.pending.push(PendingCue {
            clip,
            volume,
            remaining: delay.max(0.0),
        });
    }

    /// Counts every pending cue down by `dt` and plays the ones that are due,
    /// in the order they were scheduled.
    pub fn tick(&mut self, dt: f32, sound: &mut dyn SoundSink) {
        for cue in &mut self.pending {
            cue.remaining -= dt;
        }
        self.pending.retain(|cue| {
            if cue.remaining <= 0.0 {
                sound.play(cue.clip, cue.volume);
                false
            } else {
                true
            }
        });
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
