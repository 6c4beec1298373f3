//! Headless stand-ins for the audio and camera collaborators. Both log what a
//! windowed build would have played or moved.

use fairway_shot::{SoundClip, SoundSink, ViewControl};
use tracing::debug;

/// Sound sink that logs cues at their mixed volume.
#[derive(Debug, Clone)]
pub struct LogSink {
    master: f32,
    sfx: f32,
    played: u32,
}

impl LogSink {
    pub fn new(master_volume: f32, sfx_volume: f32) -> Self {
        Self {
            master: master_volume.clamp(0.0, 1.0),
            sfx: sfx_volume.clamp(0.0, 1.0),
            played: 0,
        }
    }

    /// Cues played so far.
    pub fn played(&self) -> u32 {
        self.played
    }

    /// Volume a cue requested at `volume` is played at.
    pub fn mix(&self, volume: f32) -> f32 {
        (volume * self.master * self.sfx).clamp(0.0, 1.0)
    }
}

impl SoundSink for LogSink {
    fn play(&mut self, clip: SoundClip, volume: f32) {
        debug!(?clip, volume = self.mix(volume), "sound cue");
        self.played += 1;
    }
}

/// Camera that only counts resets.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogView {
    resets: u32,
}

impl LogView {
    pub fn resets(&self) -> u32 {
        self.resets
    }
}

impl ViewControl for LogView {
    fn reset_pose(&mut self) {
        self.resets += 1;
        debug!(resets = self.resets, "camera snapped behind golfer");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_mixes_volume() {
        let mut sink = LogSink::new(0.5, 0.5);
        assert_eq!(sink.mix(1.0), 0.25);
        sink.play(SoundClip::ClubStrike, 1.0);
        assert_eq!(sink.played(), 1);
    }

    #[test]
    fn test_sink_clamps_settings() {
        let sink = LogSink::new(3.0, -1.0);
        assert_eq!(sink.mix(1.0), 0.0);
        assert_eq!(LogSink::new(3.0, 1.0).mix(0.5), 0.5);
    }

    #[test]
    fn test_view_counts_resets() {
        let mut view = LogView::default();
        view.reset_pose();
        view.reset_pose();
        assert_eq!(view.resets(), 2);
    }
}
