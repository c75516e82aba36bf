//! Audio cue plumbing
//!
//! The sim never produces sound itself; it emits cues through the
//! `AudioSink` trait and a frontend decides what they sound like. The sink
//! is a tick-time dependency so cue emission stays part of the
//! deterministic update, not a post-hoc reconstruction.

/// Sound cue kinds emitted by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Any jump, including the double jump; also reused for most
    /// effect activations
    Jump,
    /// Hard landing
    Land,
    /// Collectible, checkpoint, or power-up pickup
    Collect,
    /// A life was lost
    Damage,
    /// Time warp activated
    TimeWarp,
    /// Laser entered its warning phase
    LaserWarning,
    /// Laser went live
    LaserFire,
}

/// Receiver for simulation sound cues
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Sink that drops every cue; used headless and in tests
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: AudioCue) {}
}

/// Sink that records cues in order; test helper
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    pub cues: Vec<AudioCue>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, cue: AudioCue) -> usize {
        self.cues.iter().filter(|&&c| c == cue).count()
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: AudioCue) {
        self.cues.push(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_order() {
        let mut sink = RecordingAudio::new();
        sink.play(AudioCue::Jump);
        sink.play(AudioCue::Land);
        sink.play(AudioCue::Jump);
        assert_eq!(sink.cues, vec![AudioCue::Jump, AudioCue::Land, AudioCue::Jump]);
        assert_eq!(sink.count(AudioCue::Jump), 2);
    }
}
