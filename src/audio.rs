//! Audio cues
//!
//! The game only decides *when* to play; a `SoundBackend` does the playing.

use crate::settings::AudioSettings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ocean waves, looped from startup
    Ambient,
    /// Radar ping when a pulse starts
    Radar,
}

impl SoundEffect {
    /// Asset file name
    pub fn asset(&self) -> &'static str {
        match self {
            SoundEffect::Ambient => "ocean-waves.mp3",
            SoundEffect::Radar => "radar.mp3",
        }
    }

    pub fn looping(&self) -> bool {
        matches!(self, SoundEffect::Ambient)
    }
}

/// Something that can actually make noise
pub trait SoundBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Backend that only logs, for hosts without an audio device
#[derive(Debug, Default)]
pub struct LogBackend;

impl SoundBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!(
            "play {} (volume {:.2}{})",
            effect.asset(),
            volume,
            if effect.looping() { ", looped" } else { "" }
        );
    }
}

/// Audio manager for the game
pub struct AudioManager<B: SoundBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    ambient_started: bool,
}

impl<B: SoundBackend> AudioManager<B> {
    pub fn new(backend: B, settings: &AudioSettings) -> Self {
        Self {
            backend,
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.muted,
            ambient_started: false,
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if effect.looping() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        self.master_volume * channel
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(effect);
        if vol <= 0.0 {
            return;
        }
        self.backend.play(effect, vol);
    }

    /// Start the ambient loop once
    pub fn start_ambient(&mut self) {
        if self.ambient_started {
            return;
        }
        self.ambient_started = true;
        self.play(SoundEffect::Ambient);
    }

    /// React to the frame's game events
    pub fn handle(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::PulseStarted = event {
                self.play(SoundEffect::Radar);
            }
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::FindKind;

    #[derive(Default)]
    struct Recorder(Vec<(SoundEffect, f32)>);

    impl SoundBackend for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            self.0.push((effect, volume));
        }
    }

    #[test]
    fn test_radar_on_pulse_start_only() {
        let mut audio = AudioManager::new(Recorder::default(), &AudioSettings::default());
        audio.handle(&[
            GameEvent::PulseStarted,
            GameEvent::FoodFound {
                kind: FindKind::Echo,
                score: 1,
            },
            GameEvent::PulseFaded,
        ]);
        let played: Vec<SoundEffect> = audio.backend().0.iter().map(|(e, _)| *e).collect();
        assert_eq!(played, vec![SoundEffect::Radar]);
    }

    #[test]
    fn test_ambient_starts_once_on_music_channel() {
        let settings = AudioSettings::default();
        let mut audio = AudioManager::new(Recorder::default(), &settings);
        audio.start_ambient();
        audio.start_ambient();
        assert_eq!(audio.backend().0.len(), 1);
        let (effect, vol) = audio.backend().0[0];
        assert_eq!(effect, SoundEffect::Ambient);
        assert!((vol - settings.master_volume * settings.music_volume).abs() < 1e-6);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = AudioManager::new(Recorder::default(), &AudioSettings::default());
        audio.set_muted(true);
        audio.play(SoundEffect::Radar);
        assert!(audio.backend().0.is_empty());
    }
}
