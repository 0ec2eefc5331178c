//! Sound cues for game events
//!
//! Clips are loaded through the asset manifest; playback is WASM only.

use crate::assets::names;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Egg laid
    Cluck,
    /// Egg hatched
    Pop,
}

impl SoundEffect {
    /// Audio asset backing this effect
    pub fn asset(&self) -> &'static str {
        match self {
            SoundEffect::Cluck => names::CLUCK,
            SoundEffect::Pop => names::POP,
        }
    }

    /// Sound for a game event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::EggLaid { .. } | GameEvent::ResetWave { .. } => Some(SoundEffect::Cluck),
            GameEvent::EggHatched { .. } => Some(SoundEffect::Pop),
            GameEvent::PhaseChanged { .. } | GameEvent::ChickenLeft { .. } => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use manager::AudioManager;

#[cfg(target_arch = "wasm32")]
mod manager {
    use web_sys::HtmlAudioElement;

    use super::SoundEffect;
    use crate::assets::AssetStore;
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        clips: AssetStore<HtmlAudioElement>,
        master_volume: f32,
        muted: bool,
    }

    impl AudioManager {
        pub fn new(clips: AssetStore<HtmlAudioElement>, settings: &Settings) -> Self {
            Self {
                clips,
                master_volume: settings.master_volume,
                muted: settings.muted,
            }
        }

        /// Play a sound effect from the start
        pub fn play(&self, effect: SoundEffect) {
            if self.muted || self.master_volume <= 0.0 {
                return;
            }
            let clip = self.clips.get(effect.asset());
            clip.set_volume(self.master_volume as f64);
            clip.set_current_time(0.0);
            // Rejected until the first user gesture; nothing to do about it
            if let Err(e) = clip.play() {
                log::debug!("Audio playback refused: {:?}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;

    #[test]
    fn test_event_sounds() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::EggLaid { pos: (0.0, 0.0) }),
            Some(SoundEffect::Cluck)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::EggHatched { pos: (0.0, 0.0) }),
            Some(SoundEffect::Pop)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PhaseChanged {
                from: GamePhase::Loading,
                to: GamePhase::WelcomeScreen,
            }),
            None
        );
        assert_eq!(SoundEffect::Pop.asset(), names::POP);
    }
}
