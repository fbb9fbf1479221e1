//! Sound effects
//!
//! The simulation talks to a [`SoundBoard`]; on the web the board is an
//! [`AudioManager`] that synthesizes every effect with the Web Audio API,
//! so no sound files need to be fetched.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Bullet fired
    Fire,
    /// Engine rumble, loops while thrust is held
    Thrust,
    /// Ship destroyed
    BangLarge,
    /// Rock hit; several can overlap
    BangSmall,
}

impl SoundEffect {
    /// Looping effects play until stopped; the others are fire-and-forget
    pub fn is_looping(self) -> bool {
        matches!(self, SoundEffect::Thrust)
    }
}

/// Audio capability used by the simulation
pub trait SoundBoard {
    fn play(&mut self, effect: SoundEffect);
    /// Stop a looping effect (no-op for one-shots)
    fn stop(&mut self, effect: SoundEffect);
    /// Whether a looping effect is currently playing
    fn is_playing(&self, effect: SoundEffect) -> bool;
}

/// Sound board for headless runs
#[derive(Debug, Default)]
pub struct Silence {
    thrust: bool,
}

impl SoundBoard for Silence {
    fn play(&mut self, effect: SoundEffect) {
        if effect.is_looping() {
            self.thrust = true;
        }
    }

    fn stop(&mut self, effect: SoundEffect) {
        if effect.is_looping() {
            self.thrust = false;
        }
    }

    fn is_playing(&self, effect: SoundEffect) -> bool {
        effect.is_looping() && self.thrust
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundBoard, SoundEffect};
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        muted: bool,
        /// Running engine voice, if any
        thrust: Option<(OscillatorNode, OscillatorNode)>,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: settings.master_volume.clamp(0.0, 1.0),
                sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
                muted: settings.muted,
                thrust: None,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Mute/unmute all audio
        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
            if muted {
                self.stop(SoundEffect::Thrust);
            }
        }

        fn effective_volume(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * self.sfx_volume
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Fire - short descending zap
        fn play_fire(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 1200.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(1200.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(200.0, t + 0.12)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        /// Thrust - low detuned rumble, kept until stopped
        fn start_thrust(&mut self, vol: f32) {
            let Some(ctx) = self.ctx.as_ref() else { return };
            let Some((low, low_gain)) = self.create_osc(ctx, 48.0, OscillatorType::Sawtooth)
            else {
                return;
            };
            let Some((high, high_gain)) = self.create_osc(ctx, 53.0, OscillatorType::Square)
            else {
                return;
            };
            low_gain.gain().set_value(vol * 0.2);
            high_gain.gain().set_value(vol * 0.08);
            low.start().ok();
            high.start().ok();
            self.thrust = Some((low, high));
        }

        /// Large explosion - long rumbling boom
        fn play_bang_large(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 90.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 1.2)
                .ok();
            osc.frequency().set_value_at_time(90.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(20.0, t + 1.2)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 1.3).ok();

            // High frequency crack
            if let Some((osc2, gain2)) = self.create_osc(ctx, 1500.0, OscillatorType::Square) {
                gain2.gain().set_value_at_time(vol * 0.2, t).ok();
                gain2
                    .gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc2.start().ok();
                osc2.stop_with_when(t + 0.2).ok();
            }
        }

        /// Small explosion - short thud; every call builds new nodes so hits overlap
        fn play_bang_small(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 160.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();
            osc.frequency().set_value_at_time(160.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(40.0, t + 0.3)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.35).ok();
        }
    }

    impl SoundBoard for AudioManager {
        fn play(&mut self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = self.ctx.clone() else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Fire => self.play_fire(&ctx, vol),
                SoundEffect::Thrust => {
                    if self.thrust.is_none() {
                        self.start_thrust(vol);
                    }
                }
                SoundEffect::BangLarge => self.play_bang_large(&ctx, vol),
                SoundEffect::BangSmall => self.play_bang_small(&ctx, vol),
            }
        }

        fn stop(&mut self, effect: SoundEffect) {
            if effect.is_looping() {
                if let Some((low, high)) = self.thrust.take() {
                    low.stop().ok();
                    high.stop().ok();
                }
            }
        }

        fn is_playing(&self, effect: SoundEffect) -> bool {
            effect.is_looping() && self.thrust.is_some()
        }
    }
}
