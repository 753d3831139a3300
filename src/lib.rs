//! wavevox - polyphonic wavetable voices on a real-time render path
//!
//! Design principles:
//! - A fixed pool of voices, each five oscillators wired the same way
//! - Wavetables are staged by control threads and committed by the renderer
//!   without ever waiting
//! - Control edits take short per-voice guards; the renderer holds each voice
//!   guard for one block
//! - Sizes and sample rate are fixed when the engine is built
//!
//! ```
//! use wavevox::{Engine, EngineConfig, Oscillator, Role, ShapeId, VoiceId};
//!
//! let (engine, mut renderer) = Engine::new(EngineConfig::new(48_000).with_voices(2))?;
//! engine.shapes().sine(ShapeId(1), 2048)?;
//!
//! for v in 0..2 {
//!     let voice = VoiceId(v);
//!     for role in Role::ALL {
//!         engine.set_oscillator(voice, role, Oscillator::new(ShapeId(0)));
//!     }
//!     engine.set_oscillator(voice, Role::Wave, Oscillator::new(ShapeId(1)));
//!     engine.set_inc_from_freq(voice, Role::Wave, wavevox::freq_from_pitch(48.0 + 7.0 * v as f64));
//! }
//! engine.enable_voices(VoiceId(0), VoiceId(1));
//!
//! let mut block = vec![0.0; renderer.block_len()];
//! renderer.render(&mut block);
//! # Ok::<(), wavevox::Error>(())
//! ```

mod bridge;
mod config;
mod control;
mod engine;
mod error;
mod increment;
mod ingest;
mod renderer;
mod voice;
pub mod wavetable;

#[cfg(feature = "cpal_sink")]
mod device;

pub use bridge::BlockBridge;
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{Error, Result};
pub use increment::{freq_from_pitch, inc_from_freq, inc_from_period, inc_from_speed};
pub use ingest::deinterleave;
pub use renderer::{pan_factors, Renderer};
pub use voice::{Boundary, OscField, OscParam, Oscillator, Role, Voice, VoiceId};
pub use wavetable::{ShapeId, WavetableStore};

#[cfg(feature = "cpal_sink")]
pub use device::{CpalDevice, OutputStream};
