//! Engine construction and the state shared between control and render threads.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use tracing::info;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::renderer::Renderer;
use crate::voice::{Voice, VoiceId};
use crate::wavetable::{ShapeId, WavetableStore};

pub(crate) struct Shared {
    pub(crate) config: EngineConfig,
    pub(crate) shapes: WavetableStore,
    pub(crate) voices: Box<[Mutex<Voice>]>,
    pub(crate) volume: Mutex<f64>,
}

impl Shared {
    #[inline]
    pub(crate) fn voice(&self, id: VoiceId) -> MutexGuard<'_, Voice> {
        assert!(
            id.0 < self.voices.len(),
            "voice {} out of range (engine has {} voices)",
            id,
            self.voices.len()
        );
        self.voices[id.0].lock()
    }
}

/// Control handle for a running synth.
///
/// Cheap to clone and safe to share between threads; every clone drives the
/// same voices and wavetables. The matching [`Renderer`] is handed to whoever
/// owns the audio callback.
///
/// ```
/// use wavevox::{Engine, EngineConfig, Oscillator, Role, ShapeId, VoiceId};
///
/// let (engine, mut renderer) = Engine::new(EngineConfig::new(44_100).with_voices(4))?;
/// engine.shapes().sine(ShapeId(1), 1024)?;
///
/// let voice = VoiceId(0);
/// engine.set_oscillator(voice, Role::Wave, Oscillator::new(ShapeId(1)));
/// engine.set_inc_from_freq(voice, Role::Wave, 220.0);
/// engine.enable_voice(voice);
///
/// let mut block = vec![0.0; renderer.block_len()];
/// renderer.render(&mut block);
/// # Ok::<(), wavevox::Error>(())
/// ```
#[derive(Clone)]
pub struct Engine {
    pub(crate) shared: Arc<Shared>,
}

impl Engine {
    /// Validate `config` and build the control handle plus its renderer.
    ///
    /// All voices start disabled with zeroed oscillators on shape 0, every
    /// shape slot holds a single `1.0` sample and global volume is 1.
    pub fn new(config: EngineConfig) -> Result<(Engine, Renderer)> {
        config.validate()?;

        let shared = Arc::new(Shared {
            config,
            shapes: WavetableStore::new(config.shapes),
            voices: (0..config.voices).map(|_| Mutex::new(Voice::default())).collect(),
            volume: Mutex::new(1.0),
        });

        info!(
            sample_rate = config.sample_rate,
            block_frames = config.block_frames,
            voices = config.voices,
            shapes = config.shapes,
            "engine created"
        );

        let renderer = Renderer::new(shared.clone());
        Ok((Engine { shared }, renderer))
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.shared.config
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.shared.config.sample_rate
    }

    /// Frames per rendered block.
    #[inline]
    pub fn block_frames(&self) -> usize {
        self.shared.config.block_frames
    }

    #[inline]
    pub fn voice_count(&self) -> usize {
        self.shared.voices.len()
    }

    /// The wavetable slots. Staged edits are picked up by the next render.
    #[inline]
    pub fn shapes(&self) -> &WavetableStore {
        &self.shared.shapes
    }

    /// Committed length of a shape, as the renderer currently sees it.
    pub fn shape_len(&self, id: ShapeId) -> usize {
        self.shared.shapes.len(id)
    }

    pub fn set_global_volume(&self, volume: f64) {
        *self.shared.volume.lock() = volume;
    }

    pub fn global_volume(&self) -> f64 {
        *self.shared.volume.lock()
    }
}
