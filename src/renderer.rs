//! Block rendering on the real-time thread.

use core::f64::consts::FRAC_PI_4;
use std::sync::Arc;

use crate::engine::Shared;
use crate::wavetable::{ShapeId, Tables};

/// Constant-power gains `(left, right)` for a pan position in `[-1, 1]`.
///
/// ```
/// let (l, r) = wavevox::pan_factors(0.0);
/// assert!((l - r).abs() < 1e-12);
/// assert!((l * l + r * r - 1.0).abs() < 1e-12);
/// ```
#[inline]
pub fn pan_factors(pan: f64) -> (f64, f64) {
    (
        ((pan - 1.0) * FRAC_PI_4).sin().abs(),
        ((pan + 1.0) * FRAC_PI_4).sin().abs(),
    )
}

/// Produces interleaved stereo blocks from the engine's voices.
///
/// Owned by exactly one thread, normally the audio callback. It owns the
/// committed wavetables, so sample reads never lock; the only guards it
/// takes are the per-voice ones, each held for one block, plus the volume
/// guard once per block.
pub struct Renderer {
    shared: Arc<Shared>,
    tables: Tables,
}

impl Renderer {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        let tables = Tables::new(shared.config.shapes);
        Self { shared, tables }
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.shared.config.sample_rate
    }

    #[inline]
    pub fn block_frames(&self) -> usize {
        self.shared.config.block_frames
    }

    /// Interleaved samples in one block.
    #[inline]
    pub fn block_len(&self) -> usize {
        self.shared.config.block_len()
    }

    /// Pull staged wavetable edits into the committed tables.
    ///
    /// [`render`](Self::render) already does this at the top of every block.
    /// Never waits on a control thread; busy slots are retried next time.
    pub fn commit_pending(&mut self) -> usize {
        self.tables.commit_pending(&self.shared.shapes)
    }

    /// Committed sample of `shape` at `phase`, clamped into the table.
    #[inline]
    pub fn read(&self, shape: ShapeId, phase: f64) -> f32 {
        self.shared.shapes.check(shape);
        self.tables.read(shape, phase)
    }

    #[inline]
    pub fn table_len(&self, shape: ShapeId) -> usize {
        self.shared.shapes.check(shape);
        self.tables.len(shape)
    }

    /// Render one block of interleaved stereo into `out`.
    ///
    /// Samples are not clipped.
    ///
    /// # Panics
    ///
    /// If `out` is not exactly [`block_len`](Self::block_len) samples long.
    pub fn render(&mut self, out: &mut [f32]) {
        assert_eq!(
            out.len(),
            self.block_len(),
            "render buffer must hold exactly one block"
        );

        self.tables.commit_pending(&self.shared.shapes);
        out.fill(0.0);

        let tables = &self.tables;
        let mut enabled = 0usize;

        for slot in self.shared.voices.iter() {
            let mut voice = slot.lock();
            if !voice.enabled {
                continue;
            }
            enabled += 1;

            let (left, right) = pan_factors(voice.pan);
            for frame in out.chunks_exact_mut(2) {
                let sample = voice.tick(tables);
                frame[0] += (sample * left) as f32;
                frame[1] += (sample * right) as f32;
            }
        }

        if enabled == 0 {
            return;
        }

        let volume = *self.shared.volume.lock();
        let gain = if enabled > 1 {
            volume / enabled as f64
        } else {
            volume
        };
        for sample in out.iter_mut() {
            *sample = (*sample as f64 * gain) as f32;
        }
    }
}
