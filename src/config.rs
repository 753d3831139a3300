//! Engine configuration.

use crate::error::{Error, Result};

/// Fixed parameters of an [`Engine`](crate::Engine), decided once at startup.
///
/// Built with a sample rate (usually whatever the output device reports) and
/// adjusted with the `with_*` builder methods:
///
/// ```
/// # use wavevox::EngineConfig;
/// let config = EngineConfig::new(44_100)
///     .with_block_frames(512)
///     .with_voices(8)
///     .with_shapes(4);
/// assert_eq!(config.block_len(), 1024);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Output sample rate in Hz
    pub sample_rate: u32,
    /// Stereo frames per rendered block (power of two)
    pub block_frames: usize,
    /// Number of voices in the pool
    pub voices: usize,
    /// Number of wavetable slots
    pub shapes: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000,
            block_frames: 1024,
            voices: 16,
            shapes: 16,
        }
    }
}

impl EngineConfig {
    /// Create a config at the given sample rate, with default pool and block sizes.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            ..Self::default()
        }
    }

    /// Set the block size in stereo frames.
    pub fn with_block_frames(mut self, block_frames: usize) -> Self {
        self.block_frames = block_frames;
        self
    }

    /// Set the number of voices.
    pub fn with_voices(mut self, voices: usize) -> Self {
        self.voices = voices;
        self
    }

    /// Set the number of wavetable slots.
    pub fn with_shapes(mut self, shapes: usize) -> Self {
        self.shapes = shapes;
        self
    }

    /// Interleaved samples per block (two per frame).
    #[inline]
    pub fn block_len(&self) -> usize {
        self.block_frames * 2
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(Error::InvalidSampleRate);
        }
        if !self.block_frames.is_power_of_two() {
            return Err(Error::InvalidBlockFrames(self.block_frames));
        }
        // every oscillator starts out pointing at slot 0
        if self.shapes == 0 {
            return Err(Error::NoShapes);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_power_of_two_blocks() {
        let err = EngineConfig::new(48_000).with_block_frames(1000).validate();
        assert!(matches!(err, Err(Error::InvalidBlockFrames(1000))));

        let err = EngineConfig::new(48_000).with_block_frames(0).validate();
        assert!(matches!(err, Err(Error::InvalidBlockFrames(0))));
    }

    #[test]
    fn rejects_zero_rate_and_zero_shapes() {
        assert!(matches!(
            EngineConfig::new(0).validate(),
            Err(Error::InvalidSampleRate)
        ));
        assert!(matches!(
            EngineConfig::new(48_000).with_shapes(0).validate(),
            Err(Error::NoShapes)
        ));
    }

    #[test]
    fn zero_voices_is_allowed() {
        assert!(EngineConfig::new(48_000).with_voices(0).validate().is_ok());
    }
}
