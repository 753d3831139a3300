//! Error types.

use crate::wavetable::ShapeId;

/// Errors reported by the engine and its adapters.
///
/// Invalid voice or shape indices are not represented here: the control
/// surface treats them as caller bugs and panics.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("sample rate must be non-zero")]
    InvalidSampleRate,

    #[error("block size must be a non-zero power of two, got {0} frames")]
    InvalidBlockFrames(usize),

    #[error("engine needs at least one shape slot")]
    NoShapes,

    #[error("cannot stage an empty wavetable into shape {0}")]
    EmptyShape(ShapeId),

    /// Decoded audio with more channels than the store can ingest (1 or 2).
    #[error("unsupported channel count: {0} (expected 1 or 2)")]
    UnsupportedChannels(usize),

    #[error("stereo channels differ in length ({left} vs {right} samples)")]
    ChannelLengthMismatch { left: usize, right: usize },

    #[cfg(feature = "cpal_sink")]
    #[error("no audio output device available")]
    NoDevice,

    /// The engine must run at the rate the device reports.
    #[cfg(feature = "cpal_sink")]
    #[error("engine runs at {engine} Hz but the device runs at {device} Hz")]
    SampleRateMismatch { device: u32, engine: u32 },

    #[cfg(feature = "cpal_sink")]
    #[error("could not query device config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[cfg(feature = "cpal_sink")]
    #[error("could not build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[cfg(feature = "cpal_sink")]
    #[error("could not start output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[cfg(feature = "cpal_sink")]
    #[error("could not pause output stream: {0}")]
    PauseStream(#[from] cpal::PauseStreamError),

    #[cfg(feature = "cpal_sink")]
    #[error("unsupported sample format: {0:?}")]
    UnsupportedSampleFormat(cpal::SampleFormat),
}

pub type Result<T> = core::result::Result<T, Error>;
