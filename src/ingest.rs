//! Staging already-decoded audio as wavetables.
//!
//! Decoding and resampling happen elsewhere; this only accepts f32 samples at
//! whatever rate the caller wants them played back against.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::wavetable::{ShapeId, WavetableStore};

/// Split interleaved frames into one buffer per channel.
///
/// A trailing partial frame is dropped.
pub fn deinterleave(samples: &[f32], channels: usize) -> Vec<Vec<f32>> {
    if channels == 0 {
        return Vec::new();
    }
    let frames = samples.len() / channels;
    let mut out: Vec<Vec<f32>> = (0..channels).map(|_| Vec::with_capacity(frames)).collect();
    for frame in samples.chunks_exact(channels) {
        for (channel, &sample) in out.iter_mut().zip(frame) {
            channel.push(sample);
        }
    }
    out
}

impl WavetableStore {
    /// Stage decoded channels starting at slot `first`.
    ///
    /// Mono goes into `first`; stereo goes into `first` (left) and the slot
    /// after it (right). Anything else is rejected before any slot is touched.
    /// Returns the number of slots staged.
    pub fn ingest(&self, first: ShapeId, channels: &[&[f32]]) -> Result<usize> {
        match channels {
            [mono] => {
                self.stage(first, mono)?;
            }
            [left, right] => {
                if left.len() != right.len() {
                    return Err(Error::ChannelLengthMismatch {
                        left: left.len(),
                        right: right.len(),
                    });
                }
                if left.is_empty() {
                    return Err(Error::EmptyShape(first));
                }
                let second = ShapeId(first.0 + 1);
                self.check(second);
                self.stage(first, left)?;
                self.stage(second, right)?;
            }
            _ => {
                warn!(channels = channels.len(), shape = %first, "rejected unsupported channel count");
                return Err(Error::UnsupportedChannels(channels.len()));
            }
        }

        debug!(shape = %first, channels = channels.len(), "ingested audio");
        Ok(channels.len())
    }

    /// Stage interleaved decoded audio starting at slot `first`.
    ///
    /// See [`ingest`](Self::ingest) for slot assignment.
    pub fn ingest_interleaved(&self, first: ShapeId, samples: &[f32], channels: usize) -> Result<usize> {
        if !(1..=2).contains(&channels) {
            warn!(channels, shape = %first, "rejected unsupported channel count");
            return Err(Error::UnsupportedChannels(channels));
        }
        let split = deinterleave(samples, channels);
        let refs: Vec<&[f32]> = split.iter().map(Vec::as_slice).collect();
        self.ingest(first, &refs)
    }
}
