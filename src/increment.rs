//! Phase increment math.
//!
//! Oscillator phase is normalized to `[0, 1]` over a whole table, so an
//! increment is "fraction of the table per output frame".

/// Twelfth root of two.
const SEMITONE_RATIO: f64 = 1.059_463_094_359_295_3;
const A4_FREQ: f64 = 440.0;
/// Pitch numbering starts at C0 = 0, twelve per octave.
const A4_PITCH: f64 = 57.0;

/// Increment that plays a `len`-sample table `freq` times per second.
#[inline]
pub fn inc_from_freq(sample_rate: u32, len: usize, freq: f64) -> f64 {
    let len = len as f64;
    (freq / (sample_rate as f64 / len)) / len
}

/// Increment that sweeps the whole table once every `period` seconds.
///
/// Handy for envelopes: a period of 0.5 gets an envelope from 0 to 1 in half
/// a second.
#[inline]
pub fn inc_from_period(sample_rate: u32, period: f64) -> f64 {
    (1.0 / sample_rate as f64) / period
}

/// Increment that steps `speed` table samples per output frame.
#[inline]
pub fn inc_from_speed(len: usize, speed: f64) -> f64 {
    speed / len as f64
}

/// Equal-tempered frequency of a pitch number (C0 = 0, A4 = 57 = 440 Hz).
#[inline]
pub fn freq_from_pitch(pitch: f64) -> f64 {
    SEMITONE_RATIO.powf(pitch - A4_PITCH) * A4_FREQ
}
