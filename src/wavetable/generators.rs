//! Deterministic single-cycle waveforms.
//!
//! Each generator returns `len` samples; the store stages them into a slot.

use core::f64::consts::TAU;

/// One cycle of a sine, starting at 0 and rising.
pub fn sine(len: usize) -> Vec<f32> {
    let step = TAU / len as f64;
    (0..len).map(|i| (i as f64 * step).sin() as f32).collect()
}

/// Falling ramp from +1 at the first sample to just above -1 at the last.
pub fn saw(len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| (1.0 - (i as f64 / len as f64) * 2.0) as f32)
        .collect()
}

/// Rises from -1 over the first `len / 2` samples, then falls from +1 over
/// the rest. Both halves are scaled by `4 / len`, so odd lengths give the
/// falling half one extra sample.
pub fn triangle(len: usize) -> Vec<f32> {
    let half = len / 2;
    let scale = 4.0 / len as f64;

    let rising = (0..half).map(|t| (-1.0 + t as f64 * scale) as f32);
    let falling = (0..len - half).map(|t| (1.0 - t as f64 * scale) as f32);
    rising.chain(falling).collect()
}

/// `+1` for the first `len * duty` samples (truncated), `-1` after.
///
/// `duty` is clamped to `[0, 1]`.
pub fn pulse(len: usize, duty: f64) -> Vec<f32> {
    let duty = if duty.is_nan() { 0.0 } else { duty.clamp(0.0, 1.0) };
    let high = ((len as f64 * duty) as usize).min(len);

    let mut samples = vec![-1.0; len];
    samples[..high].fill(1.0);
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f32], expected: &[f32]) {
        assert_eq!(actual.len(), expected.len());
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).abs() < 1e-6, "sample {i}: {a} != {e}");
        }
    }

    #[test]
    fn sine_quarter_points() {
        assert_close(&sine(4), &[0.0, 1.0, 0.0, -1.0]);
    }

    #[test]
    fn saw_ramps_down() {
        assert_close(&saw(4), &[1.0, 0.5, 0.0, -0.5]);
    }

    #[test]
    fn triangle_even_length() {
        assert_close(&triangle(8), &[-1.0, -0.5, 0.0, 0.5, 1.0, 0.5, 0.0, -0.5]);
    }

    #[test]
    fn triangle_odd_length_gives_falling_half_the_extra_sample() {
        // half = 2, scale = 0.8
        assert_close(&triangle(5), &[-1.0, -0.2, 1.0, 0.2, -0.6]);
    }

    #[test]
    fn pulse_truncates_duty() {
        assert_eq!(
            pulse(10, 0.3),
            vec![1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0]
        );
    }

    #[test]
    fn pulse_high_count_rounds_down() {
        // 10 * 0.25 = 2.5 high samples rounds down to 2
        assert_eq!(
            pulse(10, 0.25),
            vec![1.0, 1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0]
        );
        assert_eq!(pulse(3, 0.5), vec![1.0, -1.0, -1.0]);
    }

    #[test]
    fn pulse_clamps_duty() {
        assert_eq!(pulse(4, 1.5), vec![1.0; 4]);
        assert_eq!(pulse(4, -0.5), vec![-1.0; 4]);
        assert_eq!(pulse(4, f64::NAN), vec![-1.0; 4]);
    }

    #[test]
    fn zero_length_generates_nothing() {
        assert!(sine(0).is_empty());
        assert!(triangle(0).is_empty());
        assert!(pulse(0, 0.5).is_empty());
    }
}
