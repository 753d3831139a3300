//! The control surface: voice edits from non-real-time threads.
//!
//! Every method takes the affected voice guards for the duration of a small,
//! constant-time edit. Range methods take every guard in `first..=last` in
//! ascending order before touching anything, so a range edit is never seen
//! half-applied by the renderer.

use parking_lot::MutexGuard;
use tracing::debug;

use crate::engine::Engine;
use crate::increment::{inc_from_freq, inc_from_period, inc_from_speed};
use crate::voice::{OscField, OscParam, Oscillator, Role, Voice, VoiceId};

impl Engine {
    /// Copy of a voice.
    pub fn voice(&self, id: VoiceId) -> Voice {
        *self.shared.voice(id)
    }

    /// Replace a whole voice, including its pan and enabled flag.
    pub fn set_voice(&self, id: VoiceId, voice: Voice) {
        self.check_shapes(&voice.oscillators);
        *self.shared.voice(id) = voice;
    }

    pub fn oscillator(&self, id: VoiceId, role: Role) -> Oscillator {
        self.shared.voice(id)[role]
    }

    pub fn set_oscillator(&self, id: VoiceId, role: Role, osc: Oscillator) {
        self.shared.shapes.check(osc.shape);
        self.shared.voice(id)[role] = osc;
    }

    pub fn osc_field(&self, id: VoiceId, role: Role, field: OscField) -> f64 {
        self.shared.voice(id)[role].get(field)
    }

    /// Set one field of one oscillator.
    ///
    /// # Panics
    ///
    /// If the voice is out of range, or `param` names a shape that doesn't exist.
    pub fn set_param(&self, id: VoiceId, role: Role, param: OscParam) {
        self.check_param(param);
        self.shared.voice(id)[role].set(param);
    }

    /// Set one field of the same oscillator across `first..=last`.
    pub fn set_params(&self, first: VoiceId, last: VoiceId, role: Role, param: OscParam) {
        self.check_param(param);
        let mut guards = self.lock_range(first, last);
        for voice in guards.iter_mut() {
            voice[role].set(param);
        }
        debug!(%first, %last, ?role, ?param, "set range");
    }

    /// Multiply one numeric field of one oscillator.
    pub fn scale_field(&self, id: VoiceId, role: Role, field: OscField, factor: f64) {
        self.shared.voice(id)[role].scale(field, factor);
    }

    /// Multiply one numeric field of the same oscillator across `first..=last`.
    pub fn scale_fields(&self, first: VoiceId, last: VoiceId, role: Role, field: OscField, factor: f64) {
        let mut guards = self.lock_range(first, last);
        for voice in guards.iter_mut() {
            voice[role].scale(field, factor);
        }
        debug!(%first, %last, ?role, ?field, factor, "scaled range");
    }

    /// Reset every oscillator phase of a voice to 0.
    pub fn restart_voice(&self, id: VoiceId) {
        self.shared.voice(id).restart();
    }

    pub fn restart_voices(&self, first: VoiceId, last: VoiceId) {
        let mut guards = self.lock_range(first, last);
        for voice in guards.iter_mut() {
            voice.restart();
        }
        debug!(%first, %last, "restarted range");
    }

    pub fn enable_voice(&self, id: VoiceId) {
        self.shared.voice(id).enabled = true;
    }

    /// Silence a voice. Its oscillators keep their state.
    pub fn disable_voice(&self, id: VoiceId) {
        self.shared.voice(id).enabled = false;
    }

    pub fn enable_voices(&self, first: VoiceId, last: VoiceId) {
        self.set_enabled_range(first, last, true);
    }

    pub fn disable_voices(&self, first: VoiceId, last: VoiceId) {
        self.set_enabled_range(first, last, false);
    }

    pub fn is_enabled(&self, id: VoiceId) -> bool {
        self.shared.voice(id).enabled
    }

    /// Position a voice in the stereo field, clamped to `[-1, 1]`.
    pub fn set_pan(&self, id: VoiceId, pan: f64) {
        self.shared.voice(id).pan = pan.clamp(-1.0, 1.0);
    }

    pub fn pan(&self, id: VoiceId) -> f64 {
        self.shared.voice(id).pan
    }

    /// Tune an oscillator to `freq` Hz over its current shape.
    ///
    /// Uses the length the shape will have after pending edits commit, so a
    /// shape staged just before this call is accounted for.
    pub fn set_inc_from_freq(&self, id: VoiceId, role: Role, freq: f64) {
        let rate = self.sample_rate();
        let mut voice = self.shared.voice(id);
        let len = self.shared.shapes.latest_len(voice[role].shape);
        voice[role].inc = inc_from_freq(rate, len, freq);
    }

    /// Like [`set_inc_from_freq`](Self::set_inc_from_freq), then restart the
    /// whole voice under the same guard.
    pub fn set_inc_from_freq_and_restart(&self, id: VoiceId, role: Role, freq: f64) {
        let rate = self.sample_rate();
        let mut voice = self.shared.voice(id);
        let len = self.shared.shapes.latest_len(voice[role].shape);
        voice[role].inc = inc_from_freq(rate, len, freq);
        voice.restart();
    }

    /// Make an oscillator sweep its table once every `period` seconds.
    pub fn set_inc_from_period(&self, id: VoiceId, role: Role, period: f64) {
        let inc = inc_from_period(self.sample_rate(), period);
        self.shared.voice(id)[role].inc = inc;
    }

    /// Make an oscillator step `speed` table samples per output frame.
    pub fn set_inc_from_speed(&self, id: VoiceId, role: Role, speed: f64) {
        let mut voice = self.shared.voice(id);
        let len = self.shared.shapes.latest_len(voice[role].shape);
        voice[role].inc = inc_from_speed(len, speed);
    }

    fn set_enabled_range(&self, first: VoiceId, last: VoiceId, enabled: bool) {
        let mut guards = self.lock_range(first, last);
        for voice in guards.iter_mut() {
            voice.enabled = enabled;
        }
        debug!(%first, %last, enabled, "toggled range");
    }

    /// Guards for `first..=last`, taken in ascending order.
    fn lock_range(&self, first: VoiceId, last: VoiceId) -> Vec<MutexGuard<'_, Voice>> {
        assert!(first <= last, "voice range {first}..={last} is reversed");
        (first.0..=last.0).map(|i| self.shared.voice(VoiceId(i))).collect()
    }

    fn check_param(&self, param: OscParam) {
        if let OscParam::Shape(shape) = param {
            self.shared.shapes.check(shape);
        }
    }

    fn check_shapes(&self, oscs: &[Oscillator]) {
        for osc in oscs {
            self.shared.shapes.check(osc.shape);
        }
    }
}
