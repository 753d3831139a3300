//! Oscillators and the fixed five-oscillator voice layout.

use core::fmt;
use core::ops::{Index, IndexMut};

use crate::wavetable::{ShapeId, Tables};

/// Index of a voice in the engine's pool.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct VoiceId(pub usize);

impl fmt::Display for VoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What happens to an oscillator's phase when it leaves `[0, 1]`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Boundary {
    /// Hold at the nearest end (one-shot envelopes).
    Clamp,
    /// Wrap back into range in a single step (periodic oscillators).
    Loop,
}

impl Boundary {
    #[inline]
    pub fn apply(self, pos: f64) -> f64 {
        match self {
            Boundary::Clamp => {
                if pos > 1.0 {
                    1.0
                } else if pos < 0.0 {
                    0.0
                } else {
                    pos
                }
            }
            Boundary::Loop => {
                if pos > 1.0 {
                    pos - pos.trunc()
                } else if pos < 0.0 {
                    pos - (pos.trunc() - 1.0)
                } else {
                    pos
                }
            }
        }
    }
}

/// The fixed job of each oscillator in a [`Voice`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Role {
    /// The audible carrier.
    Wave,
    /// Amplitude envelope.
    AmpEnv,
    /// Periodic amplitude modulator.
    AmpMod,
    /// Envelope on the carrier's increment.
    IncEnv,
    /// Periodic modulator on the carrier's increment.
    IncMod,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Wave,
        Role::AmpEnv,
        Role::AmpMod,
        Role::IncEnv,
        Role::IncMod,
    ];

    #[inline]
    pub fn boundary(self) -> Boundary {
        match self {
            Role::AmpEnv | Role::IncEnv => Boundary::Clamp,
            Role::Wave | Role::AmpMod | Role::IncMod => Boundary::Loop,
        }
    }
}

/// A phase accumulator reading one wavetable.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Oscillator {
    pub shape: ShapeId,
    /// Phase, `0..=1` across the whole table
    pub pos: f64,
    /// Phase step per output frame
    pub inc: f64,
    pub amp: f64,
    /// Offset added after scaling by `amp`
    pub shift: f64,
}

/// A single oscillator field update.
///
/// Used for one-off edits as well as batch edits across a range of voices.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum OscParam {
    Shape(ShapeId),
    Pos(f64),
    Inc(f64),
    Amp(f64),
    Shift(f64),
}

/// The numeric fields of an [`Oscillator`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum OscField {
    Pos,
    Inc,
    Amp,
    Shift,
}

impl Oscillator {
    /// An oscillator on `shape` at unity amplitude, otherwise zeroed.
    pub fn new(shape: ShapeId) -> Self {
        Self {
            shape,
            amp: 1.0,
            ..Self::default()
        }
    }

    pub fn with_inc(mut self, inc: f64) -> Self {
        self.inc = inc;
        self
    }

    pub fn with_amp(mut self, amp: f64) -> Self {
        self.amp = amp;
        self
    }

    pub fn with_shift(mut self, shift: f64) -> Self {
        self.shift = shift;
        self
    }

    pub fn with_pos(mut self, pos: f64) -> Self {
        self.pos = pos;
        self
    }

    #[inline]
    pub fn set(&mut self, param: OscParam) {
        match param {
            OscParam::Shape(s) => self.shape = s,
            OscParam::Pos(p) => self.pos = p,
            OscParam::Inc(i) => self.inc = i,
            OscParam::Amp(a) => self.amp = a,
            OscParam::Shift(s) => self.shift = s,
        }
    }

    #[inline]
    pub fn get(&self, field: OscField) -> f64 {
        match field {
            OscField::Pos => self.pos,
            OscField::Inc => self.inc,
            OscField::Amp => self.amp,
            OscField::Shift => self.shift,
        }
    }

    #[inline]
    pub fn scale(&mut self, field: OscField, factor: f64) {
        match field {
            OscField::Pos => self.pos *= factor,
            OscField::Inc => self.inc *= factor,
            OscField::Amp => self.amp *= factor,
            OscField::Shift => self.shift *= factor,
        }
    }

    /// Step the phase by `inc` and bring it back into range.
    #[inline]
    pub fn advance(&mut self, inc: f64, boundary: Boundary) {
        self.pos = boundary.apply(self.pos + inc);
    }

    #[inline]
    pub(crate) fn read(&self, tables: &Tables) -> f64 {
        tables.read(self.shape, self.pos) as f64 * self.amp + self.shift
    }
}

/// One polyphonic unit: five role-bound oscillators and a stereo position.
///
/// The carrier's audible sample is `wave * amp_mod * amp_env`; its phase step
/// is `wave.inc * inc_env * inc_mod`, all read fresh every frame.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Voice {
    pub oscillators: [Oscillator; 5],
    /// -1 hard left, 0 centre, 1 hard right
    pub pan: f64,
    pub enabled: bool,
}

impl Default for Voice {
    fn default() -> Self {
        Self {
            oscillators: [Oscillator::default(); 5],
            pan: 0.0,
            enabled: false,
        }
    }
}

impl Index<Role> for Voice {
    type Output = Oscillator;

    #[inline]
    fn index(&self, role: Role) -> &Oscillator {
        &self.oscillators[role as usize]
    }
}

impl IndexMut<Role> for Voice {
    #[inline]
    fn index_mut(&mut self, role: Role) -> &mut Oscillator {
        &mut self.oscillators[role as usize]
    }
}

impl Voice {
    /// Reset every oscillator's phase to 0.
    pub fn restart(&mut self) {
        for osc in self.oscillators.iter_mut() {
            osc.pos = 0.0;
        }
    }

    /// Advance all five oscillators by one frame and return the carrier sample.
    ///
    /// Envelopes and modulators on the increment move first so the carrier
    /// sees this frame's values.
    #[inline]
    pub(crate) fn tick(&mut self, tables: &Tables) -> f64 {
        self.step(Role::IncEnv);
        self.step(Role::IncMod);

        let wave_inc =
            self[Role::Wave].inc * self[Role::IncEnv].read(tables) * self[Role::IncMod].read(tables);
        self[Role::Wave].advance(wave_inc, Boundary::Loop);

        self.step(Role::AmpEnv);
        self.step(Role::AmpMod);

        self[Role::Wave].read(tables) * self[Role::AmpMod].read(tables) * self[Role::AmpEnv].read(tables)
    }

    #[inline]
    fn step(&mut self, role: Role) {
        let osc = &mut self[role];
        osc.advance(osc.inc, role.boundary());
    }
}
