//! Wavetable slots ("shapes") and their staging protocol.
//!
//! Control threads stage samples into a [`WavetableStore`]; the renderer owns
//! the committed copies and pulls staged edits across once per block without
//! ever waiting on a guard.

use core::fmt;

pub mod generators;
mod store;
mod tables;

pub use store::WavetableStore;
pub(crate) use tables::Tables;

/// Index of a wavetable slot.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct ShapeId(pub usize);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
