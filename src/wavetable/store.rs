//! Control-side half of the wavetable store.
//!
//! Every slot pairs a guarded staging buffer with atomic mirrors of the
//! staged and committed lengths. The committed samples live in the renderer's [`Tables`](super::Tables);
//! only its commit pass moves staged data across.

use core::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::{Mutex, MutexGuard};
use tracing::debug;

use super::{generators, ShapeId};
use crate::error::{Error, Result};

/// Pending edit for one slot.
#[derive(Debug)]
pub(crate) struct Staged {
    pub(crate) samples: Vec<f32>,
    /// Set by every stage, cleared only by a successful commit
    pub(crate) dirty: bool,
}

#[derive(Debug)]
pub(crate) struct ShapeSlot {
    pub(crate) staged: Mutex<Staged>,
    /// Length of the newest staged buffer, readable without the guard
    pub(crate) staged_len: AtomicUsize,
    pub(crate) committed_len: AtomicUsize,
}

impl ShapeSlot {
    fn new() -> Self {
        Self {
            staged: Mutex::new(Staged {
                samples: vec![1.0],
                dirty: false,
            }),
            staged_len: AtomicUsize::new(1),
            committed_len: AtomicUsize::new(1),
        }
    }
}

/// Fixed set of wavetable slots that control threads write into.
///
/// Writes land in a per-slot staging buffer and become audible once the
/// renderer's next commit pass picks them up (normally the next block).
/// Slots start out as a single sample of `1.0`, so an oscillator reading an
/// untouched slot yields a constant.
///
/// ```
/// # use wavevox::{Engine, EngineConfig, ShapeId};
/// let (engine, mut renderer) = Engine::new(EngineConfig::default())?;
/// engine.shapes().sine(ShapeId(0), 2048)?;
/// assert_eq!(engine.shapes().len(ShapeId(0)), 1); // not committed yet
///
/// renderer.commit_pending();
/// assert_eq!(engine.shapes().len(ShapeId(0)), 2048);
/// # Ok::<(), wavevox::Error>(())
/// ```
#[derive(Debug)]
pub struct WavetableStore {
    slots: Box<[ShapeSlot]>,
}

impl WavetableStore {
    pub(crate) fn new(count: usize) -> Self {
        Self {
            slots: (0..count).map(|_| ShapeSlot::new()).collect(),
        }
    }

    /// Number of slots.
    #[inline]
    pub fn count(&self) -> usize {
        self.slots.len()
    }

    /// Replace the slot's pending samples with a copy of `samples`.
    pub fn stage(&self, id: ShapeId, samples: &[f32]) -> Result<()> {
        if samples.is_empty() {
            return Err(Error::EmptyShape(id));
        }
        let slot = self.slot(id);
        let mut staged = slot.staged.lock();
        staged.samples.clear();
        staged.samples.extend_from_slice(samples);
        staged.dirty = true;
        slot.staged_len.store(samples.len(), Ordering::Release);
        drop(staged);

        debug!(shape = %id, len = samples.len(), "staged shape");
        Ok(())
    }

    /// Stage an owned buffer without copying it.
    pub(crate) fn stage_vec(&self, id: ShapeId, samples: Vec<f32>) -> Result<()> {
        if samples.is_empty() {
            return Err(Error::EmptyShape(id));
        }
        let len = samples.len();
        {
            let slot = self.slot(id);
            let mut staged = slot.staged.lock();
            staged.samples = samples;
            staged.dirty = true;
            slot.staged_len.store(len, Ordering::Release);
        }

        debug!(shape = %id, len, "staged shape");
        Ok(())
    }

    /// Stage one cycle of a sine.
    pub fn sine(&self, id: ShapeId, len: usize) -> Result<()> {
        self.stage_vec(id, generators::sine(len))
    }

    /// Stage a falling ramp.
    pub fn saw(&self, id: ShapeId, len: usize) -> Result<()> {
        self.stage_vec(id, generators::saw(len))
    }

    /// Stage a triangle.
    pub fn triangle(&self, id: ShapeId, len: usize) -> Result<()> {
        self.stage_vec(id, generators::triangle(len))
    }

    /// Stage a pulse with the given duty cycle (clamped to `[0, 1]`).
    pub fn pulse(&self, id: ShapeId, len: usize, duty: f64) -> Result<()> {
        self.stage_vec(id, generators::pulse(len, duty))
    }

    /// Committed length of the slot, i.e. what the renderer is reading now.
    #[inline]
    pub fn len(&self, id: ShapeId) -> usize {
        self.slot(id).committed_len.load(Ordering::Acquire)
    }

    /// Length the slot will have once pending edits are committed.
    ///
    /// Never takes the staging guard, so it can be called while holding a
    /// voice guard.
    #[inline]
    pub fn latest_len(&self, id: ShapeId) -> usize {
        // a commit copies the staged buffer whole, so once nothing is pending
        // the staged length equals the committed one
        self.slot(id).staged_len.load(Ordering::Acquire)
    }

    /// Whether the slot has an edit waiting for the next commit pass.
    pub fn is_pending(&self, id: ShapeId) -> bool {
        self.slot(id).staged.lock().dirty
    }

    /// Hold a slot's staging guard. Commit passes skip the slot while it is held.
    pub fn lock(&self, id: ShapeId) -> MutexGuard<'_, impl Sized> {
        self.slot(id).staged.lock()
    }

    pub(crate) fn slots(&self) -> &[ShapeSlot] {
        &self.slots
    }

    pub(crate) fn check(&self, id: ShapeId) {
        assert!(
            id.0 < self.slots.len(),
            "shape {} out of range (engine has {} shapes)",
            id,
            self.slots.len()
        );
    }

    fn slot(&self, id: ShapeId) -> &ShapeSlot {
        self.check(id);
        &self.slots[id.0]
    }
}
