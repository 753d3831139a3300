//! Committed wavetables, owned by the render thread.

use core::sync::atomic::Ordering;

use tracing::trace;

use super::{ShapeId, WavetableStore};

/// Keeps the scaled index strictly below a table's length at phase 1.0.
const READ_EPSILON: f64 = 0.000_000_1;

/// The committed side of the wavetable store.
///
/// Only the renderer holds this, so reads during mixing need no locking.
/// Buffers grow to fit larger commits but never give memory back.
#[derive(Debug)]
pub(crate) struct Tables {
    tables: Box<[Vec<f32>]>,
}

impl Tables {
    pub(crate) fn new(count: usize) -> Self {
        Self {
            tables: (0..count).map(|_| vec![1.0]).collect(),
        }
    }

    /// Move every dirty, uncontended staging buffer into its committed table.
    ///
    /// Never waits: a slot whose guard is held elsewhere keeps its old data and
    /// stays dirty, so the next pass picks it up. Returns how many slots were
    /// committed.
    pub(crate) fn commit_pending(&mut self, store: &WavetableStore) -> usize {
        let mut committed = 0;

        for (index, (table, slot)) in self.tables.iter_mut().zip(store.slots()).enumerate() {
            let Some(mut staged) = slot.staged.try_lock() else {
                trace!(shape = index, "shape busy, retrying next pass");
                continue;
            };
            if !staged.dirty {
                continue;
            }

            table.clear();
            table.extend_from_slice(&staged.samples);
            slot.committed_len.store(table.len(), Ordering::Release);
            staged.dirty = false;
            committed += 1;

            trace!(shape = index, len = table.len(), "committed shape");
        }

        committed
    }

    /// Sample at `phase` (nominally `[0, 1]`), truncated to a table index.
    ///
    /// Out-of-range phases clamp to the first or last sample.
    #[inline]
    pub(crate) fn read(&self, id: ShapeId, phase: f64) -> f32 {
        let table = &self.tables[id.0];
        let last = table.len() - 1;
        // float-to-int casts saturate, so negative phases land on 0
        let index = (phase * (table.len() as f64 - READ_EPSILON)) as usize;
        table[index.min(last)]
    }

    #[inline]
    pub(crate) fn len(&self, id: ShapeId) -> usize {
        self.tables[id.0].len()
    }
}
