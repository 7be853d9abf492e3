//! Two-slot ping-pong buffer for the pass pipeline.

use alloc::vec::Vec as AllocVec;

/// Double buffer with an explicit read/write discipline.
///
/// Exactly two slots exist. [`begin_pass`](DoubleBuffer::begin_pass) flips
/// the active-write slot *before* handing out the borrow pair, so within any
/// single pass the read slice and write slice are guaranteed distinct: a pass
/// can never observe its own partial writes. [`current`](DoubleBuffer::current)
/// is always the most recently written slot.
#[derive(Clone, Debug)]
pub struct DoubleBuffer<T> {
    slots: [AllocVec<T>; 2],
    /// Slot A (index 0) was the write target of the most recent pass.
    a_active: bool,
}

impl<T: Clone> DoubleBuffer<T> {
    /// Create both slots from the same initial contents.
    pub fn new(initial: AllocVec<T>) -> Self {
        DoubleBuffer { slots: [initial.clone(), initial], a_active: true }
    }

    /// Flip the active slot and return `(read, write)` for the next pass.
    pub fn begin_pass(&mut self) -> (&[T], &mut [T]) {
        self.a_active = !self.a_active;
        let (a, b) = self.slots.split_at_mut(1);
        if self.a_active {
            (b[0].as_slice(), a[0].as_mut_slice())
        } else {
            (a[0].as_slice(), b[0].as_mut_slice())
        }
    }

    /// The most recently written slot.
    pub fn current(&self) -> &[T] {
        &self.slots[if self.a_active { 0 } else { 1 }]
    }

    /// Mutable access to the most recently written slot, for structural
    /// edits between ticks (flag clearing). Not used by pass kernels.
    pub fn current_mut(&mut self) -> &mut [T] {
        &mut self.slots[if self.a_active { 0 } else { 1 }]
    }

    /// Whether slot A is the most recently written slot. Flips once per pass.
    pub fn a_is_active(&self) -> bool {
        self.a_active
    }

    pub fn len(&self) -> usize {
        self.slots[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots[0].is_empty()
    }
}
