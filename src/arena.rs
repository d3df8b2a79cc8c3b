#![allow(unsafe_code)]

use std::cell::{Cell, UnsafeCell};

const INITIAL_SLAB_SIZE: usize = 1024;

/// Bump storage for string payloads that escape decoding had to rebuild.
///
/// Payloads without escapes borrow straight from the input, so an arena
/// only grows when a basic string or quoted key actually contains a
/// backslash. Everything is freed at once when the arena is dropped.
///
/// Committed bytes stay valid for the arena's lifetime, which outlives
/// the per-expression node store of a [`Parser`](crate::Parser).
pub struct Arena {
    // Each slab is filled up to its capacity and never reallocated, so
    // slices handed out stay put while later slabs are pushed.
    slabs: UnsafeCell<Vec<Vec<u8>>>,
    used: Cell<usize>,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Arena {
    pub fn new() -> Self {
        Arena {
            slabs: UnsafeCell::new(Vec::new()),
            used: Cell::new(0),
        }
    }

    /// Total number of payload bytes committed so far.
    pub fn used_bytes(&self) -> usize {
        self.used.get()
    }

    /// Copy `bytes` into the arena, returning a slice tied to the arena's
    /// lifetime.
    pub(crate) fn alloc_bytes(&self, bytes: &[u8]) -> &[u8] {
        if bytes.is_empty() {
            return &[];
        }

        // Safety: `slabs` is only accessed inside this method, which does
        // not re-enter, and `Arena` is `!Sync`. No reference into the
        // outer Vec escapes; handed out slices point into slab buffers.
        let slabs = unsafe { &mut *self.slabs.get() };

        let fits = match slabs.last() {
            Some(slab) => slab.capacity() - slab.len() >= bytes.len(),
            None => false,
        };
        if !fits {
            let current = slabs.last().map_or(0, Vec::capacity);
            let size = current
                .saturating_mul(2)
                .max(INITIAL_SLAB_SIZE)
                .max(bytes.len());
            slabs.push(Vec::with_capacity(size));
        }

        let Some(slab) = slabs.last_mut() else {
            unreachable!("a slab was pushed above");
        };
        let start = slab.len();
        // Within capacity: the buffer does not move.
        slab.extend_from_slice(bytes);
        self.used.set(self.used.get() + bytes.len());

        // Safety: start..start+len was just initialized, and the slab
        // buffer is neither reallocated nor freed before the arena drops.
        unsafe { std::slice::from_raw_parts(slab.as_ptr().add(start), bytes.len()) }
    }

    #[cfg(test)]
    fn slab_count(&self) -> usize {
        // Safety: see `alloc_bytes`; the borrow ends before returning.
        unsafe { (*self.slabs.get()).len() }
    }
}

#[cfg(test)]
#[path = "./arena_tests.rs"]
mod tests;
