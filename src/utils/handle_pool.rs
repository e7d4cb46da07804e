use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::binary_heap::BinaryHeap;

use super::handle::{Handle, HandleIndex};

#[derive(PartialEq, Eq)]
struct InverseHandleIndex(HandleIndex);

impl PartialOrd for InverseHandleIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        other.0.partial_cmp(&self.0)
    }
}

impl Ord for InverseHandleIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.cmp(&self.0)
    }
}

/// `HandlePool` hands out `Handle`s with a continuous `index` field, recycling
/// freed indices with a bumped `version` so stale handles can be detected.
#[derive(Default)]
pub struct HandlePool {
    versions: Vec<HandleIndex>,
    frees: BinaryHeap<InverseHandleIndex>,
}

impl HandlePool {
    /// Constructs a new, empty `HandlePool`.
    pub fn new() -> HandlePool {
        HandlePool {
            versions: Vec::new(),
            frees: BinaryHeap::new(),
        }
    }

    /// Creates a fresh `Handle`, preferring the lowest recycled index.
    pub fn create(&mut self) -> Handle {
        if let Some(InverseHandleIndex(index)) = self.frees.pop() {
            let index = index as usize;
            self.versions[index] += 1;
            Handle::new(index as HandleIndex, self.versions[index])
        } else {
            self.versions.push(1);
            Handle::new(self.versions.len() as HandleIndex - 1, 1)
        }
    }

    /// Returns true if this `Handle` was created by this pool and has not
    /// been freed since.
    pub fn is_alive<T>(&self, handle: T) -> bool
    where
        T: Borrow<Handle>,
    {
        let handle = handle.borrow();
        let index = handle.index() as usize;
        index < self.versions.len()
            && (self.versions[index] & 0x1) == 1
            && self.versions[index] == handle.version()
    }

    /// Recycles the `Handle` index and marks its version as dead. Returns
    /// false for handles that are not alive.
    pub fn free<T>(&mut self, handle: T) -> bool
    where
        T: Borrow<Handle>,
    {
        let handle = handle.borrow();
        if !self.is_alive(handle) {
            false
        } else {
            self.versions[handle.index() as usize] += 1;
            self.frees.push(InverseHandleIndex(handle.index()));
            true
        }
    }

    /// Returns the number of alive handles in this pool.
    #[inline]
    pub fn len(&self) -> usize {
        self.versions.len() - self.frees.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over all alive handles.
    pub fn iter(&self) -> impl Iterator<Item = Handle> + '_ {
        self.versions
            .iter()
            .enumerate()
            .filter(|(_, v)| (**v & 0x1) == 1)
            .map(|(i, v)| Handle::new(i as HandleIndex, *v))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn basic() {
        let mut pool = HandlePool::new();

        let h1 = pool.create();
        let h2 = pool.create();
        assert_ne!(h1, h2);
        assert!(pool.is_alive(h1));
        assert!(pool.is_alive(h2));
        assert_eq!(pool.len(), 2);

        assert!(pool.free(h1));
        assert!(!pool.is_alive(h1));
        assert!(!pool.free(h1));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn reuse() {
        let mut pool = HandlePool::new();

        let h1 = pool.create();
        pool.free(h1);

        let h2 = pool.create();
        assert_eq!(h1.index(), h2.index());
        assert_ne!(h1.version(), h2.version());
        assert!(!pool.is_alive(h1));
        assert!(pool.is_alive(h2));
    }

    #[test]
    fn iter() {
        let mut pool = HandlePool::new();

        let handles: Vec<_> = (0..8).map(|_| pool.create()).collect();
        pool.free(handles[2]);
        pool.free(handles[5]);

        let alive: Vec<_> = pool.iter().collect();
        assert_eq!(alive.len(), 6);
        assert!(alive.iter().all(|v| pool.is_alive(v)));
    }
}
