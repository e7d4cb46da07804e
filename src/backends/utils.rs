use std::borrow::Borrow;

use crate::utils::handle::Handle;

/// Handle-indexed storage for per-resource device data. Slots are
/// addressed by the handle's index and guarded by its version, so a stale
/// handle never resolves to a recycled slot's data.
#[derive(Debug)]
pub struct DataVec<T> {
    buf: Vec<Option<T>>,
    versions: Vec<u32>,
}

impl<T> DataVec<T> {
    pub fn new() -> Self {
        DataVec {
            buf: Vec::new(),
            versions: Vec::new(),
        }
    }

    pub fn get<H>(&self, handle: H) -> Option<&T>
    where
        H: Borrow<Handle>,
    {
        let index = handle.borrow().index() as usize;
        if let Some(&v) = self.versions.get(index) {
            if v == handle.borrow().version() {
                return self.buf[index].as_ref();
            }
        }

        None
    }

    pub fn create<H>(&mut self, handle: H, value: T)
    where
        H: Borrow<Handle>,
    {
        let handle = handle.borrow();
        let index = handle.index() as usize;

        if self.buf.len() <= index {
            self.buf.resize_with(index + 1, || None);
            self.versions.resize(index + 1, 0);
        }

        self.buf[index] = Some(value);
        self.versions[index] = handle.version();
    }

    pub fn get_mut<H>(&mut self, handle: H) -> Option<&mut T>
    where
        H: Borrow<Handle>,
    {
        let index = handle.borrow().index() as usize;
        if self.versions.get(index) == Some(&handle.borrow().version()) {
            self.buf[index].as_mut()
        } else {
            None
        }
    }

    pub fn free<H>(&mut self, handle: H) -> Option<T>
    where
        H: Borrow<Handle>,
    {
        let handle = handle.borrow();
        let index = handle.index() as usize;
        if self.versions.get(index) == Some(&handle.version()) {
            self.buf[index].take()
        } else {
            None
        }
    }
}

impl<T> Default for DataVec<T> {
    fn default() -> Self {
        DataVec::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn versions_guard_slots() {
        let mut storage = DataVec::new();
        let old = Handle::new(0, 1);
        let new = Handle::new(0, 3);

        storage.create(old, "first");
        assert_eq!(storage.get(old), Some(&"first"));

        storage.create(new, "second");
        assert_eq!(storage.get(old), None);
        assert_eq!(storage.get(new), Some(&"second"));

        assert_eq!(storage.free(old), None);
        assert_eq!(storage.free(new), Some("second"));
        assert_eq!(storage.get(new), None);
    }
}
