//! Fast, non-cryptographic hashing for small keys like handles and names.

use std::collections::{HashMap, HashSet};
use std::hash::{BuildHasherDefault, Hash, Hasher};

/// A `HashMap` using a fast, non-cryptographic hash algorithm.
pub type FastHashMap<K, V> = HashMap<K, V, BuildHasherDefault<FxHasher>>;
/// A `HashSet` using a fast, non-cryptographic hash algorithm.
pub type FastHashSet<K> = HashSet<K, BuildHasherDefault<FxHasher>>;

/// Hashes a value with `FxHasher`.
pub fn hash<T>(t: &T) -> u64
where
    T: Hash + ?Sized,
{
    let mut state = FxHasher::default();
    t.hash(&mut state);
    state.finish()
}

const SEED: u64 = 0x0051_7cc1_b727_220a;

/// The hash algorithm used in rustc, a multiply-and-rotate construction
/// that is measurably faster than SipHash for the short keys we feed it.
/// It is NOT resistant to hash-flooding and must never face untrusted input.
pub struct FxHasher {
    hash: u64,
}

impl Default for FxHasher {
    #[inline]
    fn default() -> FxHasher {
        FxHasher { hash: 0 }
    }
}

impl FxHasher {
    #[inline]
    fn add_to_hash(&mut self, i: u64) {
        self.hash = (self.hash.rotate_left(5) ^ i).wrapping_mul(SEED);
    }
}

impl Hasher for FxHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.add_to_hash(u64::from(*byte));
        }
    }

    #[inline]
    fn write_u8(&mut self, i: u8) {
        self.add_to_hash(u64::from(i));
    }

    #[inline]
    fn write_u16(&mut self, i: u16) {
        self.add_to_hash(u64::from(i));
    }

    #[inline]
    fn write_u32(&mut self, i: u32) {
        self.add_to_hash(u64::from(i));
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.add_to_hash(i);
    }

    #[inline]
    fn write_usize(&mut self, i: usize) {
        self.add_to_hash(i as u64);
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn deterministic() {
        assert_eq!(hash(&42u32), hash(&42u32));
        assert_eq!(hash("graphite"), hash("graphite"));
        assert_ne!(hash("graphite"), hash("graphene"));
    }

    #[test]
    fn containers() {
        let mut map = FastHashMap::default();
        map.insert("a", 1);
        map.insert("b", 2);
        assert_eq!(map.get("a"), Some(&1));

        let mut set = FastHashSet::default();
        assert!(set.insert(7u64));
        assert!(!set.insert(7u64));
    }
}
