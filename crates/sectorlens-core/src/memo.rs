//! Single-slot memo for the most recent analytics request.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// How a memoized call treats the stored entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CacheMode {
    /// Return the stored value when the key matches; otherwise compute and
    /// store. (Default)
    #[default]
    Use,
    /// Always compute and overwrite the stored entry.
    Refresh,
    /// Always compute; leave the stored entry untouched.
    Bypass,
}

/// Remembers the last computed `(key, value)` pair.
///
/// A lookup hits only when the key is exactly equal to the stored one.
/// Interior mutability keeps the owner usable through `&self` and `Sync`.
#[derive(Debug)]
pub struct RangeMemo<K, V> {
    slot: Mutex<Option<(K, V)>>,
}

impl<K, V> Default for RangeMemo<K, V> {
    fn default() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }
}

impl<K, V> RangeMemo<K, V>
where
    K: PartialEq,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored value for `key`, if the slot currently holds it.
    pub fn get(&self, key: &K) -> Option<V> {
        match &*self.lock() {
            Some((stored, value)) if stored == key => Some(value.clone()),
            _ => None,
        }
    }

    pub fn put(&self, key: K, value: V) {
        *self.lock() = Some((key, value));
    }

    pub fn clear(&self) {
        *self.lock() = None;
    }

    pub fn is_cached(&self, key: &K) -> bool {
        matches!(&*self.lock(), Some((stored, _)) if stored == key)
    }

    /// Runs `compute` unless `mode` allows a hit on `key`. The lock is not
    /// held while computing.
    pub fn get_or_compute<F>(&self, key: K, mode: CacheMode, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if mode == CacheMode::Use {
            if let Some(value) = self.get(&key) {
                tracing::debug!("memo hit");
                return value;
            }
        }

        let value = compute();
        if mode != CacheMode::Bypass {
            self.put(key, value.clone());
        }
        value
    }

    fn lock(&self) -> MutexGuard<'_, Option<(K, V)>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn hits_on_identical_key() {
        let memo = RangeMemo::new();
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            42
        };

        assert_eq!(memo.get_or_compute(("a", 1), CacheMode::Use, compute), 42);
        assert_eq!(memo.get_or_compute(("a", 1), CacheMode::Use, compute), 42);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn different_key_recomputes_and_replaces() {
        let memo = RangeMemo::new();
        memo.get_or_compute(1, CacheMode::Use, || "first");
        assert_eq!(memo.get_or_compute(2, CacheMode::Use, || "second"), "second");
        assert!(!memo.is_cached(&1));
        assert!(memo.is_cached(&2));
    }

    #[test]
    fn refresh_overwrites_and_bypass_leaves_slot() {
        let memo = RangeMemo::new();
        memo.put(7, 1.0);
        assert_eq!(memo.get_or_compute(7, CacheMode::Refresh, || 2.0), 2.0);
        assert_eq!(memo.get(&7), Some(2.0));

        assert_eq!(memo.get_or_compute(7, CacheMode::Bypass, || 3.0), 3.0);
        assert_eq!(memo.get(&7), Some(2.0));

        memo.clear();
        assert_eq!(memo.get(&7), None);
    }
}
