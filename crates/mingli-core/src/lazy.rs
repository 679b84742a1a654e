//! Load-once cell for read-only artifacts shared across threads.
//!
//! Only successful loads are cached. A failed or absent load is retried on the
//! next access, so building the artifacts while the process runs makes them
//! visible without a restart. Concurrent first accesses serialize on the write
//! lock and the loser of the race observes the winner's value.

use std::sync::{Arc, RwLock};

pub struct LoadOnce<T> {
    slot: RwLock<Option<Arc<T>>>,
}

impl<T> Default for LoadOnce<T> {
    fn default() -> Self {
        Self { slot: RwLock::new(None) }
    }
}

impl<T> LoadOnce<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value, or run `load` once and cache a `Some` result.
    pub fn get_or_load<F>(&self, load: F) -> Option<Arc<T>>
    where
        F: FnOnce() -> Option<T>,
    {
        if let Some(v) = self.peek() {
            return Some(v);
        }
        let mut guard = match self.slot.write() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(v) = guard.as_ref() {
            return Some(Arc::clone(v));
        }
        let loaded = Arc::new(load()?);
        *guard = Some(Arc::clone(&loaded));
        Some(loaded)
    }

    pub fn peek(&self) -> Option<Arc<T>> {
        let guard = match self.slot.read() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.as_ref().map(Arc::clone)
    }

    pub fn is_loaded(&self) -> bool {
        self.peek().is_some()
    }

    /// Drop the cached value; the next access reloads.
    pub fn invalidate(&self) {
        let mut guard = match self.slot.write() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn loads_once_and_retries_after_failure() {
        let cell: LoadOnce<u32> = LoadOnce::new();
        assert!(cell.get_or_load(|| None).is_none());
        assert!(!cell.is_loaded());

        let calls = AtomicUsize::new(0);
        for _ in 0..3 {
            let v = cell.get_or_load(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                Some(7)
            });
            assert_eq!(v.as_deref(), Some(&7));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        cell.invalidate();
        assert!(!cell.is_loaded());
    }

    #[test]
    fn concurrent_first_access_converges() {
        let cell: Arc<LoadOnce<String>> = Arc::new(LoadOnce::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cell = Arc::clone(&cell);
                let calls = Arc::clone(&calls);
                std::thread::spawn(move || {
                    cell.get_or_load(|| {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Some("index".to_string())
                    })
                })
            })
            .collect();
        for h in handles {
            let v = h.join().expect("thread");
            assert_eq!(v.as_deref().map(String::as_str), Some("index"));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
