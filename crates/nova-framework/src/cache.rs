//! Memoization keyed by code elements.
//!
//! Entries are attached to an element handle (`Arc<K>`) but only hold it
//! weakly: once the database drops the element, its entry can no longer be
//! reached and is pruned on the next access.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

/// Computes a cached value and decides whether a stored one is still usable.
pub trait CacheProvider<V> {
    fn provide(&self) -> V;
    fn is_valid(&self, value: &V) -> bool;
}

type Cell<V> = Arc<Mutex<Option<Arc<V>>>>;

struct Slot<K: ?Sized, V> {
    key: Weak<K>,
    cell: Cell<V>,
}

/// A cache from element identity to a shared value.
///
/// Calls for different keys never block each other. Calls for the same key
/// are serialized, so a burst of requests computes at most one fresh value.
/// A provider must not re-enter the cache with the key it is computing.
pub struct ElementCache<K: ?Sized, V> {
    slots: Mutex<HashMap<usize, Slot<K, V>>>,
}

impl<K: ?Sized, V> Default for ElementCache<K, V> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl<K: ?Sized, V> std::fmt::Debug for ElementCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementCache")
            .field("entries", &self.slots.lock().len())
            .finish()
    }
}

fn identity<K: ?Sized>(key: &Arc<K>) -> usize {
    Arc::as_ptr(key) as *const () as usize
}

impl<K: ?Sized, V> ElementCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored value for `key` if `provider` still considers it
    /// valid, otherwise computes, stores and returns a fresh one.
    pub fn get_or_compute(&self, key: &Arc<K>, provider: &dyn CacheProvider<V>) -> Arc<V> {
        let cell = self.cell(key);
        let mut cell = cell.lock();

        if let Some(value) = cell.as_ref() {
            if provider.is_valid(value) {
                tracing::trace!(key = identity(key), "element cache hit");
                return Arc::clone(value);
            }
            tracing::debug!(key = identity(key), "cached value is stale; recomputing");
        }

        let value = Arc::new(provider.provide());
        *cell = Some(Arc::clone(&value));
        value
    }

    /// The stored value for `key`, without any validity check.
    pub fn get(&self, key: &Arc<K>) -> Option<Arc<V>> {
        let slots = self.slots.lock();
        let slot = slots.get(&identity(key))?;
        // A dead slot at this address belongs to an earlier, freed element.
        if slot.key.strong_count() == 0 {
            return None;
        }
        let cell = Arc::clone(&slot.cell);
        drop(slots);
        let value = cell.lock().clone();
        value
    }

    pub fn insert(&self, key: &Arc<K>, value: V) -> Arc<V> {
        let value = Arc::new(value);
        *self.cell(key).lock() = Some(Arc::clone(&value));
        value
    }

    pub fn invalidate(&self, key: &Arc<K>) {
        let mut slots = self.slots.lock();
        slots.remove(&identity(key));
        prune(&mut slots);
    }

    /// Number of entries whose element is still alive.
    pub fn len(&self) -> usize {
        let mut slots = self.slots.lock();
        prune(&mut slots);
        slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cell(&self, key: &Arc<K>) -> Cell<V> {
        let mut slots = self.slots.lock();
        prune(&mut slots);
        let slot = slots.entry(identity(key)).or_insert_with(|| Slot {
            key: Arc::downgrade(key),
            cell: Arc::new(Mutex::new(None)),
        });
        Arc::clone(&slot.cell)
    }
}

fn prune<K: ?Sized, V>(slots: &mut HashMap<usize, Slot<K, V>>) {
    slots.retain(|_, slot| slot.key.strong_count() > 0);
}
