//! ByteMap: a byte-keyed hash map using separate chaining, with internally
//! copied keys and an optional value-release hook. Single-threaded API focused
//! on predictable ownership.

/// Bucket count used when a map is created with a capacity of 0.
const DEFAULT_CAPACITY: usize = 16;

// FNV-1a, run in a 64-bit accumulator over the raw key bytes.
const FNV_SEED: u64 = 2166136261;
const FNV_PRIME: u64 = 16777619;

#[inline]
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_SEED;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Errors reported by the mutating half of the [`ByteMap`] API.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Keys must carry at least one byte.
    #[error("key must not be empty")]
    EmptyKey,
}

/// Hook invoked with a value when its entry is overwritten, removed, cleared,
/// or dropped with the map.
type ReleaseFn<V> = Box<dyn FnMut(V)>;

struct Entry<V> {
    key: Box<[u8]>,
    val: V,
    next: Option<Box<Entry<V>>>,
}

/// A hash map over raw byte keys.
///
/// Keys are arbitrary non-empty byte slices: integer bit patterns, struct
/// bytes, UTF-8 strings, binary buffers. The map copies the key bytes on first
/// insertion and owns the copies for the life of the entry; the caller's
/// serialization defines key identity. Two keys match only when their lengths
/// and bytes are both equal, so a key is always distinct from its own prefix.
///
/// Collisions are resolved by chaining, newest entry at the head of its
/// bucket. The bucket array doubles whenever the entry count reaches 3/4 of
/// it and never shrinks.
///
/// Values are moved into the map. When an entry is overwritten, removed, or
/// torn down, its value is handed to the hook installed with
/// [`on_release`](ByteMap::on_release) if there is one, and dropped in place
/// otherwise — for borrowed or `Copy` value types that drop is a no-op and
/// the caller keeps full responsibility for the payload.
pub struct ByteMap<V> {
    buckets: Vec<Option<Box<Entry<V>>>>,
    size: usize,
    release: Option<ReleaseFn<V>>,
}

impl<V> ByteMap<V> {
    /// Creates an empty map with the default capacity of 16 buckets.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty map with the given number of buckets.
    ///
    /// # Arguments
    ///
    /// * `initial_capacity` - Starting bucket count. A value of 0 is
    ///   substituted with the default of 16. The count is used as-is, so a
    ///   deliberately tiny capacity can be used to force chain collisions.
    pub fn with_capacity(initial_capacity: usize) -> Self {
        let capacity = if initial_capacity == 0 {
            DEFAULT_CAPACITY
        } else {
            initial_capacity
        };
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, || None);
        Self {
            buckets,
            size: 0,
            release: None,
        }
    }

    /// Installs a release hook and returns the map.
    ///
    /// The hook receives every value the map lets go of: the old value when a
    /// key is overwritten, the value of a removed entry, and every remaining
    /// value on [`clear`](ByteMap::clear) or drop. Each value is handed over
    /// exactly once.
    pub fn on_release<F>(mut self, release: F) -> Self
    where
        F: FnMut(V) + 'static,
    {
        self.release = Some(Box::new(release));
        self
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the current bucket count.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Inserts a key-value pair, overwriting the value if the key is already
    /// present.
    ///
    /// # Arguments
    ///
    /// * `key` - Raw bytes of the key; copied into the map on first insertion
    ///   of this key. Must not be empty.
    /// * `val` - The value, moved into the map.
    ///
    /// # Returns
    ///
    /// * `Err(Error::EmptyKey)` if `key` is empty; the map is unchanged.
    ///   `Ok(())` otherwise.
    pub fn insert(&mut self, key: &[u8], val: V) -> Result<(), Error> {
        if key.is_empty() {
            return Err(Error::EmptyKey);
        }

        // The load-factor guard runs before the probe, so an update landing
        // exactly on the threshold still grows the table.
        if self.size >= self.buckets.len() * 3 / 4 {
            self.grow();
        }

        let idx = self.index_for(key);
        let mut cursor = self.buckets[idx].as_deref_mut();
        while let Some(entry) = cursor {
            if &*entry.key == key {
                // Update in place: the stored key copy is reused, only the
                // value is replaced.
                let old = std::mem::replace(&mut entry.val, val);
                if let Some(release) = self.release.as_mut() {
                    release(old);
                }
                return Ok(());
            }
            cursor = entry.next.as_deref_mut();
        }

        let entry = Box::new(Entry {
            key: Box::from(key),
            val,
            next: self.buckets[idx].take(),
        });
        self.buckets[idx] = Some(entry);
        self.size += 1;
        Ok(())
    }

    /// Returns a reference to the value stored under `key`, if any.
    pub fn get(&self, key: &[u8]) -> Option<&V> {
        if key.is_empty() {
            return None;
        }
        let mut cursor = self.buckets[self.index_for(key)].as_deref();
        while let Some(entry) = cursor {
            if &*entry.key == key {
                return Some(&entry.val);
            }
            cursor = entry.next.as_deref();
        }
        None
    }

    /// Returns true if `key` is present in the map.
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Removes the entry stored under `key`.
    ///
    /// The entry's value goes through the release hook (or is dropped) and
    /// its key copy is freed. Removal never shrinks the bucket array.
    ///
    /// # Returns
    ///
    /// * `true` if the key was present and its entry removed, `false`
    ///   otherwise.
    pub fn remove(&mut self, key: &[u8]) -> bool {
        if key.is_empty() {
            return false;
        }
        let idx = self.index_for(key);
        let slot = &mut self.buckets[idx];

        if let Some(mut removed) = slot.take_if(|e| &*e.key == key) {
            *slot = removed.next.take();
            self.size -= 1;
            self.release_value(removed.val);
            return true;
        }

        let mut cursor = slot.as_deref_mut();
        while let Some(entry) = cursor {
            if let Some(mut removed) = entry.next.take_if(|n| &*n.key == key) {
                entry.next = removed.next.take();
                self.size -= 1;
                self.release_value(removed.val);
                return true;
            }
            cursor = entry.next.as_deref_mut();
        }
        false
    }

    /// Removes every entry, releasing each value. The bucket count is kept.
    pub fn clear(&mut self) {
        for slot in self.buckets.iter_mut() {
            let mut link = slot.take();
            // Chains unwind iteratively, one entry per step.
            while let Some(boxed) = link {
                let Entry { val, next, .. } = *boxed;
                link = next;
                if let Some(release) = self.release.as_mut() {
                    release(val);
                }
            }
        }
        self.size = 0;
    }

    #[inline]
    fn index_for(&self, key: &[u8]) -> usize {
        (fnv1a(key) % (self.buckets.len() as u64)) as usize
    }

    fn release_value(&mut self, val: V) {
        if let Some(release) = self.release.as_mut() {
            release(val);
        }
    }

    /// Doubles the bucket array and relinks every entry against the new
    /// capacity. Entries move by pointer; key bytes and values stay where
    /// they are.
    fn grow(&mut self) {
        let new_capacity = self.buckets.len() * 2;
        let mut new_buckets: Vec<Option<Box<Entry<V>>>> = Vec::with_capacity(new_capacity);
        new_buckets.resize_with(new_capacity, || None);

        for slot in self.buckets.iter_mut() {
            let mut link = slot.take();
            while let Some(mut entry) = link {
                link = entry.next.take();
                let idx = (fnv1a(&entry.key) % (new_capacity as u64)) as usize;
                entry.next = new_buckets[idx].take();
                new_buckets[idx] = Some(entry);
            }
        }

        self.buckets = new_buckets;
    }
}

impl<V> Default for ByteMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Drop for ByteMap<V> {
    // Teardown runs through clear, so remaining values reach the release
    // hook and long chains unwind without recursion.
    fn drop(&mut self) {
        self.clear();
    }
}
