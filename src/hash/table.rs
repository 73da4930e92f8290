use crate::error::{Error, Result};

/// Hash and equality functions injected into an [`OpenHashMap`].
///
/// Keys never need to implement `Hash`/`Eq` themselves; this lets a table
/// key coordinates by value, or key buffer indices by the coordinate they
/// point at.
pub trait KeyHasher<K> {
    /// A non-negative hash; only the low bits are used for the slot.
    fn hash(&self, key: &K) -> u32;

    fn equal(&self, a: &K, b: &K) -> bool;
}

/// Table size for a capacity hint: the next power of two, at least 16.
#[inline]
pub fn table_size(capacity_hint: usize) -> usize {
    capacity_hint.max(1).next_power_of_two().max(16)
}

/// Capacity hint giving roughly 70% load for `entries` keys.
#[inline]
pub fn load_hint(entries: usize) -> usize {
    (entries as f64 * 1.4).ceil() as usize
}

enum Probe {
    Occupied(usize),
    Vacant(usize),
    Full,
}

/// Fixed-size open-addressing hash map with linear probing.
///
/// The table never grows. Inserting into a table whose every slot is taken
/// by another key fails with [`Error::HashTableFull`]; callers size the
/// table with [`load_hint`] so that this does not happen.
#[derive(Clone, Debug)]
pub struct OpenHashMap<K, V, H> {
    slots: Vec<Option<(K, V)>>,
    mask: usize,
    len: usize,
    hasher: H,
}

impl<K, V, H: KeyHasher<K>> OpenHashMap<K, V, H> {
    pub fn new(capacity_hint: usize, hasher: H) -> Self {
        let size = table_size(capacity_hint);
        Self {
            slots: std::iter::repeat_with(|| None).take(size).collect(),
            mask: size - 1,
            len: 0,
            hasher,
        }
    }

    /// Number of slots.
    #[inline] pub fn capacity(&self) -> usize { self.slots.len() }

    /// Number of stored keys.
    #[inline] pub fn len(&self) -> usize { self.len }

    #[inline] pub fn is_empty(&self) -> bool { self.len == 0 }

    fn probe(&self, key: &K) -> Probe {
        let mut index = self.hasher.hash(key) as usize & self.mask;
        for _ in 0..self.slots.len() {
            match &self.slots[index] {
                None => return Probe::Vacant(index),
                Some((k, _)) if self.hasher.equal(k, key) => return Probe::Occupied(index),
                Some(_) => index = (index + 1) & self.mask,
            }
        }
        Probe::Full
    }

    fn full(&self) -> Error {
        Error::HashTableFull { capacity: self.slots.len() }
    }

    /// Insert `key`, overwriting the value of an equal key.
    pub fn set(&mut self, key: K, value: V) -> Result<()> {
        match self.probe(&key) {
            Probe::Occupied(index) => {
                if let Some((_, v)) = &mut self.slots[index] { *v = value; }
            }
            Probe::Vacant(index) => {
                self.slots[index] = Some((key, value));
                self.len += 1;
            }
            Probe::Full => return Err(self.full()),
        }
        Ok(())
    }

    /// Insert `key` only if no equal key is present; returns the value that
    /// ends up stored for it (the existing one wins).
    pub fn maybe_set(&mut self, key: K, value: V) -> Result<&V> {
        let index = match self.probe(&key) {
            Probe::Occupied(index) => index,
            Probe::Vacant(index) => {
                self.slots[index] = Some((key, value));
                self.len += 1;
                index
            }
            Probe::Full => return Err(self.full()),
        };
        match &self.slots[index] {
            Some((_, v)) => Ok(v),
            None => Err(self.full()),
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        match self.probe(key) {
            Probe::Occupied(index) => self.slots[index].as_ref().map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        match self.probe(key) {
            Probe::Occupied(index) => self.slots[index].as_mut().map(|(_, v)| v),
            _ => None,
        }
    }

    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        matches!(self.probe(key), Probe::Occupied(_))
    }

    /// Stored keys in slot order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.slots.iter().flatten().map(|(k, _)| k)
    }
}

/// Fixed-size open-addressing hash set; see [`OpenHashMap`].
#[derive(Clone, Debug)]
pub struct OpenHashSet<K, H> {
    map: OpenHashMap<K, (), H>,
}

impl<K, H: KeyHasher<K>> OpenHashSet<K, H> {
    pub fn new(capacity_hint: usize, hasher: H) -> Self {
        Self { map: OpenHashMap::new(capacity_hint, hasher) }
    }

    /// Add `key`; adding an equal key again is a no-op.
    pub fn add(&mut self, key: K) -> Result<()> {
        self.map.maybe_set(key, ()).map(|_| ())
    }

    #[inline] pub fn contains(&self, key: &K) -> bool { self.map.contains_key(key) }

    #[inline] pub fn len(&self) -> usize { self.map.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.map.is_empty() }

    /// Stored keys in slot order.
    pub fn values(&self) -> impl Iterator<Item = &K> + '_ {
        self.map.keys()
    }
}
