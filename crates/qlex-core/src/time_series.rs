//! Ordered time-series container.
//!
//! `TimeSeries<K, V>` is a thin wrapper over a `BTreeMap`. Fixing histories
//! are stored as `TimeSeries<Date, Rate>`; a missing key is simply `None`.

use std::collections::BTreeMap;

/// A time-indexed container backed by a `BTreeMap`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries<K: Ord + Clone, V: Clone> {
    data: BTreeMap<K, V>,
}

impl<K: Ord + Clone, V: Clone> Default for TimeSeries<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone, V: Clone> FromIterator<(K, V)> for TimeSeries<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<K: Ord + Clone, V: Clone> TimeSeries<K, V> {
    /// Create an empty time series.
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The earliest key, or `None` if empty.
    pub fn first_key(&self) -> Option<&K> {
        self.data.keys().next()
    }

    /// The latest key, or `None` if empty.
    pub fn last_key(&self) -> Option<&K> {
        self.data.keys().next_back()
    }

    /// Look up a value by key.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.data.get(key)
    }

    /// Insert a value, returning the one it replaced.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.data.insert(key, value)
    }

    /// Remove an entry, returning its value if present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.data.remove(key)
    }

    /// Whether a key is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.data.contains_key(key)
    }

    /// Iterate over `(&K, &V)` in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.data.iter()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}
