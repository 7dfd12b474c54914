use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::Hash;

/// Key-value store that polls the entry with the lowest value.
///
/// Keys sharing a value are kept in a bucket and polled most recent first.
/// Re-putting a key moves it to the new value's bucket. The entry under the old
/// value is left in place and skipped when it reaches the front, so a key is
/// only ever returned with its latest value.
#[derive(Debug, Clone)]
pub struct ValueSortedMap<K, V> {
    value_to_keys: BTreeMap<V, VecDeque<K>>,
    live: HashMap<K, V>,
}

impl<K, V> Default for ValueSortedMap<K, V> {
    fn default() -> Self {
        ValueSortedMap {
            value_to_keys: BTreeMap::new(),
            live: HashMap::new(),
        }
    }
}

impl<K, V> ValueSortedMap<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone + Ord,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, key: K, value: V) {
        self.value_to_keys
            .entry(value.clone())
            .or_default()
            .push_front(key.clone());
        self.live.insert(key, value);
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.live.contains_key(key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.live.get(key)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn poll_lowest(&mut self) -> Option<(K, V)> {
        loop {
            let mut bucket = self.value_to_keys.first_entry()?;
            let value = bucket.key().clone();
            let key = bucket.get_mut().pop_front();
            if bucket.get().is_empty() {
                bucket.remove();
            }
            let Some(key) = key else {
                continue;
            };

            // Entries superseded by a later put no longer match the live value.
            if self.live.get(&key) == Some(&value) {
                self.live.remove(&key);
                return Some((key, value));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_returns_lowest_value() {
        let mut map = ValueSortedMap::new();
        map.put("c", 3);
        map.put("a", 1);
        map.put("b", 2);

        assert_eq!(map.len(), 3);
        assert_eq!(map.poll_lowest(), Some(("a", 1)));
        assert_eq!(map.poll_lowest(), Some(("b", 2)));
        assert_eq!(map.poll_lowest(), Some(("c", 3)));
        assert_eq!(map.poll_lowest(), None);
        assert!(map.is_empty());
    }

    #[test]
    fn test_equal_values_poll_most_recent_first() {
        let mut map = ValueSortedMap::new();
        map.put("first", 7);
        map.put("second", 7);
        map.put("third", 7);
        map.put("low", 1);

        assert_eq!(map.poll_lowest(), Some(("low", 1)));
        assert_eq!(map.poll_lowest(), Some(("third", 7)));
        assert_eq!(map.poll_lowest(), Some(("second", 7)));
        assert_eq!(map.poll_lowest(), Some(("first", 7)));
    }

    #[test]
    fn test_improved_value_supersedes_stale_entry() {
        let mut map = ValueSortedMap::new();
        map.put("x", 10);
        map.put("y", 5);
        map.put("x", 2);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&"x"), Some(&2));
        assert_eq!(map.poll_lowest(), Some(("x", 2)));
        assert!(!map.contains_key(&"x"));
        assert_eq!(map.poll_lowest(), Some(("y", 5)));
        // The worse entry for "x" under 10 is never returned.
        assert_eq!(map.poll_lowest(), None);
    }

    #[test]
    fn test_worsened_value_polls_under_new_value() {
        let mut map = ValueSortedMap::new();
        map.put("x", 1);
        map.put("y", 4);
        map.put("x", 9);

        assert_eq!(map.poll_lowest(), Some(("y", 4)));
        assert_eq!(map.poll_lowest(), Some(("x", 9)));
        assert!(map.is_empty());
    }

    #[test]
    fn test_reinsert_after_poll_is_live_again() {
        let mut map = ValueSortedMap::new();
        map.put("x", 3);
        map.put("x", 1);
        assert_eq!(map.poll_lowest(), Some(("x", 1)));

        map.put("x", 3);
        assert!(map.contains_key(&"x"));
        assert_eq!(map.poll_lowest(), Some(("x", 3)));
        assert_eq!(map.poll_lowest(), None);
    }
}
