//! Bounded content cache with oldest-insertion eviction.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

/// Upper bound on the space reserved up front.
const INITIAL_RESERVE: usize = 64;

/// Map from file path to its last known text.
///
/// Holds at most `capacity` entries. Overwriting a path keeps its
/// original insertion position, so a frequently saved file can still
/// be the next one evicted. A capacity of zero disables caching.
#[derive(Debug)]
pub struct ContentCache {
    capacity: usize,
    entries: HashMap<PathBuf, String>,
    order: VecDeque<PathBuf>,
}

impl ContentCache {
    pub fn new(capacity: usize) -> Self {
        let reserve = capacity.min(INITIAL_RESERVE);
        Self {
            capacity,
            entries: HashMap::with_capacity(reserve),
            order: VecDeque::with_capacity(reserve),
        }
    }

    pub fn get(&self, path: &Path) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    /// Insert or overwrite an entry. Returns the evicted path, if any.
    pub fn put(&mut self, path: PathBuf, text: String) -> Option<PathBuf> {
        if self.capacity == 0 {
            return None;
        }
        if let Some(existing) = self.entries.get_mut(&path) {
            *existing = text;
            return None;
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.order.pop_front().inspect(|oldest| {
                self.entries.remove(oldest);
            })
        } else {
            None
        };

        self.order.push_back(path.clone());
        self.entries.insert(path, text);
        evicted
    }

    /// Remove an entry. Absent paths are ignored.
    pub fn remove(&mut self, path: &Path) -> Option<String> {
        let text = self.entries.remove(path)?;
        self.order.retain(|p| p != path);
        Some(text)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(name: &str) -> PathBuf {
        PathBuf::from(format!("/tmp/{}", name))
    }

    #[test]
    fn test_put_and_get() {
        let mut cache = ContentCache::new(2);
        assert!(cache.put(path("a"), "alpha".into()).is_none());
        assert_eq!(cache.get(&path("a")), Some("alpha"));
        assert_eq!(cache.get(&path("b")), None);
    }

    #[test]
    fn test_evicts_oldest_insertion() {
        let mut cache = ContentCache::new(2);
        cache.put(path("a"), "1".into());
        cache.put(path("b"), "2".into());
        let evicted = cache.put(path("c"), "3".into());

        assert_eq!(evicted, Some(path("a")));
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&path("a")));
        assert!(cache.contains(&path("b")));
        assert!(cache.contains(&path("c")));
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut cache = ContentCache::new(2);
        cache.put(path("a"), "1".into());
        cache.put(path("b"), "2".into());
        assert!(cache.put(path("a"), "updated".into()).is_none());
        assert_eq!(cache.get(&path("a")), Some("updated"));

        assert_eq!(cache.put(path("c"), "3".into()), Some(path("a")));
    }

    #[test]
    fn test_remove_frees_slot() {
        let mut cache = ContentCache::new(2);
        cache.put(path("a"), "1".into());
        cache.put(path("b"), "2".into());
        assert_eq!(cache.remove(&path("a")).as_deref(), Some("1"));
        assert!(cache.remove(&path("a")).is_none());

        assert!(cache.put(path("c"), "3".into()).is_none());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let mut cache = ContentCache::new(0);
        cache.put(path("a"), "1".into());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_huge_capacity_reserves_lazily() {
        let mut cache = ContentCache::new(usize::MAX / 8);
        cache.put(path("a"), "1".into());
        cache.put(path("b"), "2".into());
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.capacity(), usize::MAX / 8);
    }
}
