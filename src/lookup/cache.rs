//! Memoized lookup results.

use std::collections::{HashMap, HashSet};

use crate::core::{Artifact, NotFound, Resolution};

/// Per-locator memo of resolved and unresolvable names.
///
/// A name lives in at most one of the two maps; `clear` empties both. The
/// cache never expires on its own - the owning locator clears it whenever
/// its configuration changes.
#[derive(Debug, Default)]
pub struct LookupCache {
    found: HashMap<String, Vec<Artifact>>,
    not_found: HashSet<String>,
}

impl LookupCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        LookupCache::default()
    }

    /// The cached outcome for a name, if any.
    pub fn lookup(&self, name: &str) -> Option<Resolution> {
        if self.not_found.contains(name) {
            return Some(Resolution::NotFound(NotFound::new(name)));
        }
        self.found
            .get(name)
            .map(|artifacts| Resolution::Found(artifacts.clone()))
    }

    /// Record the outcome of resolving a name.
    pub fn store(&mut self, name: &str, resolution: &Resolution) {
        match resolution {
            Resolution::Found(artifacts) => {
                self.not_found.remove(name);
                self.found.insert(name.to_string(), artifacts.clone());
            }
            Resolution::NotFound(_) => {
                self.found.remove(name);
                self.not_found.insert(name.to_string());
            }
        }
    }

    /// Drop every memoized entry.
    pub fn clear(&mut self) {
        self.found.clear();
        self.not_found.clear();
    }

    /// Number of memoized names, found or not.
    pub fn len(&self) -> usize {
        self.found.len() + self.not_found.len()
    }

    /// Whether nothing is memoized.
    pub fn is_empty(&self) -> bool {
        self.found.is_empty() && self.not_found.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_lookup() {
        let mut cache = LookupCache::new();
        assert!(cache.lookup("a.c").is_none());

        let found = Resolution::Found(vec![Artifact::external("/src/a.c")]);
        cache.store("a.c", &found);
        assert_eq!(cache.lookup("a.c"), Some(found));

        let missing = Resolution::NotFound(NotFound::new("b.c"));
        cache.store("b.c", &missing);
        assert!(!cache.lookup("b.c").unwrap().is_found());
    }

    #[test]
    fn test_name_lives_in_one_map_only() {
        let mut cache = LookupCache::new();

        cache.store("a.c", &Resolution::NotFound(NotFound::new("a.c")));
        cache.store("a.c", &Resolution::Found(vec![Artifact::external("/src/a.c")]));
        assert_eq!(cache.len(), 1);
        assert!(cache.lookup("a.c").unwrap().is_found());

        cache.store("a.c", &Resolution::NotFound(NotFound::new("a.c")));
        assert_eq!(cache.len(), 1);
        assert!(!cache.lookup("a.c").unwrap().is_found());
    }

    #[test]
    fn test_clear() {
        let mut cache = LookupCache::new();
        cache.store("a.c", &Resolution::Found(vec![Artifact::external("/src/a.c")]));
        cache.store("b.c", &Resolution::NotFound(NotFound::new("b.c")));
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.lookup("a.c").is_none());
        assert!(cache.lookup("b.c").is_none());
    }
}
