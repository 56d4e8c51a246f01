//! Separation sets recorded during skeleton search.

use std::collections::HashMap;

/// The first conditioning set found to separate each removed pair.
#[derive(Debug, Clone, Default)]
pub struct SeparationSets {
    sets: HashMap<(String, String), Vec<String>>,
}

impl SeparationSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `set` for `a`/`b` unless one is already recorded.
    pub fn insert(&mut self, a: &str, b: &str, set: Vec<String>) {
        self.sets.entry(key(a, b)).or_insert(set);
    }

    pub fn get(&self, a: &str, b: &str) -> Option<&[String]> {
        self.sets.get(&key(a, b)).map(Vec::as_slice)
    }

    /// Whether `a` and `b` were separated by a set containing `node`.
    /// `None` if the pair was never separated.
    pub fn separated_by(&self, a: &str, b: &str, node: &str) -> Option<bool> {
        self.get(a, b).map(|s| s.iter().any(|n| n == node))
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

fn key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}
