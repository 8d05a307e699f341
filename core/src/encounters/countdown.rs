use std::hash::Hash;

use hashbrown::HashMap;

/// Per-key tick countdowns (eggs, falling boulders, lightning strikes).
///
/// Entries are decremented once per tick and removed when they reach zero.
#[derive(Debug, Clone)]
pub struct TickCountdowns<K> {
    entries: HashMap<K, u32>,
}

impl<K> Default for TickCountdowns<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Copy> TickCountdowns<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) a countdown. Zero removes the key.
    pub fn set(&mut self, key: K, ticks: u32) {
        if ticks == 0 {
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, ticks);
        }
    }

    pub fn remove(&mut self, key: &K) -> Option<u32> {
        self.entries.remove(key)
    }

    pub fn get(&self, key: &K) -> Option<u32> {
        self.entries.get(key).copied()
    }

    pub fn on_tick(&mut self) {
        self.entries.retain(|_, ticks| {
            *ticks -= 1;
            *ticks > 0
        });
    }

    /// Soonest remaining countdown
    pub fn min(&self) -> Option<u32> {
        self.entries.values().copied().min()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, u32)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
