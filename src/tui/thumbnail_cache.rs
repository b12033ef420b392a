use std::collections::{HashMap, HashSet, VecDeque};

use ratatui_image::protocol::StatefulProtocol;

/// Thumbnails ready to draw, keyed by image id.
pub type ProtocolCache = ThumbnailCache<Box<dyn StatefulProtocol>>;

/// LRU cache of decoded thumbnails.
/// Holds up to `max_size` entries, evicting least-recently-used when full.
/// Ids whose download failed are remembered so they are not retried on
/// every frame.
pub struct ThumbnailCache<V> {
    entries: HashMap<i64, V>,
    /// Most recently used at back, least at front
    access_order: VecDeque<i64>,
    failed: HashSet<i64>,
    max_size: usize,
}

impl<V> ThumbnailCache<V> {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: HashMap::new(),
            access_order: VecDeque::new(),
            failed: HashSet::new(),
            max_size,
        }
    }

    pub fn insert(&mut self, id: i64, value: V) {
        if self.entries.contains_key(&id) {
            self.access_order.retain(|k| *k != id);
        }

        while self.entries.len() >= self.max_size && !self.access_order.is_empty() {
            if let Some(oldest) = self.access_order.pop_front() {
                self.entries.remove(&oldest);
            }
        }

        self.failed.remove(&id);
        self.entries.insert(id, value);
        self.access_order.push_back(id);
    }

    /// Get a cached thumbnail, marking it most recently used.
    pub fn get_mut(&mut self, id: i64) -> Option<&mut V> {
        if self.entries.contains_key(&id) {
            self.access_order.retain(|k| *k != id);
            self.access_order.push_back(id);
            self.entries.get_mut(&id)
        } else {
            None
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn mark_failed(&mut self, id: i64) {
        self.failed.insert(id);
    }

    pub fn is_failed(&self, id: i64) -> bool {
        self.failed.contains(&id)
    }

    /// Nothing to fetch for `id`: already cached or known to fail.
    pub fn is_settled(&self, id: i64) -> bool {
        self.contains(id) || self.is_failed(id)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
