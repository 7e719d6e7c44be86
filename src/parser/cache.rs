//! Bounded LRU cache of parsed documents, keyed by metadata file path.
//!
//! Owned by the parser that fills it; there is no process-wide cache. Not
//! thread-safe, matching the single-threaded pull-based pipeline.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::Document;

pub struct DocumentCache {
    capacity: usize,
    map: HashMap<PathBuf, Arc<Document>>,
    // Front = least recently used.
    order: VecDeque<PathBuf>,
}

impl DocumentCache {
    pub fn new(capacity: usize) -> Self {
        DocumentCache {
            capacity: capacity.max(1),
            map: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Fetch a cached document and mark it most recently used.
    pub fn get(&mut self, path: &Path) -> Option<Arc<Document>> {
        let doc = self.map.get(path)?.clone();
        self.touch(path);
        Some(doc)
    }

    /// Insert a document, evicting the least recently used entry when full.
    pub fn insert(&mut self, path: PathBuf, doc: Arc<Document>) {
        if self.map.contains_key(&path) {
            self.touch(&path);
            self.map.insert(path, doc);
            return;
        }
        while self.map.len() >= self.capacity {
            match self.order.pop_front() {
                Some(old) => {
                    self.map.remove(&old);
                }
                None => break,
            }
        }
        self.order.push_back(path.clone());
        self.map.insert(path, doc);
    }

    fn touch(&mut self, path: &Path) {
        if let Some(pos) = self.order.iter().position(|p| p == path) {
            if let Some(p) = self.order.remove(pos) {
                self.order.push_back(p);
            }
        }
    }
}
