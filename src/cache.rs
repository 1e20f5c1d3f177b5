//! Frame cache with LRU eviction and concurrent access.
//!
//! Loader workers decode frames in the background and publish them here;
//! the UI thread looks up the playhead frame each repaint. A claim set
//! prevents two workers from decoding the same frame (Header -> Loading
//! style claim, collapsed to a set since frames here are immutable once
//! decoded).

use log::debug;
use lru::LruCache;
use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use crate::frame::Frame;

/// Default capacity in frames (a concat frame is ~8 MB at 3200x640 RGBA8)
pub const DEFAULT_CAPACITY: usize = 64;

/// Cache key: (scene index, frame index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameKey {
    pub scene: usize,
    pub frame: usize,
}

struct Inner {
    lru: LruCache<FrameKey, Arc<Frame>>,
    inflight: HashSet<FrameKey>,
}

/// Shared decoded-frame cache. Clone the `Arc` into workers.
pub struct FrameCache {
    inner: Mutex<Inner>,
}

impl FrameCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity >= 1");
        Self {
            inner: Mutex::new(Inner {
                lru: LruCache::new(capacity),
                inflight: HashSet::new(),
            }),
        }
    }

    /// Look up a decoded frame, marking it recently used.
    pub fn get(&self, key: FrameKey) -> Option<Arc<Frame>> {
        self.inner.lock().unwrap().lru.get(&key).cloned()
    }

    pub fn contains(&self, key: FrameKey) -> bool {
        self.inner.lock().unwrap().lru.contains(&key)
    }

    /// Claim a frame for loading. Returns false when the frame is already
    /// cached or another worker holds the claim.
    pub fn try_claim(&self, key: FrameKey) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.lru.contains(&key) || inner.inflight.contains(&key) {
            return false;
        }
        inner.inflight.insert(key);
        true
    }

    /// Publish a decoded frame and release its claim.
    pub fn insert(&self, key: FrameKey, frame: Frame) {
        let mut inner = self.inner.lock().unwrap();
        inner.inflight.remove(&key);
        inner.lru.put(key, Arc::new(frame));
    }

    /// Release a claim without publishing (decode failed or went stale).
    pub fn release(&self, key: FrameKey) {
        self.inner.lock().unwrap().inflight.remove(&key);
        debug!("Released claim for scene {} frame {}", key.scene, key.frame);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().lru.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame::from_rgba8(2, 2, vec![0; 16])
    }

    fn key(scene: usize, idx: usize) -> FrameKey {
        FrameKey { scene, frame: idx }
    }

    #[test]
    fn test_insert_and_get() {
        let cache = FrameCache::new(4);
        assert!(cache.get(key(0, 0)).is_none());
        cache.insert(key(0, 0), frame());
        let got = cache.get(key(0, 0)).unwrap();
        assert_eq!(got.width(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_lru_evicts_oldest() {
        let cache = FrameCache::new(2);
        cache.insert(key(0, 0), frame());
        cache.insert(key(0, 1), frame());
        // Touch frame 0 so frame 1 becomes the eviction candidate
        cache.get(key(0, 0));
        cache.insert(key(0, 2), frame());
        assert!(cache.contains(key(0, 0)));
        assert!(!cache.contains(key(0, 1)));
        assert!(cache.contains(key(0, 2)));
    }

    #[test]
    fn test_claim_blocks_duplicates() {
        let cache = FrameCache::new(4);
        assert!(cache.try_claim(key(1, 5)));
        assert!(!cache.try_claim(key(1, 5)));
        cache.release(key(1, 5));
        assert!(cache.try_claim(key(1, 5)));
    }

    #[test]
    fn test_claim_rejected_once_cached() {
        let cache = FrameCache::new(4);
        assert!(cache.try_claim(key(0, 0)));
        cache.insert(key(0, 0), frame());
        assert!(!cache.try_claim(key(0, 0)));
    }
}
