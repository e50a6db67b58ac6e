use lru::LruCache;
use parking_lot::RwLock;
use recyclens_core::IdentifyResponse;
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;
use std::time::{SystemTime, UNIX_EPOCH};

/// Image payload prefix length hashed into the cache key. Hashing only a
/// prefix trades collision risk for speed on multi-megabyte payloads.
const FINGERPRINT_PREFIX_LEN: usize = 1000;

#[derive(Debug, Clone)]
struct CacheEntry {
    result: IdentifyResponse,
    timestamp: u64,
}

/// Cache fingerprint of an image: SHA-256 over the first 1000 characters of
/// the base64 payload. Two different images sharing a prefix collide; that
/// is an accepted tradeoff.
pub fn fingerprint(image_base64: &str) -> String {
    let prefix: String = image_base64.chars().take(FINGERPRINT_PREFIX_LEN).collect();
    let mut hasher = Sha256::new();
    hasher.update(prefix.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone, Copy)]
pub struct CacheStats {
    pub size: usize,
    pub capacity: usize,
}

/// Bounded LRU of identification results with per-entry TTL. Capacity and
/// TTL eviction both apply; whichever triggers first wins. `get` refreshes
/// recency.
pub struct ResultCache {
    entries: RwLock<LruCache<String, CacheEntry>>,
    ttl_secs: u64,
}

impl ResultCache {
    pub fn new(capacity: usize, ttl_secs: u64) -> Self {
        let capacity = capacity.clamp(1, 10_000);
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: RwLock::new(LruCache::new(capacity)),
            ttl_secs,
        }
    }

    pub fn get(&self, key: &str) -> Option<IdentifyResponse> {
        let mut entries = self.entries.write();
        if let Some(entry) = entries.get(key) {
            let now = now_secs();
            if entry.timestamp > now {
                // Clock went backwards; the entry's age is meaningless.
                entries.pop(key);
                return None;
            }
            if now.saturating_sub(entry.timestamp) < self.ttl_secs {
                tracing::debug!(key, "cache hit");
                return Some(entry.result.clone());
            }
            entries.pop(key);
        }
        None
    }

    pub fn set(&self, key: &str, result: IdentifyResponse) {
        let entry = CacheEntry {
            result,
            timestamp: now_secs(),
        };
        self.entries.write().put(key.to_string(), entry);
        tracing::debug!(key, "cached result");
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.read();
        CacheStats {
            size: entries.len(),
            capacity: entries.cap().get(),
        }
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
