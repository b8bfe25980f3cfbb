use std::collections::HashMap;
use std::sync::RwLock;

use docket_types::BlobKey;

use crate::error::{BlobError, BlobResult};
use crate::traits::BlobStore;

/// In-memory, HashMap-based blob store.
///
/// Intended for tests and embedding. All blobs are held in memory behind a
/// `RwLock` for safe concurrent access. Bytes are cloned on read.
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<BlobKey, Vec<u8>>>,
}

impl InMemoryBlobStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// Number of blobs currently stored.
    pub fn len(&self) -> usize {
        self.blobs.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.blobs.read().expect("lock poisoned").is_empty()
    }

    /// Total bytes across all stored blobs.
    pub fn total_bytes(&self) -> u64 {
        self.blobs
            .read()
            .expect("lock poisoned")
            .values()
            .map(|b| b.len() as u64)
            .sum()
    }

    /// Remove all blobs from the store.
    pub fn clear(&self) {
        self.blobs.write().expect("lock poisoned").clear();
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobStore for InMemoryBlobStore {
    fn put(&self, key: &BlobKey, bytes: Vec<u8>) -> BlobResult<()> {
        let mut map = self.blobs.write().expect("lock poisoned");
        if map.contains_key(key) {
            return Err(BlobError::KeyExists(key.clone()));
        }
        map.insert(key.clone(), bytes);
        Ok(())
    }

    fn get(&self, key: &BlobKey) -> BlobResult<Vec<u8>> {
        let map = self.blobs.read().expect("lock poisoned");
        map.get(key)
            .cloned()
            .ok_or_else(|| BlobError::NotFound(key.clone()))
    }

    fn delete(&self, key: &BlobKey) -> BlobResult<bool> {
        let mut map = self.blobs.write().expect("lock poisoned");
        Ok(map.remove(key).is_some())
    }

    fn exists(&self, key: &BlobKey) -> BlobResult<bool> {
        let map = self.blobs.read().expect("lock poisoned");
        Ok(map.contains_key(key))
    }

    fn size(&self, key: &BlobKey) -> BlobResult<u64> {
        let map = self.blobs.read().expect("lock poisoned");
        map.get(key)
            .map(|b| b.len() as u64)
            .ok_or_else(|| BlobError::NotFound(key.clone()))
    }
}

impl std::fmt::Debug for InMemoryBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBlobStore")
            .field("blob_count", &self.len())
            .finish()
    }
}
