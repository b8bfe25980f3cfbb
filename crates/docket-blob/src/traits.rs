use docket_types::BlobKey;

use crate::error::BlobResult;

/// Write-once blob storage.
///
/// All implementations must satisfy these invariants:
/// - A key is written at most once. Re-putting an existing key fails with
///   `KeyExists`; callers that replace content write a fresh key instead.
/// - Reads of a written key return exactly the bytes that were written.
/// - `delete` of an absent key is a no-op reporting `false`.
/// - Concurrent reads are always safe (blobs are immutable).
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `key`. Fails with `KeyExists` if the key has
    /// already been written.
    fn put(&self, key: &BlobKey, bytes: Vec<u8>) -> BlobResult<()>;

    /// Fetch the bytes stored under `key`. Fails with `NotFound` on a miss.
    fn get(&self, key: &BlobKey) -> BlobResult<Vec<u8>>;

    /// Remove the blob under `key`. Returns `true` if it existed.
    fn delete(&self, key: &BlobKey) -> BlobResult<bool>;

    /// Whether a blob exists under `key`.
    fn exists(&self, key: &BlobKey) -> BlobResult<bool>;

    /// Size in bytes of the blob under `key`. Fails with `NotFound` on a miss.
    fn size(&self, key: &BlobKey) -> BlobResult<u64>;
}
