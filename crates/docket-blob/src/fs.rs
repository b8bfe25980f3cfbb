//! Directory-backed blob store.
//!
//! One file per blob, named by its key, under a single root directory.
//! Writes go through a temporary sibling file and an atomic rename, so a
//! crash mid-write never leaves a half-written blob visible under its key.

use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use docket_types::BlobKey;

use crate::error::{BlobError, BlobResult};
use crate::traits::BlobStore;

/// Filesystem implementation of [`BlobStore`].
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Open (creating if needed) a blob directory.
    pub fn open(root: impl Into<PathBuf>) -> BlobResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(io_error)?;
        Ok(Self { root })
    }

    /// The directory blobs live in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn blob_path(&self, key: &BlobKey) -> PathBuf {
        self.root.join(key.as_str())
    }
}

fn io_error(e: io::Error) -> BlobError {
    BlobError::Storage(e.to_string())
}

impl BlobStore for FsBlobStore {
    fn put(&self, key: &BlobKey, bytes: Vec<u8>) -> BlobResult<()> {
        let path = self.blob_path(key);
        if path.exists() {
            return Err(BlobError::KeyExists(key.clone()));
        }

        // Write-then-rename keeps partially written blobs invisible.
        let tmp = self.root.join(format!("{}.tmp", key.as_str()));
        let mut file = fs::File::create(&tmp).map_err(io_error)?;
        file.write_all(&bytes).map_err(io_error)?;
        file.sync_all().map_err(io_error)?;
        fs::rename(&tmp, &path).map_err(io_error)?;
        Ok(())
    }

    fn get(&self, key: &BlobKey) -> BlobResult<Vec<u8>> {
        match fs::read(self.blob_path(key)) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(BlobError::NotFound(key.clone())),
            Err(e) => Err(io_error(e)),
        }
    }

    fn delete(&self, key: &BlobKey) -> BlobResult<bool> {
        match fs::remove_file(self.blob_path(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error(e)),
        }
    }

    fn exists(&self, key: &BlobKey) -> BlobResult<bool> {
        Ok(self.blob_path(key).exists())
    }

    fn size(&self, key: &BlobKey) -> BlobResult<u64> {
        match fs::metadata(self.blob_path(key)) {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(BlobError::NotFound(key.clone())),
            Err(e) => Err(io_error(e)),
        }
    }
}

impl std::fmt::Debug for FsBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FsBlobStore").field("root", &self.root).finish()
    }
}
