use crate::{Result, StoreError};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::Path;

pub(crate) struct TagsWriteLock {
    #[allow(dead_code)]
    file: File,
}

impl Drop for TagsWriteLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// Blocks until this process holds the exclusive write lock.
pub(crate) fn acquire_write_lock(lock_path: &Path) -> Result<TagsWriteLock> {
    if let Some(parent) = lock_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .truncate(false)
        .open(lock_path)
        .map_err(|source| StoreError::LockError {
            path: lock_path.to_path_buf(),
            source,
        })?;
    file.lock_exclusive()
        .map_err(|source| StoreError::LockError {
            path: lock_path.to_path_buf(),
            source,
        })?;
    Ok(TagsWriteLock { file })
}
