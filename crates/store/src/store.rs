use crate::lock::acquire_write_lock;
use crate::paths::{default_tags_file_path, lock_path_for_tags_file};
use crate::{Result, StoreError, Tag};
use std::path::{Path, PathBuf};

enum CacheState {
    Uninitialized,
    Loaded(Vec<Tag>),
}

/// Owner of the tags file and its in-memory copy.
///
/// Nothing else reads or writes the file. Callers get snapshots from
/// [`TagStore::load`] and hand whole collections back to
/// [`TagStore::try_save`]; the cache is replaced only after the file write
/// succeeded, so the two never disagree.
pub struct TagStore {
    path: PathBuf,
    state: CacheState,
}

impl TagStore {
    /// A store backed by `path`. The file is not touched until first access.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: CacheState::Uninitialized,
        }
    }

    pub fn at_default_location() -> Result<Self> {
        let path = default_tags_file_path().ok_or(StoreError::NoUserDir)?;
        Ok(Self::open(path))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        matches!(self.state, CacheState::Loaded(_))
    }

    /// Reads the file into the cache on first call; later calls are no-ops.
    pub fn init_cache(&mut self) {
        if self.is_initialized() {
            return;
        }
        let tags = self.read_or_recover();
        log::info!(
            "Tags cache initialized with {} tags from {}",
            tags.len(),
            self.path.display()
        );
        self.state = CacheState::Loaded(tags);
    }

    /// Borrow of the cached collection, initializing it first if needed.
    pub fn tags(&mut self) -> &[Tag] {
        self.init_cache();
        match &self.state {
            CacheState::Loaded(tags) => tags,
            CacheState::Uninitialized => &[],
        }
    }

    /// Snapshot of the collection.
    pub fn load(&mut self) -> Vec<Tag> {
        self.tags().to_vec()
    }

    /// Drops the cache and re-reads the file, picking up external edits.
    pub fn refresh_cache(&mut self) -> Vec<Tag> {
        self.state = CacheState::Uninitialized;
        self.load()
    }

    /// Persists the whole collection, then makes it the cache.
    pub fn try_save(&mut self, tags: &[Tag]) -> Result<()> {
        let mut persisted = tags.to_vec();
        for tag in &mut persisted {
            tag.normalize_paths();
        }
        write_collection(&self.path, &persisted)?;
        self.state = CacheState::Loaded(persisted);
        Ok(())
    }

    /// [`TagStore::try_save`] for callers that only need to know whether the
    /// collection was persisted. Failures are logged.
    pub fn save(&mut self, tags: &[Tag]) -> bool {
        match self.try_save(tags) {
            Ok(()) => true,
            Err(err) => {
                log::error!("Error saving tags to {}: {err}", self.path.display());
                false
            }
        }
    }

    fn read_or_recover(&self) -> Vec<Tag> {
        match read_collection(&self.path) {
            Ok(Some(tags)) => {
                log::debug!("Loaded {} tags from {}", tags.len(), self.path.display());
                tags
            }
            Ok(None) => {
                log::info!(
                    "Tags file {} does not exist, creating empty file",
                    self.path.display()
                );
                self.reset_best_effort();
                Vec::new()
            }
            Err(err) => {
                log::error!(
                    "Tags file {} is unreadable or corrupt ({err}), resetting to empty",
                    self.path.display()
                );
                self.reset_best_effort();
                Vec::new()
            }
        }
    }

    fn reset_best_effort(&self) {
        if let Err(err) = write_collection(&self.path, &[]) {
            log::error!("Error recreating tags file {}: {err}", self.path.display());
        }
    }
}

fn read_collection(path: &Path) -> Result<Option<Vec<Tag>>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(path)?;
    let mut tags: Vec<Tag> = serde_json::from_str(&raw)?;
    for tag in &mut tags {
        tag.normalize_paths();
    }
    Ok(Some(tags))
}

fn write_collection(path: &Path, tags: &[Tag]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let _lock = acquire_write_lock(&lock_path_for_tags_file(path))?;

    let bytes = serde_json::to_vec_pretty(tags)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
