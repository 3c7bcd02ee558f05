use crate::events::{ChangeKind, TagsChanged};
use crate::{Result, TagIndexError};
use tagdex_path_match::{is_descendant, normalize_for_storage, paths_equivalent};
use tagdex_store::{Tag, TagId, TagStore, TargetType};
use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 64;

pub struct TagIndex {
    store: TagStore,
    events: broadcast::Sender<TagsChanged>,
}

impl TagIndex {
    pub fn new(store: TagStore) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { store, events }
    }

    /// Receiver for change notifications.
    ///
    /// One event is sent per write that reached the tags file. Calls that
    /// fail, or that change nothing (attaching an already tagged path,
    /// removing an unknown tag), send nothing. Events sent while nobody
    /// listens are dropped.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TagsChanged> {
        self.events.subscribe()
    }

    pub fn load_tags(&mut self) -> Vec<Tag> {
        self.store.load()
    }

    pub fn refresh(&mut self) -> Vec<Tag> {
        self.store.refresh_cache()
    }

    /// Replaces the whole collection as given, duplicates included.
    pub fn save_tags(&mut self, tags: &[Tag]) -> Result<()> {
        self.store.try_save(tags)?;
        self.publish(TagsChanged::collection_saved());
        Ok(())
    }

    pub fn get_tag(&mut self, id: &TagId) -> Option<Tag> {
        self.store.tags().iter().find(|tag| &tag.id == id).cloned()
    }

    pub fn add_tag(&mut self, mut tag: Tag) -> Result<Tag> {
        let mut tags = self.store.load();
        if tags.iter().any(|existing| existing.id == tag.id) {
            return Err(TagIndexError::DuplicateId(tag.id));
        }
        tag.paths = dedup_equivalent(&tag.paths);
        log::info!(
            "Adding {} tag {} ({})",
            tag.target_type.as_str(),
            tag.name,
            tag.id
        );
        tags.push(tag.clone());
        self.store.try_save(&tags)?;
        self.publish(TagsChanged::for_tag(ChangeKind::TagAdded, &tag.id));
        Ok(tag)
    }

    pub fn create_tag(
        &mut self,
        name: impl Into<String>,
        color: impl Into<String>,
        target_type: TargetType,
    ) -> Result<Tag> {
        self.add_tag(Tag::new(name, color, target_type))
    }

    pub fn update_tag(&mut self, mut tag: Tag) -> Result<Tag> {
        let mut tags = self.store.load();
        let slot = tags
            .iter_mut()
            .find(|existing| existing.id == tag.id)
            .ok_or_else(|| TagIndexError::NotFound(tag.id.clone()))?;
        tag.paths = dedup_equivalent(&tag.paths);
        *slot = tag.clone();
        self.store.try_save(&tags)?;
        self.publish(TagsChanged::for_tag(ChangeKind::TagUpdated, &tag.id));
        Ok(tag)
    }

    /// `Ok(false)` when no tag has this id; the file is then left alone.
    pub fn remove_tag(&mut self, id: &TagId) -> Result<bool> {
        let tags = self.store.load();
        let before = tags.len();
        let remaining: Vec<Tag> = tags.into_iter().filter(|tag| &tag.id != id).collect();
        if remaining.len() == before {
            return Ok(false);
        }
        self.store.try_save(&remaining)?;
        log::info!("Removed tag {id}");
        self.publish(TagsChanged::for_tag(ChangeKind::TagRemoved, id));
        Ok(true)
    }

    /// Tags with a path equivalent to `target`, or a path `target` lies
    /// under. Collection order is kept.
    pub fn get_tags_for_path(&mut self, target: &str) -> Vec<Tag> {
        self.store
            .tags()
            .iter()
            .filter(|tag| {
                tag.paths
                    .iter()
                    .any(|path| paths_equivalent(path, target) || is_descendant(path, target))
            })
            .cloned()
            .collect()
    }

    /// Attaches `path` unless an equivalent one is already there. Attaching
    /// twice is a no-op and does not write.
    pub fn add_path_to_tag(&mut self, id: &TagId, path: &str) -> Result<Tag> {
        let normalized = normalize_for_storage(path);
        let mut tags = self.store.load();
        let tag = tags
            .iter_mut()
            .find(|tag| &tag.id == id)
            .ok_or_else(|| TagIndexError::NotFound(id.clone()))?;

        if tag
            .paths
            .iter()
            .any(|existing| paths_equivalent(existing, &normalized))
        {
            log::debug!("Path {normalized} already tagged with {id}");
            return Ok(tag.clone());
        }

        tag.paths.push(normalized);
        let updated = tag.clone();
        self.store.try_save(&tags)?;
        self.publish(TagsChanged::for_tag(ChangeKind::PathAdded, id));
        Ok(updated)
    }

    /// Detaches every path equivalent to `path`, not just the first.
    pub fn remove_path_from_tag(&mut self, id: &TagId, path: &str) -> Result<Tag> {
        let normalized = normalize_for_storage(path);
        let mut tags = self.store.load();
        let tag = tags
            .iter_mut()
            .find(|tag| &tag.id == id)
            .ok_or_else(|| TagIndexError::NotFound(id.clone()))?;

        let before = tag.paths.len();
        tag.paths
            .retain(|existing| !paths_equivalent(existing, &normalized));
        log::info!(
            "Removed {} paths matching {normalized} from tag {id}",
            before - tag.paths.len()
        );

        let updated = tag.clone();
        self.store.try_save(&tags)?;
        self.publish(TagsChanged::for_tag(ChangeKind::PathRemoved, id));
        Ok(updated)
    }

    fn publish(&self, event: TagsChanged) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

/// Storage-normalized paths with later equivalents of earlier entries
/// dropped.
fn dedup_equivalent(paths: &[String]) -> Vec<String> {
    let mut kept: Vec<String> = Vec::with_capacity(paths.len());
    for path in paths {
        let normalized = normalize_for_storage(path);
        if !kept.iter().any(|existing| paths_equivalent(existing, &normalized)) {
            kept.push(normalized);
        }
    }
    kept
}
