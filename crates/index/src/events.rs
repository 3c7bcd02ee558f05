use serde::Serialize;
use tagdex_store::TagId;

/// Published after every write that reached the tags file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagsChanged {
    pub kind: ChangeKind,
    #[serde(rename = "tagId", skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<TagId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeKind {
    TagAdded,
    TagUpdated,
    TagRemoved,
    PathAdded,
    PathRemoved,
    CollectionSaved,
}

impl TagsChanged {
    pub(crate) fn for_tag(kind: ChangeKind, id: &TagId) -> Self {
        Self {
            kind,
            tag_id: Some(id.clone()),
        }
    }

    pub(crate) const fn collection_saved() -> Self {
        Self {
            kind: ChangeKind::CollectionSaved,
            tag_id: None,
        }
    }
}
