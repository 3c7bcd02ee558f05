//! # Tagdex Index
//!
//! The operation surface over the tag store: create, update and delete tags,
//! attach and detach paths, and find every tag covering a path.
//!
//! ```text
//! caller ──> TagIndex ──> TagStore   (load snapshot, save whole collection)
//!               │
//!               └──────> path-match  (equivalence, containment)
//! ```
//!
//! Every mutation follows load → modify a snapshot → save. [`TagIndex`] takes
//! `&mut self`, so a host serving concurrent requests must hold it behind a
//! single lock for the whole call.
//!
//! ## Example
//!
//! ```no_run
//! use tagdex_index::TagIndex;
//! use tagdex_store::{TagStore, TargetType};
//!
//! fn main() -> Result<(), tagdex_index::TagIndexError> {
//!     let mut index = TagIndex::new(TagStore::open("tags.json"));
//!     let tag = index.create_tag("Work", "#3366FF", TargetType::Folder)?;
//!     index.add_path_to_tag(&tag.id, "/home/me/project")?;
//!
//!     let hits = index.get_tags_for_path("/home/me/project/src/main.rs");
//!     assert_eq!(hits.len(), 1);
//!     Ok(())
//! }
//! ```

mod error;
mod events;
mod service;

pub use error::{Result, TagIndexError};
pub use events::{ChangeKind, TagsChanged};
pub use service::TagIndex;

pub use tagdex_store::{Tag, TagId, TagStore, TargetType, DEFAULT_TAG_COLOR};
