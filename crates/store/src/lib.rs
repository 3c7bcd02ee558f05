//! # Tagdex Store
//!
//! Durable storage for the tag collection.
//!
//! ## Lifecycle
//!
//! ```text
//! TagStore::open(path)            (Uninitialized, disk untouched)
//!     │
//!     ├──> first load()/tags()    read tags.json
//!     │      ├─> missing          create `[]`
//!     │      └─> corrupt          log, rewrite `[]`, start empty
//!     │
//!     ├──> save(tags)             normalize paths, write whole file,
//!     │                           then replace the cache
//!     │
//!     └──> refresh_cache()        back to Uninitialized, re-read
//! ```
//!
//! The file is a pretty-printed JSON array of tag records. There is no
//! schema version: anything that does not parse as a list of tags is treated
//! as corrupt and reset.
//!
//! ## Example
//!
//! ```no_run
//! use tagdex_store::{Tag, TagStore, TargetType};
//!
//! fn main() -> tagdex_store::Result<()> {
//!     let mut store = TagStore::at_default_location()?;
//!     let mut tags = store.load();
//!     tags.push(Tag::new("Work", "#3366FF", TargetType::Folder));
//!     store.try_save(&tags)?;
//!     Ok(())
//! }
//! ```

mod error;
mod lock;
mod paths;
mod store;
mod types;

pub use error::{Result, StoreError};
pub use paths::{
    default_tags_file_path, lock_path_for_tags_file, APP_DIR_NAME, TAGS_FILE_ENV,
    TAGS_FILE_NAME,
};
pub use store::TagStore;
pub use types::{Tag, TagId, TargetType, DEFAULT_TAG_COLOR};
