//! # Tagdex Path Match
//!
//! Decides whether two path strings denote the same tagged entry, without
//! touching the filesystem.
//!
//! Paths arrive from different hosts in different shapes: `C:\Users\me\a.txt`,
//! `/users/me/a.txt`, `c:/users/me/`, `users//me`. The matcher folds separator
//! style, letter case, a leading drive prefix and a trailing separator, then
//! applies a few heuristics:
//!
//! ```text
//! normalize (\ -> /, // -> /, lowercase)
//!     │
//!     ├──> same file name containing '.'        => equivalent
//!     │
//!     ├──> same last dir segment (no '.')
//!     │      ├─> one path is a substring of the other  => equivalent
//!     │      └─> both multi-segment, share a segment   => equivalent
//!     │
//!     └──> exact match (normalized or cleaned)   => equivalent
//! ```
//!
//! The heuristics are deliberately loose: two unrelated files with the same
//! name, or two directories with the same leaf under different parents, are
//! reported as equivalent.
//!
//! ## Example
//!
//! ```
//! use tagdex_path_match::{is_descendant, paths_equivalent};
//!
//! assert!(paths_equivalent(r"C:\Users\bob\doc.txt", "/users/bob/doc.txt"));
//! assert!(!paths_equivalent("a/b/report.csv", "a/b/report.txt"));
//! assert!(is_descendant("/home/u/project", "/home/u/project/src/main.rs"));
//! ```

mod equivalence;
mod normalize;

pub use equivalence::{is_descendant, paths_equivalent, Equivalence};
pub use normalize::{normalize_for_compare, normalize_for_storage};
