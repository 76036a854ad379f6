//! # wikilint_parser
//!
//! The structural indexer: turns a raw wiki markup snapshot into an
//! immutable, queryable set of positioned elements (tags, headings, links,
//! comments, emphasis runs) with tag matching resolved.
//!
//! Indexing is pure, deterministic and total: malformed markup simply
//! fails to produce elements instead of failing the build. The resulting
//! [`StructuralIndex`] is read-only; detectors running against it from
//! multiple threads need no synchronization.
//!
//! ## Example
//!
//! ```rust
//! use wikilint_parser::index;
//!
//! let idx = index("<center>''centered''</center>");
//! assert_eq!(idx.tags().len(), 2);
//! assert!(idx.tags()[0].is_complete());
//! ```

mod index;
mod matcher;
mod scanner;

pub use index::StructuralIndex;

/// Indexes a text snapshot. Shorthand for [`StructuralIndex::build`].
pub fn index(text: &str) -> StructuralIndex<'_> {
    StructuralIndex::build(text)
}
