//! # wikilint_elements
//!
//! Positioned structural element types for the wikilint engine.
//!
//! Every element carries 0-based byte offsets into the text snapshot it was
//! discovered in. Elements are plain values held in append-only vectors by
//! the structural index; relationships between elements (tag matching) are
//! integer indices into those vectors rather than references, so there are
//! no cycles and the whole model serializes cleanly for testing.

mod element;
mod emphasis;
mod span;
mod tag;

pub use element::{Comment, ExternalLink, Heading, InternalLink};
pub use emphasis::{normalize_length, EmphasisRun};
pub use span::Span;
pub use tag::{names, normalize_name, Tag, TagKind, TagParameter};
