//! Tag elements.
//!
//! A tag is any `<name ...>`, `</name>` or `<name ... />` construct found in
//! the snapshot. Matching between opening and closing tags is represented as
//! a pair of indices into the index's tag vector, never as references, so
//! element collections stay append-only and trivially serializable.

use serde::{Deserialize, Serialize};

use crate::Span;

/// Well-known tag names, normalized to lowercase.
pub mod names {
    pub const BIG: &str = "big";
    pub const CENTER: &str = "center";
    pub const CODE: &str = "code";
    pub const DIV: &str = "div";
    pub const FONT: &str = "font";
    pub const GALLERY: &str = "gallery";
    pub const INCLUDEONLY: &str = "includeonly";
    pub const NOINCLUDE: &str = "noinclude";
    pub const NOWIKI: &str = "nowiki";
    pub const PRE: &str = "pre";
    pub const REF: &str = "ref";
    pub const S: &str = "s";
    pub const SCORE: &str = "score";
    pub const SMALL: &str = "small";
    pub const SPAN: &str = "span";
    pub const SUB: &str = "sub";
    pub const SUP: &str = "sup";
    pub const U: &str = "u";
}

/// Normalizes a tag name for comparison (ASCII lowercase).
pub fn normalize_name(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// The syntactic kind of a tag occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    /// An opening tag: `<name ...>`.
    Open,
    /// A closing tag: `</name>`.
    Close,
    /// A self-closing (void) tag: `<name ... />`.
    Full,
}

/// A `name="value"` parameter inside an opening or full tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagParameter {
    /// Parameter name as written (trimmed).
    pub name: String,
    /// Parameter value with surrounding quotes removed, if a value was given.
    pub value: Option<String>,
}

/// A tag element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Normalized (lowercase) tag name.
    pub name: String,
    /// Open, close or full.
    pub kind: TagKind,
    /// Span of the tag markup itself (`<center ...>` or `</center>`).
    pub span: Span,
    /// Parameters, in document order. Empty for closing tags.
    pub parameters: Vec<TagParameter>,
    /// Index of the matching tag in the owning index's tag vector.
    /// `None` until matching succeeds; matched tags reference each other
    /// symmetrically.
    pub matching: Option<usize>,
    /// Span from the opening `<` to the closing tag's `>`, inclusive.
    /// Defined for full tags (equal to `span`) and for matched pairs.
    pub complete_span: Option<Span>,
    /// Span of the content between a matched open/close pair.
    pub value_span: Option<Span>,
}

impl Tag {
    /// Creates an unmatched tag.
    pub fn new(name: impl Into<String>, kind: TagKind, span: Span) -> Self {
        let complete_span = match kind {
            TagKind::Full => Some(span),
            _ => None,
        };
        Self {
            name: normalize_name(&name.into()),
            kind,
            span,
            parameters: Vec::new(),
            matching: None,
            complete_span,
            value_span: None,
        }
    }

    /// Adds a parameter (builder style).
    pub fn with_parameter(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        self.parameters.push(TagParameter {
            name: name.into(),
            value,
        });
        self
    }

    /// Returns true for opening tags.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.kind == TagKind::Open
    }

    /// Returns true for closing tags.
    #[inline]
    pub fn is_close(&self) -> bool {
        self.kind == TagKind::Close
    }

    /// Returns true for self-closing tags.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.kind == TagKind::Full
    }

    /// Returns true if this tag needs no partner (full) or has one.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.is_full() || self.matching.is_some()
    }

    /// Returns the complete span (open tag through matching close tag).
    /// Falls back to the tag's own span when unmatched, so the result is
    /// always a valid region to report on.
    #[inline]
    pub fn complete_span(&self) -> Span {
        self.complete_span.unwrap_or(self.span)
    }

    /// Looks up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&TagParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn name_is_normalized() {
        let tag = Tag::new("NoWiki", TagKind::Open, Span::new(0, 8));
        assert_eq!(tag.name, "nowiki");
    }

    #[test]
    fn full_tag_is_complete() {
        let tag = Tag::new("ref", TagKind::Full, Span::new(0, 6));
        assert!(tag.is_full());
        assert!(tag.is_complete());
        assert_eq!(tag.complete_span(), Span::new(0, 6));
    }

    #[test]
    fn open_tag_incomplete_until_matched() {
        let mut tag = Tag::new("center", TagKind::Open, Span::new(0, 8));
        assert!(!tag.is_complete());
        assert_eq!(tag.complete_span(), tag.span);

        tag.matching = Some(3);
        tag.complete_span = Some(Span::new(0, 25));
        tag.value_span = Some(Span::new(8, 16));
        assert!(tag.is_complete());
        assert_eq!(tag.complete_span(), Span::new(0, 25));
    }

    #[test]
    fn parameter_lookup() {
        let tag = Tag::new("div", TagKind::Open, Span::new(0, 16))
            .with_parameter("id", Some("toc".to_string()))
            .with_parameter("style", None);
        assert_eq!(tag.parameter("id").unwrap().value.as_deref(), Some("toc"));
        assert!(tag.parameter("style").unwrap().value.is_none());
        assert!(tag.parameter("class").is_none());
    }
}
