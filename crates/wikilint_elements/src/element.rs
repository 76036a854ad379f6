//! Headings, links and comments.

use serde::{Deserialize, Serialize};

use crate::Span;

/// A heading line (`== Title ==`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Span of the whole heading line (markers included, newline excluded).
    pub span: Span,
    /// Nesting level: number of leading marker characters, capped at 6.
    pub level: u8,
    /// Number of trailing marker characters. May differ from `level` in
    /// malformed headings.
    pub trailing_markers: u8,
    /// Span of the heading text with markers and surrounding blanks removed.
    pub content: Span,
}

impl Heading {
    /// Creates a new heading.
    pub fn new(span: Span, level: u8, trailing_markers: u8, content: Span) -> Self {
        Self {
            span,
            level,
            trailing_markers,
            content,
        }
    }
}

/// An internal link (`[[target|display]]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalLink {
    /// Span of the whole link including the brackets.
    pub span: Span,
    /// Span of the link target.
    pub target: Span,
    /// Span of the display text, when a `|` separator is present.
    pub text: Option<Span>,
}

impl InternalLink {
    /// Creates a new internal link.
    pub fn new(span: Span, target: Span, text: Option<Span>) -> Self {
        Self { span, target, text }
    }
}

/// An external link (`[http://example.org display]` or a bare URL).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLink {
    /// Span of the whole link, brackets included when present.
    pub span: Span,
    /// Span of the URL.
    pub target: Span,
    /// Span of the display text, for bracketed links with one.
    pub text: Option<Span>,
}

impl ExternalLink {
    /// Creates a new external link.
    pub fn new(span: Span, target: Span, text: Option<Span>) -> Self {
        Self { span, target, text }
    }
}

/// A non-rendering comment (`<!-- ... -->`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Span from `<!--` through `-->` (or end of text when unterminated).
    pub span: Span,
    /// True when the closing `-->` was found.
    pub terminated: bool,
}

impl Comment {
    /// Creates a new comment.
    pub fn new(span: Span, terminated: bool) -> Self {
        Self { span, terminated }
    }
}
