//! Nesting policy for HTML formatting tags.
//!
//! The misnested-tag detector consults this table to decide, for a pair of
//! interleaved tags, whether a repair may keep the current outer/inner
//! order, must invert it, or may do either.

use std::sync::OnceLock;

use wikilint_elements::names;

/// How a crossing pair of tags may be repaired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// The current outer tag must stay outside.
    MustKeep,
    /// Either nesting order is acceptable.
    BothPossible,
    /// The inner tag must become the outer one.
    MustInvert,
}

impl Order {
    pub fn can_keep_order(self) -> bool {
        matches!(self, Order::MustKeep | Order::BothPossible)
    }

    pub fn can_invert_order(self) -> bool {
        matches!(self, Order::MustInvert | Order::BothPossible)
    }
}

/// Where emphasis may sit relative to a formatting tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormattingPolicy {
    /// Emphasis belongs inside the tag.
    Inside,
    /// Emphasis belongs outside the tag.
    Outside,
    /// Either placement is acceptable.
    Anywhere,
}

impl FormattingPolicy {
    pub fn can_be_inside(self) -> bool {
        matches!(self, FormattingPolicy::Inside | FormattingPolicy::Anywhere)
    }

    pub fn can_be_outside(self) -> bool {
        matches!(self, FormattingPolicy::Outside | FormattingPolicy::Anywhere)
    }
}

/// Repair policy for one inner tag name under a given outer tag.
#[derive(Debug, Clone, Copy)]
pub struct TagPairPolicy {
    pub order: Order,
    pub automatic: bool,
}

/// Policies for one outer tag name.
#[derive(Debug)]
pub struct PolicyRow {
    pub outer: &'static str,
    pub formatting: FormattingPolicy,
    inner: Vec<(&'static str, TagPairPolicy)>,
}

impl PolicyRow {
    /// Policy for a given inner tag name, if the pair is covered.
    pub fn pair(&self, inner: &str) -> Option<TagPairPolicy> {
        self.inner
            .iter()
            .find(|(name, _)| *name == inner)
            .map(|(_, policy)| *policy)
    }
}

/// The full table, in registry order.
pub struct NestingPolicy {
    rows: Vec<PolicyRow>,
}

impl NestingPolicy {
    pub fn rows(&self) -> &[PolicyRow] {
        &self.rows
    }

    pub fn row(&self, outer: &str) -> Option<&PolicyRow> {
        self.rows.iter().find(|row| row.outer == outer)
    }
}

// Inline formatting tags invert out of block containers; block containers
// keep inline tags inside and tolerate either order between themselves.
const INLINE: [&str; 8] = [
    names::BIG,
    names::FONT,
    names::S,
    names::SMALL,
    names::SPAN,
    names::SUB,
    names::SUP,
    names::U,
];
const BLOCK: [&str; 2] = [names::CENTER, names::DIV];

fn build_table() -> NestingPolicy {
    let pair = |order| TagPairPolicy {
        order,
        automatic: true,
    };
    let mut rows = Vec::new();
    for outer in INLINE {
        let mut inner = Vec::new();
        for name in BLOCK {
            inner.push((name, pair(Order::MustInvert)));
        }
        for name in INLINE {
            if name != outer {
                inner.push((name, pair(Order::BothPossible)));
            }
        }
        rows.push(PolicyRow {
            outer,
            formatting: FormattingPolicy::Anywhere,
            inner,
        });
    }
    for outer in BLOCK {
        let mut inner = Vec::new();
        for name in INLINE {
            inner.push((name, pair(Order::MustKeep)));
        }
        for name in BLOCK {
            if name != outer {
                inner.push((name, pair(Order::BothPossible)));
            }
        }
        rows.push(PolicyRow {
            outer,
            formatting: FormattingPolicy::Inside,
            inner,
        });
    }
    NestingPolicy { rows }
}

/// The shared policy table.
pub fn nesting_policy() -> &'static NestingPolicy {
    static TABLE: OnceLock<NestingPolicy> = OnceLock::new();
    TABLE.get_or_init(build_table)
}
