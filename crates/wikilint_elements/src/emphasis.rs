//! Emphasis delimiter runs.
//!
//! Wikitext emphasis is a run of apostrophes: `''` italic, `'''` bold,
//! `'''''` both. A run on its own is meaningless; it pairs with a partner
//! run inside its main area. Uneven runs are the raw material of the
//! unbalanced-emphasis detectors.

use serde::{Deserialize, Serialize};

use crate::Span;

/// A single delimiter run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmphasisRun {
    /// Byte offset of the first apostrophe.
    pub offset: u32,
    /// Raw run length as written.
    pub length: u32,
    /// Length after normalization: a run of 4 is treated as 3 plus a
    /// literal apostrophe, runs of 6 or more are capped at 5.
    pub effective_length: u32,
    /// Pairing weight of the run: 1 for italic or bold, 2 for the combined
    /// 5-mark form. Balance checks sum weights, an odd total means an
    /// unterminated run.
    pub weight: u32,
    /// The minimal enclosing region over which this run pairs with a
    /// partner: its line, narrowed by the innermost enclosing isolating
    /// tag value, link text or heading content.
    pub main_area: Span,
}

impl EmphasisRun {
    /// Creates a run, applying length normalization.
    pub fn new(offset: u32, length: u32, main_area: Span) -> Self {
        let (weight, effective_length) = normalize_length(length);
        Self {
            offset,
            length,
            effective_length,
            weight,
            main_area,
        }
    }

    /// Span of the raw run.
    #[inline]
    pub const fn span(&self) -> Span {
        Span::new(self.offset, self.offset + self.length)
    }

    /// End offset of the raw run.
    #[inline]
    pub const fn end(&self) -> u32 {
        self.offset + self.length
    }
}

/// Normalizes a raw run length into `(weight, effective_length)`.
///
/// Four marks count as one 3-mark run with a literal apostrophe left over;
/// six or more count twice with the length capped at 5.
pub const fn normalize_length(length: u32) -> (u32, u32) {
    match length {
        0 | 1 => (0, length),
        2 | 3 => (1, length),
        4 => (1, 3),
        5 => (2, 5),
        _ => (2, 5),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2, 1, 2)]
    #[case(3, 1, 3)]
    #[case(4, 1, 3)]
    #[case(5, 2, 5)]
    #[case(6, 2, 5)]
    #[case(9, 2, 5)]
    fn normalization(#[case] raw: u32, #[case] weight: u32, #[case] effective: u32) {
        assert_eq!(normalize_length(raw), (weight, effective));
    }

    #[test]
    fn single_apostrophe_has_no_weight() {
        assert_eq!(normalize_length(1), (0, 1));
    }

    #[test]
    fn run_span() {
        let run = EmphasisRun::new(10, 3, Span::new(0, 40));
        assert_eq!(run.span(), Span::new(10, 13));
        assert_eq!(run.end(), 13);
        assert_eq!(run.weight, 1);
    }
}
