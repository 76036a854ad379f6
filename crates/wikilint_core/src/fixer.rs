//! Applies automatic replacements to a snapshot.
//!
//! Selection is first-wins in ascending scan order: a fix whose span
//! starts inside an already-selected span is dropped. The surviving fixes
//! are applied back-to-front so earlier offsets stay valid.

use tracing::debug;
use wikilint_elements::Span;

use crate::result::DefectResult;

/// Result of one fixing pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    /// The rewritten snapshot.
    pub text: String,
    /// Number of fixes applied.
    pub applied: usize,
    /// Number of automatic fixes dropped because they overlapped an
    /// earlier one.
    pub skipped: usize,
}

impl FixOutcome {
    fn unchanged(text: &str) -> Self {
        Self {
            text: text.to_string(),
            applied: 0,
            skipped: 0,
        }
    }
}

/// Applies the automatic candidate of each result to `text`.
///
/// Results without an automatic candidate are ignored.
pub fn apply_automatic_fixes(text: &str, results: &[DefectResult]) -> FixOutcome {
    let mut fixes: Vec<(Span, &str)> = results
        .iter()
        .filter_map(|r| {
            r.automatic_replacement()
                .map(|rep| (r.span, rep.text.as_str()))
        })
        .collect();
    if fixes.is_empty() {
        return FixOutcome::unchanged(text);
    }
    fixes.sort_by_key(|(span, _)| (span.start, span.end));

    let mut selected: Vec<(Span, &str)> = Vec::with_capacity(fixes.len());
    let mut last_end = 0u32;
    let mut skipped = 0usize;
    for (span, replacement) in fixes {
        if !selected.is_empty() && span.start < last_end {
            debug!(start = span.start, end = span.end, "overlapping fix skipped");
            skipped += 1;
            continue;
        }
        last_end = span.end;
        selected.push((span, replacement));
    }

    let mut fixed = text.to_string();
    for (span, replacement) in selected.iter().rev() {
        fixed.replace_range(span.start as usize..span.end as usize, replacement);
    }
    let applied = selected.len();
    debug!(applied, skipped, "fixing pass finished");
    FixOutcome {
        text: fixed,
        applied,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fix(span: Span, text: &str) -> DefectResult {
        DefectResult::new("t", span).with_replacement(text, "Fix", true)
    }

    fn manual(span: Span) -> DefectResult {
        DefectResult::new("t", span).with_replacement("x", "Fix", false)
    }

    #[test]
    fn applies_in_one_pass() {
        let outcome = apply_automatic_fixes(
            "aaa bbb ccc",
            &[fix(Span::new(0, 3), "A"), fix(Span::new(8, 11), "C")],
        );
        assert_eq!(outcome.text, "A bbb C");
        assert_eq!(outcome.applied, 2);
        assert_eq!(outcome.skipped, 0);
    }

    #[test]
    fn first_wins_on_overlap() {
        let outcome = apply_automatic_fixes(
            "abcdef",
            &[fix(Span::new(0, 4), "X"), fix(Span::new(2, 6), "Y")],
        );
        assert_eq!(outcome.text, "Xef");
        assert_eq!(outcome.applied, 1);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn touching_spans_both_apply() {
        let outcome = apply_automatic_fixes(
            "abcd",
            &[fix(Span::new(0, 2), "X"), fix(Span::new(2, 4), "Y")],
        );
        assert_eq!(outcome.text, "XY");
        assert_eq!(outcome.applied, 2);
    }

    #[test]
    fn manual_results_are_not_applied() {
        let outcome = apply_automatic_fixes("abc", &[manual(Span::new(0, 3))]);
        assert_eq!(outcome.text, "abc");
        assert_eq!(outcome.applied, 0);
    }

    #[test]
    fn unsorted_input_is_handled() {
        let outcome = apply_automatic_fixes(
            "abcdef",
            &[fix(Span::new(4, 6), "Z"), fix(Span::new(0, 2), "X")],
        );
        assert_eq!(outcome.text, "XcdZ");
        assert_eq!(outcome.applied, 2);
    }

    #[test]
    fn deletion_fix() {
        let outcome = apply_automatic_fixes("<nowiki>foo", &[fix(Span::new(0, 8), "")]);
        assert_eq!(outcome.text, "foo");
    }
}
