//! Small helpers shared across detectors.

use wikilint_elements::Span;
use wikilint_parser::StructuralIndex;

use crate::result::{DefectResult, Replacement};

/// Returns whether every byte in `[begin, end)` is a space or newline.
///
/// Empty ranges count as whitespace. Out-of-bounds ranges do not.
pub fn is_gap_whitespace(text: &str, begin: u32, end: u32) -> bool {
    let (begin, end) = (begin as usize, end as usize);
    if begin > end || end > text.len() {
        return false;
    }
    text.as_bytes()[begin..end]
        .iter()
        .all(|&b| b == b' ' || b == b'\n')
}

/// Returns whether every byte in `[begin, end)` is a plain space.
pub fn is_gap_spaces(text: &str, begin: u32, end: u32) -> bool {
    let (begin, end) = (begin as usize, end as usize);
    if begin > end || end > text.len() {
        return false;
    }
    text.as_bytes()[begin..end].iter().all(|&b| b == b' ')
}

/// Reports every occurrence of a literal needle as a defect offering the
/// given replacement texts.
///
/// Occurrences inside comments or literal regions are skipped. Returns
/// whether anything was found; with `sink == None` the scan stops at the
/// first occurrence.
pub fn simple_text_search(
    index: &StructuralIndex<'_>,
    detector_id: &str,
    needle: &str,
    replacements: &[Replacement],
    mut sink: Option<&mut Vec<DefectResult>>,
) -> bool {
    if needle.is_empty() {
        return false;
    }
    let text = index.contents();
    let mut found = false;
    let mut from = 0usize;
    while let Some(at) = text[from..].find(needle) {
        let begin = (from + at) as u32;
        let end = begin + needle.len() as u32;
        from = from + at + needle.len();
        if index.comment_at(begin).is_some() || index.in_literal_region(begin) {
            continue;
        }
        found = true;
        match sink.as_deref_mut() {
            Some(results) => {
                let mut result = DefectResult::new(detector_id, Span::new(begin, end));
                for replacement in replacements {
                    result.replacements.push(replacement.clone());
                }
                results.push(result);
            }
            None => return true,
        }
    }
    found
}
