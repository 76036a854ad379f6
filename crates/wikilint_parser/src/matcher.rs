//! Tag matching.
//!
//! Matching runs one stack per normalized tag name: an opening tag pushes,
//! a closing tag pops its own name's stack. Because each name keeps its own
//! stack, two pairs of different names that cross (`<a><b>..</a></b>`) both
//! end up matched; the misnested-tag detector relies on that.
//!
//! The value of a matched `nowiki` or `pre` pair is literal text: when such
//! a pair is resolved, every pending opening tag inside it is discarded and
//! any pair matched entirely inside it is unwound.

use std::collections::HashMap;

use wikilint_elements::{names, Span, Tag, TagKind};

/// Tag names whose matched value span escapes all markup inside it.
const LITERAL_TAGS: &[&str] = &[names::NOWIKI, names::PRE];

/// Resolves matching between opening and closing tags in place.
///
/// Returns the literal regions (matched `nowiki`/`pre` value spans) so the
/// caller can exclude other elements found inside them.
pub fn match_tags(tags: &mut [Tag]) -> Vec<Span> {
    let mut stacks: HashMap<String, Vec<usize>> = HashMap::new();
    let mut literal_regions: Vec<Span> = Vec::new();

    for i in 0..tags.len() {
        let offset = tags[i].span.start;
        if literal_regions.iter().any(|r| r.contains(offset)) {
            continue;
        }
        match tags[i].kind {
            TagKind::Full => {}
            TagKind::Open => {
                stacks.entry(tags[i].name.clone()).or_default().push(i);
            }
            TagKind::Close => {
                let Some(stack) = stacks.get_mut(&tags[i].name) else {
                    continue;
                };
                let Some(open) = stack.pop() else {
                    continue;
                };
                let complete = Span::new(tags[open].span.start, tags[i].span.end);
                let value = Span::new(tags[open].span.end, tags[i].span.start);
                tags[open].matching = Some(i);
                tags[open].complete_span = Some(complete);
                tags[open].value_span = Some(value);
                tags[i].matching = Some(open);
                tags[i].complete_span = Some(complete);
                tags[i].value_span = Some(value);

                if LITERAL_TAGS.contains(&tags[i].name.as_str()) {
                    unwind_literal_region(tags, &mut stacks, value, open, i);
                    literal_regions.push(value);
                }
            }
        }
    }
    literal_regions
}

/// Discards every pending opening tag inside a resolved literal region and
/// unwinds pairs matched entirely inside it.
fn unwind_literal_region(
    tags: &mut [Tag],
    stacks: &mut HashMap<String, Vec<usize>>,
    region: Span,
    open: usize,
    close: usize,
) {
    for stack in stacks.values_mut() {
        stack.retain(|&idx| !region.contains(tags[idx].span.start));
    }
    for idx in open + 1..close {
        if region.contains(tags[idx].span.start) && region.contains(tags[idx].complete_span().end - 1)
        {
            tags[idx].matching = None;
            if !tags[idx].is_full() {
                tags[idx].complete_span = None;
            }
            tags[idx].value_span = None;
        }
    }
}
