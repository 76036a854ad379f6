//! Misnested formatting tags.
//!
//! Three shapes of defect:
//! - two matched pairs crossing each other (`<big><center>..</big>..`),
//!   repaired by keeping or inverting the nesting per the policy table;
//! - a tag opened inside an internal link's text and closed after the
//!   link, repaired by moving the closing tag before the `]]`;
//! - an emphasis run inside a tag or link whose partner run sits outside,
//!   repaired by moving one of the runs across the boundary.

use wikilint_elements::{InternalLink, Span, Tag};
use wikilint_parser::StructuralIndex;

use crate::detector::{Detector, DetectorContext};
use crate::detectors::Reporter;
use crate::policy::{nesting_policy, FormattingPolicy, PolicyRow};
use crate::result::DefectResult;
use crate::util::{is_gap_spaces, is_gap_whitespace};

pub struct MisnestedTag;

impl Detector for MisnestedTag {
    fn id(&self) -> &'static str {
        "misnested-tag"
    }

    fn description(&self) -> &'static str {
        "Tags or emphasis closed outside their enclosing construct"
    }

    fn analyze(
        &self,
        index: &StructuralIndex<'_>,
        ctx: &DetectorContext<'_>,
        sink: Option<&mut Vec<DefectResult>>,
        only_automatic: bool,
    ) -> bool {
        let mut reporter = Reporter::new(sink, only_automatic);

        // Crossing tag pairs.
        for row in nesting_policy().rows() {
            for outer in index.complete_tags_named(row.outer) {
                analyze_outer_tag(index, row, outer, &mut reporter);
                if reporter.satisfied() {
                    return true;
                }
            }
        }

        // Tags escaping an internal link.
        for link in index.internal_links() {
            analyze_link(index, link, &mut reporter);
            if reporter.satisfied() {
                return true;
            }
        }

        // Emphasis escaping a tag or a link.
        for row in nesting_policy().rows() {
            for outer in index.complete_tags_named(row.outer) {
                if let (Some(complete), Some(value)) = (outer.complete_span, outer.value_span) {
                    analyze_emphasis_area(index, ctx, complete, value, row.formatting, &mut reporter);
                    if reporter.satisfied() {
                        return true;
                    }
                }
            }
        }
        for link in index.internal_links() {
            if let Some(text) = link.text {
                analyze_emphasis_area(
                    index,
                    ctx,
                    link.span,
                    text,
                    FormattingPolicy::Anywhere,
                    &mut reporter,
                );
                if reporter.satisfied() {
                    return true;
                }
            }
        }

        reporter.found()
    }
}

/// Walks one outer tag's value looking for a pair that closes after the
/// outer tag does. At most one defect per outer tag.
fn analyze_outer_tag(
    index: &StructuralIndex<'_>,
    row: &PolicyRow,
    outer: &Tag,
    reporter: &mut Reporter<'_>,
) {
    let contents = index.contents();
    let bytes = contents.as_bytes();
    let Some(value) = outer.value_span else { return };
    let outer_complete = outer.complete_span();

    let mut at = value.start;
    while at < value.end && matches!(bytes[at as usize], b' ' | b'\n') {
        at += 1;
    }
    while at < value.end {
        let inner = (bytes[at as usize] == b'<').then(|| index.tag_at(at)).flatten();
        let Some(inner) = inner else {
            at += 1;
            continue;
        };
        if inner.is_complete() && inner.complete_span().end > outer_complete.end {
            report_crossing(index, row, outer, inner, reporter);
            return;
        }
        at = inner.span.end;
    }
}

fn report_crossing(
    index: &StructuralIndex<'_>,
    row: &PolicyRow,
    outer: &Tag,
    inner: &Tag,
    reporter: &mut Reporter<'_>,
) {
    let contents = index.contents();
    let value = outer.value_span.unwrap_or(outer.span);
    let outer_complete = outer.complete_span();
    let inner_complete = inner.complete_span();

    if let (Some(pair), Some(inner_value)) = (row.pair(&inner.name), inner.value_span) {
        let slice = |begin: u32, end: u32| &contents[begin as usize..end as usize];

        // Move the outer closing tag past the inner one.
        if pair.order.can_keep_order()
            && is_gap_whitespace(contents, outer_complete.end, inner_value.end)
        {
            let text = format!(
                "{}{}{}",
                slice(inner_complete.start, value.end),
                slice(outer_complete.end, inner_complete.end),
                slice(value.end, outer_complete.end),
            );
            let description = format!(
                "{}...{}{}",
                slice(inner_complete.start, inner_value.start),
                slice(inner_value.end, inner_complete.end),
                slice(value.end, outer_complete.end),
            );
            reporter.report(
                DefectResult::new("misnested-tag", inner_complete).with_replacement(
                    text,
                    description,
                    pair.automatic,
                ),
            );
            return;
        }

        // Move the inner opening tag before the outer one.
        if pair.order.can_invert_order()
            && is_gap_whitespace(contents, value.start, inner_complete.start)
        {
            let text = format!(
                "{}{}{}",
                slice(inner_complete.start, inner_value.start),
                slice(outer_complete.start, inner_complete.start),
                slice(inner_value.start, outer_complete.end),
            );
            let description = format!(
                "{}{}...{}",
                slice(inner_complete.start, inner_value.start),
                slice(outer_complete.start, value.start),
                slice(value.end, outer_complete.end),
            );
            reporter.report(
                DefectResult::new("misnested-tag", outer_complete).with_replacement(
                    text,
                    description,
                    pair.automatic,
                ),
            );
            return;
        }
    }

    // No policy-backed rewrite applies.
    reporter.report(DefectResult::new("misnested-tag", inner.span));
}

/// Looks for a tag opened inside the link text and closed after the link.
fn analyze_link(
    index: &StructuralIndex<'_>,
    link: &InternalLink,
    reporter: &mut Reporter<'_>,
) {
    let Some(text) = link.text else { return };
    let contents = index.contents();
    let bytes = contents.as_bytes();
    let text_end = link.span.end - 2;

    let mut at = text_end;
    while at > text.start {
        if bytes[(at - 1) as usize] != b'>' {
            at -= 1;
            continue;
        }
        let Some(tag) = index.tag_at(at - 1) else {
            at -= 1;
            continue;
        };
        if tag.span.end == at
            && tag.is_open()
            && tag.is_complete()
            && tag.complete_span().end > text_end
        {
            let complete = tag.complete_span();
            let Some(value) = tag.value_span else { return };
            if !is_gap_whitespace(contents, link.span.end, value.end) {
                // Real content between the link and the closing tag:
                // moving the tag would change what it covers.
                reporter.report(DefectResult::new("misnested-tag", tag.span));
                return;
            }
            let slice = |begin: u32, end: u32| &contents[begin as usize..end as usize];
            let replacement = format!(
                "{}{}{}",
                slice(complete.start, text_end),
                slice(value.end, complete.end),
                slice(text_end, value.end),
            );
            let description = format!(
                "{}...{}{}",
                slice(complete.start, value.start),
                slice(value.end, complete.end),
                slice(text_end, value.end),
            );
            reporter.report(
                DefectResult::new("misnested-tag", complete).with_replacement(
                    replacement,
                    description,
                    true,
                ),
            );
            return;
        }
        at = tag.span.start;
    }
}

/// Looks for a lone emphasis run inside `internal` whose partner lies
/// outside `external`, and moves one of them across the boundary.
fn analyze_emphasis_area(
    index: &StructuralIndex<'_>,
    ctx: &DetectorContext<'_>,
    external: Span,
    internal: Span,
    formatting: FormattingPolicy,
    reporter: &mut Reporter<'_>,
) {
    let contents = index.contents();
    let inside = index.emphasis_runs_in(internal.start, internal.end);
    if inside.len() != 1 {
        return;
    }
    let element = inside[0];
    let area = element.main_area;
    if area.start == 0 && area.end as usize == contents.len() {
        return;
    }
    let area_runs = index.emphasis_runs_in(area.start, area.end);
    if area_runs.len() != 2 {
        return;
    }

    let elem_begin = element.offset;
    let elem_end = element.end();
    let at_beginning = is_gap_spaces(contents, internal.start, elem_begin);
    let at_end = is_gap_spaces(contents, elem_end, internal.end);
    if !at_beginning && !at_end {
        return;
    }

    let other = if area_runs[0].offset == element.offset {
        area_runs[1]
    } else {
        area_runs[0]
    };
    if other.length != element.length {
        return;
    }
    let other_begin = other.offset;
    let other_end = other.end();
    if other_begin >= external.start && other_end <= external.end {
        return;
    }
    let other_after = other_begin > internal.end;
    let other_close = if other_after {
        is_gap_spaces(contents, external.end, other_begin)
    } else {
        is_gap_spaces(contents, other_end, external.start)
    };

    let slice = |begin: u32, end: u32| &contents[begin as usize..end as usize];
    let description = ctx.messages.message("move-emphasis", &[]);
    let mut emit = |span: Span, text: String| {
        reporter.report(
            DefectResult::new("misnested-tag", span).with_replacement(text, &description, true),
        );
    };

    if at_beginning {
        if other_after {
            // Pull the partner run inside, just before the closing markup.
            if formatting.can_be_inside() && other_close {
                let text = format!(
                    "{}{}",
                    slice(other_begin, other_end),
                    slice(internal.end, other_begin)
                );
                emit(Span::new(internal.end, other_end), text);
                return;
            }
            // Push this run outside, before the opening markup.
            if formatting.can_be_outside() {
                let text = format!(
                    "{}{}",
                    slice(elem_begin, elem_end),
                    slice(external.start, elem_begin)
                );
                emit(Span::new(external.start, elem_end), text);
                return;
            }
        } else if !other_close {
            let text = format!(
                "{}{}",
                slice(elem_begin, elem_end),
                slice(external.start, elem_begin)
            );
            emit(Span::new(external.start, elem_end), text);
            return;
        }
    }

    if at_end {
        if !other_after {
            // Push this run outside, after the closing markup.
            if formatting.can_be_outside() && !other_close {
                let text = format!(
                    "{}{}",
                    slice(elem_end, external.end),
                    slice(elem_begin, elem_end)
                );
                emit(Span::new(elem_begin, external.end), text);
                return;
            }
            // Pull the partner run inside, just after the opening markup.
            if formatting.can_be_inside() && other_close {
                let text = format!(
                    "{}{}",
                    slice(other_end, internal.start),
                    slice(other_begin, other_end)
                );
                emit(Span::new(other_begin, internal.start), text);
            }
        } else if !other_close {
            let text = format!(
                "{}{}",
                slice(elem_end, external.end),
                slice(elem_begin, elem_end)
            );
            emit(Span::new(elem_begin, external.end), text);
        }
    }
}
