//! Structural properties of the index.

use pretty_assertions::assert_eq;
use rstest::rstest;
use wikilint_parser::index;

const SAMPLES: &[&str] = &[
    "",
    "plain text with 'one' apostrophe",
    "== Heading ==\nBody with [[link|text]] and ''italic''.",
    "<center><big>big and centered</big></center>",
    "<big><center>crossing</big></center>",
    "<nowiki>unterminated",
    "<!-- <center> commented out --> <center>real</center>",
    "text <ref name=\"a\">cite</ref> more <ref group=b/> end",
    "''''four marks'''' and '''''five'''''",
];

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(4)]
#[case(5)]
#[case(6)]
#[case(7)]
#[case(8)]
fn indexing_twice_is_identical(#[case] sample: usize) {
    let text = SAMPLES[sample];
    let a = index(text);
    let b = index(text);
    assert_eq!(a.tags(), b.tags());
    assert_eq!(a.headings(), b.headings());
    assert_eq!(a.internal_links(), b.internal_links());
    assert_eq!(a.external_links(), b.external_links());
    assert_eq!(a.comments(), b.comments());
    assert_eq!(a.emphasis_runs(), b.emphasis_runs());
}

#[test]
fn matched_pairs_are_symmetric() {
    for text in SAMPLES {
        let idx = index(text);
        for tag in idx.tags() {
            let Some(partner) = idx.matching_tag(tag) else {
                continue;
            };
            let back = idx.matching_tag(partner).expect("matching is symmetric");
            assert_eq!(back.span, tag.span, "in {text:?}");
            assert_eq!(tag.complete_span, partner.complete_span, "in {text:?}");
            assert_eq!(tag.value_span, partner.value_span, "in {text:?}");
        }
    }
}

#[test]
fn complete_span_ends_at_closing_tag_end() {
    let idx = index("<center>a<small>b</small>c</center>");
    for tag in idx.tags() {
        if tag.is_open() && tag.is_complete() {
            let close = idx.matching_tag(tag).unwrap();
            assert_eq!(tag.complete_span().end, close.span.end);
            assert_eq!(tag.complete_span().start, tag.span.start);
        }
    }
}

#[test]
fn same_name_matched_pairs_nest_properly() {
    let idx = index("<div>a<div>b</div>c</div><div>d</div>");
    let divs: Vec<_> = idx
        .tags()
        .iter()
        .filter(|t| t.is_open() && t.is_complete())
        .collect();
    for a in &divs {
        for b in &divs {
            let (sa, sb) = (a.complete_span(), b.complete_span());
            assert!(
                sa.contains_span(&sb) || sb.contains_span(&sa) || !sa.overlaps(&sb),
                "same-name pairs must nest or be disjoint"
            );
        }
    }
}

#[test]
fn offsets_always_lie_inside_the_snapshot() {
    for text in SAMPLES {
        let idx = index(text);
        let len = text.len() as u32;
        for tag in idx.tags() {
            assert!(tag.span.end <= len);
            assert!(tag.complete_span().end <= len);
        }
        for run in idx.emphasis_runs() {
            assert!(run.end() <= len);
            assert!(run.main_area.end <= len);
            assert!(run.main_area.contains_span(&run.span()));
        }
    }
}
