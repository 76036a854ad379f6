//! End-to-end pipeline tests across crates: index a snapshot, detect
//! defects, apply automatic fixes, then re-index the rewritten text and
//! confirm it comes out clean.

use pretty_assertions::assert_eq;
use rstest::rstest;
use wikilint_core::{Engine, MapConfig, Span};

#[test]
fn full_pipeline_detects_fixes_and_converges() {
    let text = "== ''History ==\n<big><center>Intro</big></center>\n<nowiki>rest\n";
    let engine = Engine::new();

    let results = engine.detect(text, &[], false).unwrap();
    let found: Vec<_> = results
        .iter()
        .map(|r| (r.detector_id.as_str(), r.span))
        .collect();
    assert_eq!(
        found,
        vec![
            ("heading-emphasis", Span::new(3, 12)),
            ("misnested-tag", Span::new(16, 40)),
            ("unclosed-tag", Span::new(50, 58)),
        ]
    );

    let outcome = engine.fix_to_convergence(text, &[], 10).unwrap();
    assert_eq!(
        outcome.text,
        "== History ==\n<center><big>Intro</big></center>\nrest\n"
    );
    assert_eq!(outcome.passes, 1);
    assert!(outcome.converged);
}

#[test]
fn fixed_snapshot_reindexes_cleanly() {
    let text = "== ''History ==\n<big><center>Intro</big></center>\n<nowiki>rest\n";
    let engine = Engine::new();
    let fixed = engine.fix_to_convergence(text, &[], 10).unwrap().text;

    let index = wikilint_parser::index(&fixed);
    assert!(index.tags().iter().all(|t| t.is_complete()));
    assert_eq!(index.headings().len(), 1);
    assert_eq!(index.slice(index.headings()[0].content), "History");

    assert!(engine.detect(&fixed, &[], false).unwrap().is_empty());
}

#[test]
fn cascading_fixes_take_several_passes() {
    // The dangling nowiki hides the emptiness of the pair around it; only
    // after the first pass deletes it does the empty pair become visible.
    let engine = Engine::new();
    let outcome = engine
        .fix_to_convergence("<center><nowiki></center>", &[], 10)
        .unwrap();
    assert_eq!(outcome.text, "");
    assert_eq!(outcome.passes, 2);
    assert!(outcome.converged);
}

#[test]
fn configuration_reaches_detectors_through_the_engine() {
    let config = MapConfig::from_json(
        r#"{
            "detectors": {
                "unclosed-tag": { "tags": ["center"] },
                "suggestion": { "rules": ["teh=>the"] }
            }
        }"#,
    )
    .unwrap();
    let engine = Engine::new().with_config(config);

    let text = "teh <center>x";
    let results = engine.detect(text, &[], false).unwrap();
    let found: Vec<_> = results
        .iter()
        .map(|r| (r.detector_id.as_str(), r.span))
        .collect();
    assert_eq!(
        found,
        vec![
            ("suggestion", Span::new(0, 3)),
            ("unclosed-tag", Span::new(4, 12)),
        ]
    );

    // Spelling suggestions are never automatic; only the tag is repaired.
    let outcome = engine.auto_fix(text, &[]).unwrap();
    assert_eq!(outcome.text, "teh x");
    assert_eq!(outcome.applied, 1);
    let residual = engine.detect(&outcome.text, &[], false).unwrap();
    assert_eq!(residual.len(), 1);
    assert!(!residual[0].has_automatic());
}

#[test]
fn parallel_detection_matches_sequential_across_snapshots() {
    let engine = Engine::new();
    let paragraph = "== ''T ==\n<center></center> <nowiki>x [[A|b <small>c]] </small>\n";
    let text = paragraph.repeat(20);

    let sequential = engine.detect(&text, &[], false).unwrap();
    let parallel = engine.detect_parallel(&text, &[], false).unwrap();
    assert_eq!(sequential, parallel);
    assert!(!sequential.is_empty());
}

#[rstest]
#[case::plain_prose("Just a paragraph of prose with nothing to flag.")]
#[case::balanced_heading("== ''Heading'' ==\n")]
#[case::nested_pairs("<center><big>text</big></center>")]
#[case::literal_region("<nowiki><center></nowiki>")]
#[case::commented_out("<!-- <nowiki> -->")]
fn clean_snapshots_survive_the_pipeline_unchanged(#[case] text: &str) {
    let engine = Engine::new();
    assert!(engine.detect(text, &[], false).unwrap().is_empty());
    let outcome = engine.fix_to_convergence(text, &[], 10).unwrap();
    assert_eq!(outcome.text, text);
    assert_eq!(outcome.passes, 0);
    assert!(outcome.converged);
}
