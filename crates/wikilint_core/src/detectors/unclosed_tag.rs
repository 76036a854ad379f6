//! Unclosed watched tags.
//!
//! An opening `<nowiki>`, `<ref>`, ... with no matching closing tag is
//! never rendered as intended; deleting the dangling tag is safe.

use wikilint_parser::StructuralIndex;

use crate::detector::{Detector, DetectorContext};
use crate::detectors::Reporter;
use crate::result::DefectResult;

const DEFAULT_WATCHED: [&str; 5] = ["nowiki", "ref", "gallery", "includeonly", "noinclude"];

pub struct UnclosedTag;

impl Detector for UnclosedTag {
    fn id(&self) -> &'static str {
        "unclosed-tag"
    }

    fn description(&self) -> &'static str {
        "Opening tag without a matching closing tag"
    }

    fn analyze(
        &self,
        index: &StructuralIndex<'_>,
        ctx: &DetectorContext<'_>,
        sink: Option<&mut Vec<DefectResult>>,
        only_automatic: bool,
    ) -> bool {
        let watched = ctx
            .config
            .list_parameter(self.id(), "tags")
            .unwrap_or_else(|| DEFAULT_WATCHED.iter().map(|s| s.to_string()).collect());

        let mut reporter = Reporter::new(sink, only_automatic);
        for tag in index.tags() {
            if tag.is_close() || tag.is_complete() {
                continue;
            }
            if !watched.iter().any(|name| *name == tag.name) {
                continue;
            }
            reporter.report(
                DefectResult::new(self.id(), tag.span).with_replacement(
                    "",
                    ctx.messages.message("delete", &[]),
                    true,
                ),
            );
            if reporter.satisfied() {
                return true;
            }
        }
        reporter.found()
    }
}
