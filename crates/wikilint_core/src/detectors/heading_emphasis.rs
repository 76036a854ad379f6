//! Unbalanced emphasis inside headings.
//!
//! Emphasis opened in a heading must close before the trailing markers.
//! Run weights are summed over the heading content; an odd total means an
//! unterminated run. One result per heading.

use wikilint_parser::StructuralIndex;

use crate::detector::{Detector, DetectorContext};
use crate::detectors::Reporter;
use crate::result::DefectResult;

pub struct HeadingEmphasis;

impl Detector for HeadingEmphasis {
    fn id(&self) -> &'static str {
        "heading-emphasis"
    }

    fn description(&self) -> &'static str {
        "Emphasis left open inside a heading"
    }

    fn analyze(
        &self,
        index: &StructuralIndex<'_>,
        ctx: &DetectorContext<'_>,
        sink: Option<&mut Vec<DefectResult>>,
        only_automatic: bool,
    ) -> bool {
        let contents = index.contents();
        let mut reporter = Reporter::new(sink, only_automatic);
        for heading in index.headings() {
            let content = heading.content;
            let runs = index.emphasis_runs_in(content.start, content.end);
            let total: u32 = runs.iter().map(|r| r.weight).sum();
            if total % 2 == 0 || runs.is_empty() {
                continue;
            }

            let first = runs[0];
            let span = wikilint_elements::Span::new(first.offset, content.end);
            let mut result = DefectResult::new(self.id(), span);
            if total == 1 {
                // Deleting the run is safe unless quoting elsewhere in the
                // heading makes the intent ambiguous.
                let deletable = !index.slice(content).contains('"')
                    && !contents[content.start as usize..first.offset as usize].contains('\'');
                let quotes_end = first.offset + first.effective_length;
                if quotes_end == content.end {
                    result = result.with_replacement(
                        "",
                        ctx.messages.message("delete", &[]),
                        deletable,
                    );
                } else {
                    let quotes = &contents[first.offset as usize..quotes_end as usize];
                    let rest = &contents[first.offset as usize..content.end as usize];
                    result = result
                        .with_replacement(
                            format!("{rest}{quotes}"),
                            format!("{quotes}...{quotes}"),
                            false,
                        )
                        .with_replacement(
                            &contents[quotes_end as usize..content.end as usize],
                            ctx.messages.message("delete", &[]),
                            deletable,
                        );
                }
            }
            // More than one unbalanced run: report only, a human has to
            // decide which one is stray.
            reporter.report(result);
            if reporter.satisfied() {
                return true;
            }
        }
        reporter.found()
    }
}
