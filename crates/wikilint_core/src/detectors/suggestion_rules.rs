//! Configured replacement suggestions.
//!
//! Rules come entirely from configuration; without any the detector is a
//! no-op. Each rule is `pattern=>template[=>template...]`. Candidates are
//! always manual: a pattern cannot prove its rewrite is safe.

use tracing::warn;
use wikilint_elements::Span;
use wikilint_parser::StructuralIndex;

use crate::detector::{Detector, DetectorContext};
use crate::detectors::Reporter;
use crate::result::DefectResult;
use crate::suggestion::Suggestion;

pub struct SuggestionRules;

impl Detector for SuggestionRules {
    fn id(&self) -> &'static str {
        "suggestion"
    }

    fn description(&self) -> &'static str {
        "Configured text patterns with suggested rewrites"
    }

    fn analyze(
        &self,
        index: &StructuralIndex<'_>,
        ctx: &DetectorContext<'_>,
        sink: Option<&mut Vec<DefectResult>>,
        only_automatic: bool,
    ) -> bool {
        let rules = load_rules(ctx);
        if rules.is_empty() || only_automatic {
            return false;
        }

        let contents = index.contents();
        let mut reporter = Reporter::new(sink, only_automatic);
        let mut at = 0usize;
        while at < contents.len() {
            if index.comment_at(at as u32).is_some() || index.in_literal_region(at as u32) {
                at += contents[at..].chars().next().map_or(1, char::len_utf8);
                continue;
            }
            let matched = rules
                .iter()
                .find_map(|rule| rule.looking_at(contents, at).map(|len| (rule, len)));
            let Some((rule, len)) = matched.filter(|(_, len)| *len > 0) else {
                at += contents[at..].chars().next().map_or(1, char::len_utf8);
                continue;
            };
            let span = Span::new(at as u32, (at + len) as u32);
            let mut result = DefectResult::new(self.id(), span);
            for (text, comment) in rule.replacements_for(&contents[at..at + len]) {
                let description = comment.unwrap_or_else(|| text.clone());
                result = result.with_replacement(text, description, false);
            }
            reporter.report(result);
            if reporter.satisfied() {
                return true;
            }
            at += len;
        }
        reporter.found()
    }
}

/// Compiles the configured rules, skipping the ones that do not parse.
fn load_rules(ctx: &DetectorContext<'_>) -> Vec<Suggestion> {
    let Some(entries) = ctx.config.list_parameter("suggestion", "rules") else {
        return Vec::new();
    };
    let mut rules = Vec::new();
    for entry in entries {
        let mut fields = entry.split("=>");
        let Some(pattern) = fields.next() else { continue };
        match Suggestion::new(pattern) {
            Ok(mut rule) => {
                let mut templates = 0;
                for template in fields {
                    rule.add_replacement(template, None);
                    templates += 1;
                }
                if templates > 0 {
                    rules.push(rule);
                } else {
                    warn!(rule = %entry, "suggestion rule has no replacement, skipped");
                }
            }
            Err(error) => {
                warn!(rule = %entry, %error, "invalid suggestion pattern, skipped");
            }
        }
    }
    rules
}
