//! Tags without meaningful content.
//!
//! A matched pair like `<center>  </center>` renders nothing. The pair is
//! reported over its complete span with an unwrap or delete candidate.
//! Content that is only ignorable (`nowiki`, comments, ...) downgrades the
//! defect to a warning and blocks automatic repair.

use wikilint_elements::names;
use wikilint_parser::StructuralIndex;

use crate::detector::{Detector, DetectorContext};
use crate::detectors::Reporter;
use crate::result::{DefectResult, Replacement, Severity};

const INTERESTING_TAGS: [&str; 7] = [
    names::CENTER,
    names::DIV,
    names::SPAN,
    names::INCLUDEONLY,
    names::GALLERY,
    names::NOINCLUDE,
    names::REF,
];

/// Tags whose content does not count as text.
const IGNORED_TAGS: [&str; 4] = [names::CODE, names::NOWIKI, names::PRE, names::SCORE];

pub struct EmptyTag;

impl Detector for EmptyTag {
    fn id(&self) -> &'static str {
        "empty-tag"
    }

    fn description(&self) -> &'static str {
        "Matched tag pair with no content"
    }

    fn analyze(
        &self,
        index: &StructuralIndex<'_>,
        ctx: &DetectorContext<'_>,
        sink: Option<&mut Vec<DefectResult>>,
        only_automatic: bool,
    ) -> bool {
        let mut reporter = Reporter::new(sink, only_automatic);
        for tag in index.tags() {
            if tag.is_full() || tag.is_close() || !tag.is_complete() {
                continue;
            }
            if !INTERESTING_TAGS.contains(&tag.name.as_str()) {
                continue;
            }
            if let Some(result) = analyze_pair(index, ctx, tag) {
                reporter.report(result);
                if reporter.satisfied() {
                    return true;
                }
            }
        }
        reporter.found()
    }
}

fn analyze_pair(
    index: &StructuralIndex<'_>,
    ctx: &DetectorContext<'_>,
    tag: &wikilint_elements::Tag,
) -> Option<DefectResult> {
    let contents = index.contents();
    let value = tag.value_span?;
    let complete = tag.complete_span();

    // Walk the value looking for real text; collect a tag-preserving
    // replacement as we go.
    let mut severity = Severity::Error;
    let mut ignored_text = false;
    let mut use_replacement = false;
    let mut kept = String::new();
    kept.push_str(index.slice(tag.span));
    let mut at = value.start;
    while at < value.end {
        let c = contents[at as usize..].chars().next()?;
        if c.is_whitespace() {
            kept.push(c);
            at += c.len_utf8() as u32;
            continue;
        }
        if c == '<' {
            if let Some(inner) = index.tag_at(at) {
                if IGNORED_TAGS.contains(&inner.name.as_str()) && inner.is_complete() {
                    ignored_text = true;
                    severity = Severity::Warning;
                    let inner_end = inner.complete_span().end;
                    if inner.name == names::NOWIKI {
                        if let Some(inner_value) = inner.value_span {
                            kept.push_str(index.slice(inner_value));
                        }
                        use_replacement = true;
                    } else {
                        kept.push_str(&contents[at as usize..inner_end as usize]);
                    }
                    at = inner_end;
                    continue;
                }
            } else if let Some(comment) = index.comment_at(at) {
                severity = Severity::Warning;
                kept.push_str(&contents[at as usize..comment.span.end as usize]);
                at = comment.span.end;
                continue;
            }
        }
        return None;
    }
    kept.push_str(&contents[value.end as usize..complete.end as usize]);

    // Some parameters make an empty tag meaningful, others merely block
    // automatic removal.
    let mut unsafe_parameters = false;
    if !tag.parameters.is_empty() {
        match tag.name.as_str() {
            n if n == names::REF => return None,
            n if n == names::SPAN => {
                if tag.parameters.iter().any(|p| p.name != "contenteditable") {
                    unsafe_parameters = true;
                }
            }
            n if n == names::DIV => {
                if tag.parameters.len() == 1 && tag.parameter("id").is_some() {
                    return None;
                }
                unsafe_parameters = true;
                if let Some(style) = tag.parameter("style").and_then(|p| p.value.as_deref()) {
                    if style.split(';').any(|s| {
                        s.split_once(':')
                            .is_some_and(|(name, _)| name.trim().eq_ignore_ascii_case("clear"))
                    }) {
                        return None;
                    }
                }
            }
            _ => unsafe_parameters = true,
        }
    }

    let mut result = DefectResult::new("empty-tag", complete).with_severity(severity);
    if !ignored_text {
        if value.end > value.start {
            result = result
                .with_replacement(
                    index.slice(value),
                    ctx.messages.message("keep-content", &[]),
                    !unsafe_parameters,
                )
                .with_replacement("", ctx.messages.message("remove-tag-and-content", &[]), false);
        } else {
            result = result.with_replacement(
                "",
                ctx.messages.message("remove-tag-and-content", &[]),
                !unsafe_parameters,
            );
        }
    } else {
        if use_replacement {
            let description = kept.clone();
            result.replacements.push(Replacement::new(kept, description, false));
        }
        if tag.name == names::CENTER {
            for entry in ctx
                .config
                .list_parameter("empty-tag", "center_templates")
                .unwrap_or_default()
            {
                let mut fields = entry.splitn(2, '|');
                let template = fields.next().unwrap_or_default();
                if let Some(parameter) = fields.next() {
                    let text = format!("{{{{{}|{}={}}}}}", template, parameter, index.slice(value));
                    let description = ctx
                        .messages
                        .message("use-template", &[&format!("{{{{{}}}}}", template)]);
                    result = result.with_replacement(text, description, false);
                }
            }
        }
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wikilint_elements::Span;

    use crate::config::{MapConfig, ParameterValue};
    use crate::messages::EnglishMessages;

    fn run(text: &str) -> Vec<DefectResult> {
        run_with(text, &MapConfig::new())
    }

    fn run_with(text: &str, config: &MapConfig) -> Vec<DefectResult> {
        let index = wikilint_parser::index(text);
        let messages = EnglishMessages;
        let ctx = DetectorContext {
            config,
            messages: &messages,
        };
        let mut results = Vec::new();
        EmptyTag.analyze(&index, &ctx, Some(&mut results), false);
        results
    }

    #[test]
    fn whitespace_only_pair_is_reported() {
        let results = run("a<center>  </center>b");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].span, Span::new(1, 20));
        assert_eq!(results[0].severity, Severity::Error);
        let candidates = &results[0].replacements;
        assert_eq!(candidates[0].text, "  ");
        assert!(candidates[0].automatic);
        assert_eq!(candidates[1].text, "");
        assert!(!candidates[1].automatic);
    }

    #[test]
    fn truly_empty_pair_offers_deletion_only() {
        let results = run("<center></center>");
        assert_eq!(results[0].replacements.len(), 1);
        assert_eq!(results[0].replacements[0].text, "");
        assert!(results[0].replacements[0].automatic);
    }

    #[test]
    fn text_content_is_clean() {
        assert!(run("<center>text</center>").is_empty());
    }

    #[test]
    fn nowiki_content_is_a_warning_with_unwrap() {
        let results = run("<center><nowiki>x</nowiki></center>");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].severity, Severity::Warning);
        let candidate = &results[0].replacements[0];
        assert_eq!(candidate.text, "<center>x</center>");
        assert!(!candidate.automatic);
    }

    #[test]
    fn comment_content_is_a_warning_without_candidates() {
        let results = run("<center><!-- note --></center>");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].severity, Severity::Warning);
        assert!(results[0].replacements.is_empty());
    }

    #[test]
    fn ref_with_parameters_is_skipped() {
        assert!(run("<ref name=\"a\"></ref>").is_empty());
        assert_eq!(run("<ref></ref>").len(), 1);
    }

    #[test]
    fn span_contenteditable_stays_automatic() {
        let results = run("<span contenteditable=\"\"></span>");
        assert!(results[0].replacements[0].automatic);
        let results = run("<span class=\"x\"></span>");
        assert!(!results[0].replacements[0].automatic);
    }

    #[test]
    fn div_parameter_rules() {
        assert!(run("<div id=\"toc\"></div>").is_empty());
        assert!(run("<div style=\"clear: both\"></div>").is_empty());
        let results = run("<div class=\"x\"></div>");
        assert!(!results[0].replacements[0].automatic);
    }

    #[test]
    fn center_templates_offer_manual_rewrites() {
        let config = MapConfig::new().with_parameter(
            "empty-tag",
            "center_templates",
            ParameterValue::List(vec!["centered|1".to_string()]),
        );
        let results = run_with("<center><nowiki>x</nowiki></center>", &config);
        let texts: Vec<_> = results[0].replacements.iter().map(|r| r.text.as_str()).collect();
        assert!(texts.contains(&"{{centered|1=<nowiki>x</nowiki>}}"));
    }

    #[test]
    fn only_automatic_drops_warnings() {
        let index = wikilint_parser::index("<center><!-- c --></center>");
        let mut results = Vec::new();
        let found = EmptyTag.analyze(
            &index,
            &DetectorContext::default_context(),
            Some(&mut results),
            true,
        );
        assert!(!found);
        assert!(results.is_empty());
    }
}
