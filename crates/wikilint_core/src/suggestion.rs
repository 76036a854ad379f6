//! Pattern-based replacement suggestions.
//!
//! A suggestion pairs one regular expression with an ordered list of
//! replacement templates. The pattern is compiled once, anchored, so a
//! match can be probed at any byte offset without scanning ahead.

use regex::Regex;

use crate::error::EngineError;

/// One compiled suggestion rule.
#[derive(Debug, Clone)]
pub struct Suggestion {
    pattern: Regex,
    replacements: Vec<SuggestionReplacement>,
}

#[derive(Debug, Clone)]
pub struct SuggestionReplacement {
    /// Template with `$n` capture references.
    pub template: String,
    /// Optional human comment shown with the candidate.
    pub comment: Option<String>,
}

impl Suggestion {
    /// Compiles a suggestion from its pattern source.
    ///
    /// The pattern is wrapped in `\A(?:...)` so every probe is anchored at
    /// the requested offset.
    pub fn new(pattern: &str) -> Result<Self, EngineError> {
        let anchored = format!(r"\A(?:{pattern})");
        let compiled = Regex::new(&anchored)
            .map_err(|source| EngineError::pattern(format!("{pattern}: {source}")))?;
        Ok(Self {
            pattern: compiled,
            replacements: Vec::new(),
        })
    }

    /// Registers a replacement template.
    ///
    /// A template wrapped in `<nowiki>...</nowiki>` is unwrapped; the
    /// wrapper only protects significant whitespace in configuration
    /// storage.
    pub fn add_replacement(&mut self, template: &str, comment: Option<&str>) {
        let template = template
            .strip_prefix("<nowiki>")
            .and_then(|t| t.strip_suffix("</nowiki>"))
            .unwrap_or(template);
        self.replacements.push(SuggestionReplacement {
            template: template.to_owned(),
            comment: comment.map(str::to_owned),
        });
    }

    pub fn replacements(&self) -> &[SuggestionReplacement] {
        &self.replacements
    }

    /// Length in bytes of a match starting exactly at `offset`, if any.
    pub fn looking_at(&self, text: &str, offset: usize) -> Option<usize> {
        if offset > text.len() || !text.is_char_boundary(offset) {
            return None;
        }
        self.pattern.find(&text[offset..]).map(|m| m.end())
    }

    /// Applies the pattern once per stored template to the matched text.
    ///
    /// Returns the rewritten texts paired with their comments, in template
    /// order.
    pub fn replacements_for(&self, matched: &str) -> Vec<(String, Option<String>)> {
        self.replacements
            .iter()
            .map(|replacement| {
                let text = self
                    .pattern
                    .replace(matched, replacement.template.as_str())
                    .into_owned();
                (text, replacement.comment.clone())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn probe_is_anchored() {
        let suggestion = Suggestion::new("abc").unwrap();
        assert_eq!(suggestion.looking_at("abcdef", 0), Some(3));
        assert_eq!(suggestion.looking_at("xabc", 0), None);
        assert_eq!(suggestion.looking_at("xabc", 1), Some(3));
    }

    #[test]
    fn probe_past_end_or_mid_char_is_none() {
        let suggestion = Suggestion::new("a").unwrap();
        assert_eq!(suggestion.looking_at("a", 5), None);
        assert_eq!(suggestion.looking_at("éa", 1), None);
    }

    #[test]
    fn templates_substitute_captures() {
        let mut suggestion = Suggestion::new(r"(\w+) , (\w+)").unwrap();
        suggestion.add_replacement("$1, $2", None);
        let rewritten = suggestion.replacements_for("foo , bar");
        assert_eq!(rewritten, vec![("foo, bar".to_owned(), None)]);
    }

    #[test]
    fn nowiki_wrapper_is_stripped() {
        let mut suggestion = Suggestion::new("x").unwrap();
        suggestion.add_replacement("<nowiki> y </nowiki>", Some("spacing"));
        assert_eq!(suggestion.replacements()[0].template, " y ");
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let err = Suggestion::new("(unclosed").unwrap_err();
        assert!(err.to_string().contains("(unclosed"));
    }
}
