//! Replacement descriptions.
//!
//! Descriptions shown next to replacement candidates come from an opaque
//! key-based lookup so a frontend can localize them. The engine's logic
//! never depends on the returned strings.

/// Message lookup seam.
pub trait Messages: Send + Sync {
    /// Resolves a message key, substituting `{0}`, `{1}`, ... with `args`.
    fn message(&self, key: &str, args: &[&str]) -> String;
}

/// Built-in English messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishMessages;

impl Messages for EnglishMessages {
    fn message(&self, key: &str, args: &[&str]) -> String {
        let template = match key {
            "delete" => "Delete",
            "keep-content" => "Keep the content, remove the tags",
            "remove-tag-and-content" => "Remove the tag and its content",
            "use-template" => "Use {0}",
            "move-emphasis" => "Move the emphasis marks",
            _ => key,
        };
        let mut out = template.to_string();
        for (i, arg) in args.iter().enumerate() {
            out = out.replace(&format!("{{{}}}", i), arg);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitution() {
        let m = EnglishMessages;
        assert_eq!(m.message("delete", &[]), "Delete");
        assert_eq!(m.message("use-template", &["{{centered}}"]), "Use {{centered}}");
    }

    #[test]
    fn unknown_key_falls_back_to_the_key() {
        assert_eq!(EnglishMessages.message("no-such-key", &[]), "no-such-key");
    }
}
