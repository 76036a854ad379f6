//! The built-in detectors.

mod empty_tag;
mod heading_emphasis;
mod misnested;
mod suggestion_rules;
mod unclosed_tag;

pub use empty_tag::EmptyTag;
pub use heading_emphasis::HeadingEmphasis;
pub use misnested::MisnestedTag;
pub use suggestion_rules::SuggestionRules;
pub use unclosed_tag::UnclosedTag;

use crate::result::DefectResult;

/// Shared sink handling for detectors.
///
/// Applies the `only_automatic` filter before anything reaches the sink,
/// so the restricted result set is a subset of the full one by
/// construction. `satisfied` turns true on the null-sink path as soon as
/// one defect passes the filter, letting probes return early.
pub(crate) struct Reporter<'a> {
    sink: Option<&'a mut Vec<DefectResult>>,
    only_automatic: bool,
    found: bool,
}

impl<'a> Reporter<'a> {
    pub(crate) fn new(sink: Option<&'a mut Vec<DefectResult>>, only_automatic: bool) -> Self {
        Self {
            sink,
            only_automatic,
            found: false,
        }
    }

    pub(crate) fn report(&mut self, result: DefectResult) {
        if self.only_automatic && !result.has_automatic() {
            return;
        }
        self.found = true;
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.push(result);
        }
    }

    /// True once a probe (no sink) has its answer.
    pub(crate) fn satisfied(&self) -> bool {
        self.found && self.sink.is_none()
    }

    pub(crate) fn found(&self) -> bool {
        self.found
    }
}
