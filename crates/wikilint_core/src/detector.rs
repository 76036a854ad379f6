//! The detector seam and the fixed registry.
//!
//! A detector is a stateless value: given an index it reports defects into
//! a caller-supplied sink. With no sink it acts as an existence probe and
//! returns at the first confirmed defect. `only_automatic` restricts
//! reporting to defects carrying at least one automatic candidate; that
//! restricted set is always a subset of the unrestricted one.

use wikilint_parser::StructuralIndex;

use crate::config::{ConfigSource, NullConfig};
use crate::detectors;
use crate::messages::{EnglishMessages, Messages};
use crate::result::DefectResult;

/// Collaborators available to a detector during one analysis call.
pub struct DetectorContext<'a> {
    /// Parameter lookup. Absent parameters degrade to defaults.
    pub config: &'a dyn ConfigSource,
    /// Description lookup for replacement candidates.
    pub messages: &'a dyn Messages,
}

impl DetectorContext<'_> {
    /// A context with no configuration and English descriptions.
    pub fn default_context() -> DetectorContext<'static> {
        static CONFIG: NullConfig = NullConfig;
        static MESSAGES: EnglishMessages = EnglishMessages;
        DetectorContext {
            config: &CONFIG,
            messages: &MESSAGES,
        }
    }
}

/// A single defect detector.
///
/// Implementations are pure over the index: they never mutate it, never
/// perform I/O, and write only to the supplied sink.
pub trait Detector: Send + Sync {
    /// Stable identifier of the defect kind.
    fn id(&self) -> &'static str;

    /// One-line human description of what the detector finds.
    fn description(&self) -> &'static str;

    /// Analyzes the index.
    ///
    /// With `sink == None` this is an existence probe: return `true` as
    /// soon as one defect is confirmed. With a sink, report every defect
    /// found and return whether any were.
    fn analyze(
        &self,
        index: &StructuralIndex<'_>,
        ctx: &DetectorContext<'_>,
        sink: Option<&mut Vec<DefectResult>>,
        only_automatic: bool,
    ) -> bool;
}

/// The fixed detector catalogue, in registry order.
pub fn registry() -> Vec<Box<dyn Detector>> {
    vec![
        Box::new(detectors::UnclosedTag),
        Box::new(detectors::EmptyTag),
        Box::new(detectors::HeadingEmphasis),
        Box::new(detectors::MisnestedTag),
        Box::new(detectors::SuggestionRules),
    ]
}
