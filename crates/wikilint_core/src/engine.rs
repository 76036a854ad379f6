//! The engine facade.
//!
//! One `Engine` owns the detector registry and the configuration and
//! message collaborators. It is immutable after construction and safe to
//! share across threads, so one engine can serve many snapshots.

use rayon::prelude::*;
use tracing::debug;

use crate::config::{ConfigSource, NullConfig};
use crate::detector::{registry, Detector, DetectorContext};
use crate::error::EngineError;
use crate::fixer::{apply_automatic_fixes, FixOutcome};
use crate::messages::{EnglishMessages, Messages};
use crate::result::DefectResult;

/// Outcome of [`Engine::fix_to_convergence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvergenceOutcome {
    /// The final snapshot.
    pub text: String,
    /// Number of passes that applied at least one fix.
    pub passes: usize,
    /// True when a pass found nothing left to fix; false when the pass
    /// cap stopped the iteration first.
    pub converged: bool,
}

/// Defect detection and repair over text snapshots.
pub struct Engine {
    detectors: Vec<Box<dyn Detector>>,
    config: Box<dyn ConfigSource>,
    messages: Box<dyn Messages>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// An engine with every built-in detector, no configuration and
    /// English descriptions.
    pub fn new() -> Self {
        Self {
            detectors: registry(),
            config: Box::new(NullConfig),
            messages: Box::new(EnglishMessages),
        }
    }

    /// Replaces the configuration source (builder style).
    pub fn with_config(mut self, config: impl ConfigSource + 'static) -> Self {
        self.config = Box::new(config);
        self
    }

    /// Replaces the message lookup (builder style).
    pub fn with_messages(mut self, messages: impl Messages + 'static) -> Self {
        self.messages = Box::new(messages);
        self
    }

    /// Identifiers of the registered detectors, in registry order.
    pub fn detector_ids(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.id()).collect()
    }

    /// Identifier and description pairs, for catalogue listings.
    pub fn detector_catalogue(&self) -> Vec<(&'static str, &'static str)> {
        self.detectors
            .iter()
            .map(|d| (d.id(), d.description()))
            .collect()
    }

    fn context(&self) -> DetectorContext<'_> {
        DetectorContext {
            config: self.config.as_ref(),
            messages: self.messages.as_ref(),
        }
    }

    /// Resolves a detector selection. An empty selection means all.
    fn select(&self, ids: &[&str]) -> Result<Vec<&dyn Detector>, EngineError> {
        if ids.is_empty() {
            return Ok(self.detectors.iter().map(Box::as_ref).collect());
        }
        ids.iter()
            .map(|id| {
                self.detectors
                    .iter()
                    .map(Box::as_ref)
                    .find(|d| d.id() == *id)
                    .ok_or_else(|| EngineError::UnknownDetector(id.to_string()))
            })
            .collect()
    }

    /// Runs the selected detectors over one snapshot.
    ///
    /// Results are sorted by span, then detector id, so the output is
    /// deterministic for a given input.
    pub fn detect(
        &self,
        text: &str,
        detector_ids: &[&str],
        only_automatic: bool,
    ) -> Result<Vec<DefectResult>, EngineError> {
        let detectors = self.select(detector_ids)?;
        let index = wikilint_parser::index(text);
        let ctx = self.context();
        let mut results = Vec::new();
        for detector in detectors {
            detector.analyze(&index, &ctx, Some(&mut results), only_automatic);
        }
        sort_results(&mut results);
        debug!(defects = results.len(), "detection finished");
        Ok(results)
    }

    /// Like [`Engine::detect`], with the detectors running in parallel.
    pub fn detect_parallel(
        &self,
        text: &str,
        detector_ids: &[&str],
        only_automatic: bool,
    ) -> Result<Vec<DefectResult>, EngineError> {
        let detectors = self.select(detector_ids)?;
        let index = wikilint_parser::index(text);
        let mut results: Vec<DefectResult> = detectors
            .par_iter()
            .flat_map_iter(|detector| {
                let ctx = self.context();
                let mut sink = Vec::new();
                detector.analyze(&index, &ctx, Some(&mut sink), only_automatic);
                sink
            })
            .collect();
        sort_results(&mut results);
        Ok(results)
    }

    /// True when one detector finds any defect. Stops at the first hit.
    pub fn has_defect(&self, text: &str, detector_id: &str) -> Result<bool, EngineError> {
        let detectors = self.select(&[detector_id])?;
        let index = wikilint_parser::index(text);
        let ctx = self.context();
        Ok(detectors[0].analyze(&index, &ctx, None, false))
    }

    /// Applies every automatic fix found in one pass.
    pub fn auto_fix(&self, text: &str, detector_ids: &[&str]) -> Result<FixOutcome, EngineError> {
        let results = self.detect(text, detector_ids, true)?;
        Ok(apply_automatic_fixes(text, &results))
    }

    /// Repeats [`Engine::auto_fix`] until a pass changes nothing, up to
    /// `max_passes`. Each pass re-indexes the rewritten snapshot, so fixes
    /// unlocked by earlier fixes are picked up.
    pub fn fix_to_convergence(
        &self,
        text: &str,
        detector_ids: &[&str],
        max_passes: usize,
    ) -> Result<ConvergenceOutcome, EngineError> {
        let mut current = text.to_string();
        let mut passes = 0usize;
        while passes < max_passes {
            let outcome = self.auto_fix(&current, detector_ids)?;
            if outcome.applied == 0 {
                return Ok(ConvergenceOutcome {
                    text: current,
                    passes,
                    converged: true,
                });
            }
            current = outcome.text;
            passes += 1;
        }
        // One more detection decides whether the cap or convergence ended
        // the loop.
        let converged = self.detect(&current, detector_ids, true)?.is_empty();
        Ok(ConvergenceOutcome {
            text: current,
            passes,
            converged,
        })
    }
}

fn sort_results(results: &mut [DefectResult]) {
    results.sort_by(|a, b| {
        a.span
            .cmp(&b.span)
            .then_with(|| a.detector_id.cmp(&b.detector_id))
    });
}
