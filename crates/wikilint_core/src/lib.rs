//! # wikilint_core
//!
//! Defect detection and automatic repair engine for WikiLint.
//!
//! This crate provides:
//! - The `Engine` facade over the detector registry
//! - The defect / replacement result model
//! - Configuration and message lookup seams
//! - The automatic fix applier and convergence driver
//!
//! ## Example
//!
//! ```rust,ignore
//! use wikilint_core::Engine;
//!
//! let engine = Engine::new();
//! let results = engine.detect("<nowiki>foo", &[], false)?;
//! for result in &results {
//!     println!("{} at {}..{}", result.detector_id, result.span.start, result.span.end);
//! }
//! let fixed = engine.auto_fix("<nowiki>foo", &[])?;
//! assert_eq!(fixed.text, "foo");
//! ```

mod config;
mod detector;
mod detectors;
mod engine;
mod error;
mod fixer;
mod messages;
pub mod policy;
mod result;
pub mod suggestion;
pub mod util;

pub use config::{ConfigSource, MapConfig, NullConfig, ParameterValue};
pub use detector::{registry, Detector, DetectorContext};
pub use engine::{ConvergenceOutcome, Engine};
pub use error::EngineError;
pub use fixer::{apply_automatic_fixes, FixOutcome};
pub use messages::{EnglishMessages, Messages};
pub use result::{DefectResult, Replacement, Severity};
pub use suggestion::Suggestion;

pub use wikilint_elements::Span;
