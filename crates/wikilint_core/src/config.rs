//! Detector configuration.
//!
//! Detectors read named parameters through the [`ConfigSource`] seam. A
//! missing parameter is never an error: the detector runs with its default
//! rule set instead.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Read-only parameter lookup consumed by detectors.
pub trait ConfigSource: Send + Sync {
    /// A single string-valued parameter.
    fn parameter(&self, detector_id: &str, name: &str) -> Option<String>;

    /// A list-valued parameter. A plain string configured where a list is
    /// expected degrades to a one-element list.
    fn list_parameter(&self, detector_id: &str, name: &str) -> Option<Vec<String>>;
}

/// A configured parameter value: a string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    /// Single string value.
    Text(String),
    /// List of string values.
    List(Vec<String>),
}

/// File-backed configuration: a map from detector id to named parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapConfig {
    /// Per-detector parameter maps.
    #[serde(default)]
    pub detectors: HashMap<String, HashMap<String, ParameterValue>>,

    /// Base directory for resolving relative paths. Usually the directory
    /// containing the configuration file.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl MapConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a `.wikilint.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| EngineError::config(format!("Failed to read config: {}", e)))?;

        let mut config = Self::from_json(&content)?;
        if let Some(parent) = path.parent() {
            config.base_dir = Some(parent.to_path_buf());
        }
        Ok(config)
    }

    /// Parses configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json)
            .map_err(|e| EngineError::config(format!("Invalid config: {}", e)))
    }

    /// Sets one parameter (builder style, used heavily by tests).
    pub fn with_parameter(
        mut self,
        detector_id: impl Into<String>,
        name: impl Into<String>,
        value: ParameterValue,
    ) -> Self {
        self.detectors
            .entry(detector_id.into())
            .or_default()
            .insert(name.into(), value);
        self
    }
}

impl ConfigSource for MapConfig {
    fn parameter(&self, detector_id: &str, name: &str) -> Option<String> {
        match self.detectors.get(detector_id)?.get(name)? {
            ParameterValue::Text(s) => Some(s.clone()),
            ParameterValue::List(_) => None,
        }
    }

    fn list_parameter(&self, detector_id: &str, name: &str) -> Option<Vec<String>> {
        match self.detectors.get(detector_id)?.get(name)? {
            ParameterValue::Text(s) => Some(vec![s.clone()]),
            ParameterValue::List(items) => Some(items.clone()),
        }
    }
}

/// Configuration with no parameters set: every detector uses its defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullConfig;

impl ConfigSource for NullConfig {
    fn parameter(&self, _detector_id: &str, _name: &str) -> Option<String> {
        None
    }

    fn list_parameter(&self, _detector_id: &str, _name: &str) -> Option<Vec<String>> {
        None
    }
}
