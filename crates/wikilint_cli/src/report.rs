//! Per-file check results.

use std::path::PathBuf;

use wikilint_core::DefectResult;

/// Everything known about one checked file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    /// Defects found (after fixing, when fixing was requested).
    pub results: Vec<DefectResult>,
    /// Rewritten content, when fixing changed the file.
    pub fixed: Option<String>,
    /// True when fixes were previewed but not written.
    pub dry_run: bool,
}

impl FileReport {
    /// True when nothing is wrong and nothing was changed.
    pub fn is_clean(&self) -> bool {
        self.results.is_empty() && self.fixed.is_none()
    }
}
