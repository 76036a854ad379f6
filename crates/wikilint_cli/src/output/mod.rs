//! Output formatting module

mod json;
mod text;

use miette::Result;

use crate::report::FileReport;

/// Prints the reports in the requested format.
///
/// Returns true when no defects remain in any file.
pub fn output_reports(reports: &[FileReport], format: &str, fixing: bool) -> Result<bool> {
    let clean = reports.iter().all(|r| r.results.is_empty());

    match format {
        "json" => json::output_json(reports)?,
        _ => text::output_text(reports, fixing),
    }

    Ok(clean)
}
