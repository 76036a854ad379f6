//! Text output formatter

use wikilint_core::Severity;

use crate::report::FileReport;

pub fn output_text(reports: &[FileReport], fixing: bool) {
    for report in reports {
        if report.is_clean() {
            continue;
        }

        println!("\n{}:", report.path.display());
        if let Some(fixed) = &report.fixed {
            if report.dry_run {
                println!("  would fix ({} bytes after rewrite)", fixed.len());
            } else {
                println!("  fixed");
            }
        }
        for result in &report.results {
            let severity = match result.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            let candidates = if result.replacements.is_empty() {
                String::new()
            } else {
                format!(" ({} candidate fixes)", result.replacements.len())
            };
            println!(
                "  {}:{} {} [{}]{}",
                result.span.start, result.span.end, severity, result.detector_id, candidates
            );
        }
    }

    let total_files = reports.len();
    let total_defects: usize = reports.iter().map(|r| r.results.len()).sum();
    println!();
    if fixing {
        let fixed = reports.iter().filter(|r| r.fixed.is_some()).count();
        println!(
            "Checked {} files, fixed {}, {} defects remaining",
            total_files, fixed, total_defects
        );
    } else {
        println!(
            "Checked {} files, found {} defects",
            total_files, total_defects
        );
    }
}
