//! WikiLint CLI
//!
//! Structural defect detection and repair for wiki markup files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use miette::{miette, IntoDiagnostic, Result};
use rayon::prelude::*;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use wikilint_core::{Engine, MapConfig};

mod output;
mod report;

use report::FileReport;

/// Extensions checked when walking directories. Explicitly named files are
/// always checked.
const WIKI_EXTENSIONS: [&str; 4] = ["wiki", "wikitext", "mediawiki", "txt"];

const DEFAULT_CONFIG_FILE: &str = ".wikilint.json";
const MAX_FIX_PASSES: usize = 10;

/// WikiLint - structural defect detection for wiki markup
#[derive(Parser)]
#[command(name = "wklint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check files for markup defects
    Check {
        /// Files or directories to check
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Apply automatic fixes
        #[arg(long)]
        fix: bool,

        /// Preview fixes without writing files
        #[arg(long, requires = "fix")]
        dry_run: bool,

        /// Report only defects with an automatic fix
        #[arg(long)]
        only_automatic: bool,

        /// Comma-separated detector ids (default: all)
        #[arg(long, value_delimiter = ',')]
        detectors: Vec<String>,
    },

    /// List the available detectors
    Detectors,

    /// Write a starter configuration file
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(clean) => {
            if clean {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    match &cli.command {
        Commands::Check {
            paths,
            format,
            fix,
            dry_run,
            only_automatic,
            detectors,
        } => run_check(&cli, paths, format, *fix, *dry_run, *only_automatic, detectors),
        Commands::Detectors => {
            run_detectors();
            Ok(true)
        }
        Commands::Init { force } => run_init(*force).map(|_| true),
    }
}

fn load_config(cli: &Cli) -> Result<MapConfig> {
    if let Some(path) = &cli.config {
        return MapConfig::from_file(path).map_err(|e| miette!("{e}"));
    }
    if Path::new(DEFAULT_CONFIG_FILE).exists() {
        return MapConfig::from_file(DEFAULT_CONFIG_FILE).map_err(|e| miette!("{e}"));
    }
    Ok(MapConfig::new())
}

#[allow(clippy::too_many_arguments)]
fn run_check(
    cli: &Cli,
    paths: &[PathBuf],
    format: &str,
    fix: bool,
    dry_run: bool,
    only_automatic: bool,
    detectors: &[String],
) -> Result<bool> {
    let config = load_config(cli)?;
    let engine = Engine::new().with_config(config);
    let ids: Vec<&str> = detectors.iter().map(String::as_str).collect();

    let files = collect_files(paths)?;
    if files.is_empty() {
        return Err(miette!("no files to check"));
    }
    debug!(files = files.len(), "checking");

    let mut reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| check_file(&engine, path, &ids, fix, dry_run, only_automatic))
        .collect::<Result<Vec<_>>>()?;
    reports.sort_by(|a, b| a.path.cmp(&b.path));

    if fix && !dry_run {
        for report in reports.iter().filter(|r| r.fixed.is_some()) {
            let fixed = report.fixed.as_ref().unwrap();
            fs::write(&report.path, fixed).into_diagnostic()?;
            info!(path = %report.path.display(), "fixed");
        }
    }

    let clean = output::output_reports(&reports, format, fix)?;
    Ok(clean)
}

fn check_file(
    engine: &Engine,
    path: &Path,
    ids: &[&str],
    fix: bool,
    dry_run: bool,
    only_automatic: bool,
) -> Result<FileReport> {
    let text = fs::read_to_string(path)
        .map_err(|e| miette!("failed to read {}: {e}", path.display()))?;

    if fix {
        let outcome = engine
            .fix_to_convergence(&text, ids, MAX_FIX_PASSES)
            .map_err(|e| miette!("{e}"))?;
        let changed = outcome.text != text;
        // Report what is left after fixing.
        let residual = engine
            .detect(&outcome.text, ids, only_automatic)
            .map_err(|e| miette!("{e}"))?;
        Ok(FileReport {
            path: path.to_path_buf(),
            results: residual,
            fixed: changed.then_some(outcome.text),
            dry_run,
        })
    } else {
        let results = engine
            .detect(&text, ids, only_automatic)
            .map_err(|e| miette!("{e}"))?;
        Ok(FileReport {
            path: path.to_path_buf(),
            results,
            fixed: None,
            dry_run,
        })
    }
}

/// Expands the given paths into the list of files to check.
fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        if !path.is_dir() {
            return Err(miette!("no such file or directory: {}", path.display()));
        }
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.into_diagnostic()?;
            if !entry.file_type().is_file() {
                continue;
            }
            let has_wiki_extension = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| WIKI_EXTENSIONS.contains(&e));
            if has_wiki_extension {
                files.push(entry.into_path());
            }
        }
    }
    Ok(files)
}

fn run_detectors() {
    let engine = Engine::new();
    for (id, description) in engine.detector_catalogue() {
        println!("{id:<20} {description}");
    }
}

fn run_init(force: bool) -> Result<()> {
    if Path::new(DEFAULT_CONFIG_FILE).exists() && !force {
        return Err(miette!(
            "{DEFAULT_CONFIG_FILE} already exists (use --force to overwrite)"
        ));
    }
    let starter = serde_json::json!({
        "detectors": {
            "unclosed-tag": {
                "tags": ["nowiki", "ref", "gallery", "includeonly", "noinclude"]
            },
            "empty-tag": {},
            "suggestion": {
                "rules": []
            }
        }
    });
    fs::write(
        DEFAULT_CONFIG_FILE,
        serde_json::to_string_pretty(&starter).into_diagnostic()?,
    )
    .into_diagnostic()?;
    info!("wrote {DEFAULT_CONFIG_FILE}");
    Ok(())
}
