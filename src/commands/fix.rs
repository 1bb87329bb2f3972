//! Fix command
//!
//! Adds or updates the configured DocBlock header on every declaration in the
//! matching files. `--check` reports instead of writing; `--diff` prints a
//! unified diff per changed file.

use std::path::{Path, PathBuf};

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use similar::TextDiff;
use tracing::warn;

use crate::config::Config;
use crate::files::{self, FileResult};

/// Options for the fix command
#[derive(Debug, Clone)]
pub struct FixOptions {
    /// Files or directories to process
    pub paths: Vec<PathBuf>,
    /// Report files that would change without writing them
    pub check: bool,
    /// Print a unified diff for each changed file
    pub diff: bool,
    /// Directory relative manifest paths are resolved against
    pub base_dir: PathBuf,
    pub verbose: bool,
}

impl Default for FixOptions {
    fn default() -> Self {
        Self {
            paths: vec![PathBuf::from(".")],
            check: false,
            diff: false,
            base_dir: PathBuf::from("."),
            verbose: false,
        }
    }
}

/// Execute the fix command
pub fn execute_fix(options: FixOptions, config: Config) -> Result<()> {
    let header = config.resolve(&options.base_dir)?;

    let paths = if options.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        options.paths.clone()
    };
    let candidates = files::find_files(paths.as_slice(), &config.include, &config.exclude);

    if options.verbose {
        println!(
            "{} Scanning {} files...",
            style("→").cyan(),
            candidates.len()
        );
    }

    let progress = ProgressBar::new(candidates.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );

    let results: Vec<FileResult> = candidates
        .par_iter()
        .filter_map(|path| {
            let result = files::fix_file(path, &header);
            progress.inc(1);
            match result {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable file");
                    None
                }
            }
        })
        .collect();
    progress.finish_and_clear();

    let changed: Vec<&FileResult> = results.iter().filter(|r| r.modified()).collect();

    for result in &changed {
        if options.diff {
            print!("{}", unified_diff(&result.path, &result.original, &result.report.code));
        }

        if options.check {
            println!("{} {}", style("✗").red(), result.path.display());
        } else {
            result.write()?;
            println!("{} {}", style("✓").green(), result.path.display());
        }

        if options.verbose {
            for change in &result.report.changes {
                println!(
                    "    {} {} {}",
                    style(change.outcome).dim(),
                    change.kind,
                    change.name
                );
            }
        }
    }

    if options.check {
        if changed.is_empty() {
            println!(
                "{} All {} files have up-to-date headers",
                style("✓").green(),
                results.len()
            );
        } else {
            eprintln!(
                "{} {} of {} files need header changes",
                style("✗").red(),
                changed.len(),
                results.len()
            );
            std::process::exit(1);
        }
    } else {
        println!(
            "{} Fixed {} of {} files",
            style("✓").green(),
            changed.len(),
            results.len()
        );
    }

    Ok(())
}

/// Unified diff between the original and fixed contents of `path`
pub fn unified_diff(path: &Path, original: &str, fixed: &str) -> String {
    let name = path.display().to_string();
    TextDiff::from_lines(original, fixed)
        .unified_diff()
        .context_radius(3)
        .header(&format!("a/{name}"), &format!("b/{name}"))
        .to_string()
}
