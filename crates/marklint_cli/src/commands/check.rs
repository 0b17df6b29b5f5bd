//! The `check` command: lint files, optionally applying fixes.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use ignore::WalkBuilder;
use miette::{IntoDiagnostic, Result};
use rayon::prelude::*;
use tracing::{debug, warn};

use marklint_core::{
    Annotation, BuiltinEngine, FixOutcome, RuleConfig, RuleEngine, apply_fixes, fixable_count,
    fixed_summary, found_summary, project,
};

struct FileReport {
    path: PathBuf,
    annotations: Vec<Annotation>,
    outcome: Option<FixOutcome>,
}

pub(crate) fn run(paths: &[PathBuf], fix: bool, config_path: Option<&Path>) -> Result<ExitCode> {
    let config = match config_path {
        // An explicitly named config that fails to parse is a real error,
        // unlike discovered files which fall back silently.
        Some(path) => RuleConfig::from_file(path).into_diagnostic()?,
        None => {
            let cwd = std::env::current_dir().into_diagnostic()?;
            RuleConfig::load_or_default(Some(&cwd), None)
        }
    };

    let files = collect_markdown_files(paths);
    if files.is_empty() {
        warn!("No Markdown files found");
        return Ok(ExitCode::SUCCESS);
    }

    let reports: Vec<FileReport> = files
        .par_iter()
        .filter_map(|path| lint_file(path, &config, fix))
        .collect();

    let mut total = 0;
    let mut fixable = 0;
    let mut applied = 0;

    for report in &reports {
        for annotation in &report.annotations {
            println!(
                "{}:{}: {}",
                report.path.display(),
                annotation.line + 1,
                annotation.message
            );
        }
        total += report.annotations.len();
        fixable += fixable_count(&report.annotations);

        if let Some(outcome) = &report.outcome {
            if outcome.modified {
                fs::write(&report.path, &outcome.text).into_diagnostic()?;
            }
            applied += outcome.applied;
        }
    }

    println!("{}", found_summary(total, fixable));

    let remaining = if fix {
        println!("{}", fixed_summary(applied));
        total - fixable
    } else {
        total
    };

    if remaining > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn lint_file(path: &Path, config: &RuleConfig, fix: bool) -> Option<FileReport> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => {
            warn!("Skipping {}: {}", path.display(), e);
            return None;
        }
    };

    let violations = match BuiltinEngine.lint(&text, config) {
        Ok(v) => v,
        Err(e) => {
            warn!("Lint failed for {}: {}", path.display(), e);
            return None;
        }
    };

    debug!("{}: {} violations", path.display(), violations.len());

    let annotations = project(&violations);
    let outcome = fix.then(|| apply_fixes(&text, &violations));

    Some(FileReport {
        path: path.to_path_buf(),
        annotations,
        outcome,
    })
}

fn collect_markdown_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else {
            for entry in WalkBuilder::new(path).build().flatten() {
                let p = entry.path();
                if p.is_file() && is_markdown(p) {
                    files.push(p.to_path_buf());
                }
            }
        }
    }
    files.sort();
    files.dedup();
    files
}

fn is_markdown(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("md") | Some("markdown")
    )
}
