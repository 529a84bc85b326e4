//! Use cases wiring the builder, the evaluator and the console together.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::application::error_ext::IoResultExt;
use crate::application::evaluator::{Evaluator, Verdict};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::{BuildReport, TreeBuilder};
use crate::infrastructure::Console;

/// Load one tree file, honoring `fail_fast` from the settings.
#[instrument(level = "debug", skip(settings))]
pub fn load_tree(path: &Path, settings: &Settings) -> ApplicationResult<BuildReport> {
    let report = TreeBuilder::new()
        .with_fail_fast(settings.fail_fast)
        .build_from_file(path)?;
    info!(
        "loaded {}: {} nodes, {} skipped",
        path.display(),
        report.tree.len(),
        report.issues.len()
    );
    Ok(report)
}

/// Load and evaluate each file in turn, separated by a blank line.
///
/// A file that cannot be loaded aborts the run; trees already evaluated
/// keep their verdicts only in the log.
#[instrument(level = "debug", skip(settings, console))]
pub fn run_files(
    paths: &[PathBuf],
    settings: &Settings,
    console: &mut dyn Console,
) -> ApplicationResult<Vec<Verdict>> {
    let evaluator = Evaluator::new(settings);
    let mut verdicts = Vec::with_capacity(paths.len());

    for (i, path) in paths.iter().enumerate() {
        let report = load_tree(path, settings)?;
        if i > 0 {
            console.say("").with_context("print separator")?;
        }
        let verdict = evaluator.evaluate(&report.tree, console)?;
        info!("{}: {:?}", path.display(), verdict.label);
        verdicts.push(verdict);
    }
    Ok(verdicts)
}

/// Load a file collecting every construction issue, regardless of `fail_fast`.
#[instrument(level = "debug")]
pub fn check_file(path: &Path) -> ApplicationResult<BuildReport> {
    Ok(TreeBuilder::new().build_from_file(path)?)
}

/// Serialize a loaded tree back into its line format.
#[instrument(level = "debug", skip(settings))]
pub fn export_file(path: &Path, settings: &Settings) -> ApplicationResult<Vec<String>> {
    let report = load_tree(path, settings)?;
    Ok(report.tree.to_source_lines()?)
}
