//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::session::{check_file, export_file, load_tree, run_files};
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::TreeRender;
use crate::infrastructure::IoConsole;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(Commands::Completion { shell }) = &cli.command {
        return _completion(*shell);
    }

    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);

    match &cli.command {
        Some(Commands::Run { files }) => _run(files, &settings),
        Some(Commands::Show { file }) => _show(file, &settings),
        Some(Commands::Check { file }) => _check(file),
        Some(Commands::Export { file }) => _export(file, &settings),
        Some(Commands::Config) => _config(&settings),
        Some(Commands::Completion { .. }) => Ok(()),
        None => _run(&[], &settings),
    }
}

#[instrument(skip(settings))]
fn _run(files: &[PathBuf], settings: &Settings) -> CliResult<()> {
    let files = if files.is_empty() {
        settings.default_files.as_slice()
    } else {
        files
    };
    if files.is_empty() {
        return Err(CliError::Usage(
            "no tree files given and no default_files configured".into(),
        ));
    }

    let mut console = IoConsole::stdio();
    run_files(files, settings, &mut console)?;
    Ok(())
}

#[instrument(skip(settings))]
fn _show(file: &Path, settings: &Settings) -> CliResult<()> {
    let report = load_tree(file, settings)?;
    for issue in &report.issues {
        output::warning(issue);
    }

    output::info(&report.tree.to_tree_string());
    output::detail(&format!(
        "{} nodes, depth {}, {} answers",
        report.tree.len(),
        report.tree.depth(),
        report.tree.leaves().len()
    ));
    Ok(())
}

#[instrument]
fn _check(file: &Path) -> CliResult<()> {
    let report = check_file(file)?;
    if report.is_clean() {
        output::success(&format!("{}: {} nodes", file.display(), report.tree.len()));
        return Ok(());
    }

    output::header(&file.display());
    for issue in &report.issues {
        output::failure(issue);
    }
    Err(ApplicationError::ConstructionIssues {
        count: report.issues.len(),
    }
    .into())
}

#[instrument(skip(settings))]
fn _export(file: &Path, settings: &Settings) -> CliResult<()> {
    for line in export_file(file, settings)? {
        output::info(&line);
    }
    Ok(())
}

fn _config(settings: &Settings) -> CliResult<()> {
    if let Some(path) = global_config_path() {
        output::header(&format!("# global config: {}", path.display()));
    }
    output::info(&settings.to_toml()?);
    Ok(())
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
