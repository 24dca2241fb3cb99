use std::process::ExitCode;

use anyhow::Context;
use anyhow::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use tagcheck_conf::Settings;

use crate::args::GlobalArgs;
use crate::check::Check;
use crate::logging::init_tracing;

/// Check that the tags inside a template block are properly nested.
#[derive(Parser)]
#[command(name = "tagcheck")]
#[command(version, about)]
pub struct Cli {
    /// Files to check. If omitted, checks the configured default path.
    pub paths: Vec<Utf8PathBuf>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Parse CLI arguments and run the check.
///
/// Diagnostics never affect the exit status; only failing to load settings or
/// read a file does.
pub fn run(args: impl IntoIterator<Item = String>) -> Result<ExitCode> {
    let cli = Cli::try_parse_from(args).unwrap_or_else(|e| {
        e.exit();
    });

    let project_root = resolve_project_root()?;
    let settings = Settings::new(&project_root).context("Failed to load settings")?;

    let _guard = init_tracing(cli.global.log_level(settings.debug()));
    tracing::debug!(%project_root, "starting");

    Check::new(&cli.paths, &settings, &project_root).execute()?;

    Ok(ExitCode::SUCCESS)
}

fn resolve_project_root() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    Utf8PathBuf::from_path_buf(cwd)
        .map_err(|_| anyhow::anyhow!("Current directory is not valid UTF-8"))
}
