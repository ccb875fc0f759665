//! lintrelay binary: lint the workspace and report the result as a check run.
//!
//! The run is a straight line: create the check run as `in_progress`, lint,
//! translate, patch the check run to `completed`, exit. Exit codes: 0 for a
//! clean run, 78 when lint errors failed the check, 1 for any tooling error.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;

use lintrelay_core::{render_console_report, translate};
use lintrelay_engine::run_lint;
use lintrelay_github::{CheckRunClient, CheckRunHandle};
use lintrelay_types::{
    Conclusion, CHECK_NAME, DEFAULT_CONSOLE_LIMIT, DEFAULT_MAX_ANNOTATIONS,
};

mod context;

use context::RunContext;

/// Exit code for "the lint failed" as opposed to "the tooling failed" (1).
const EXIT_LINT_FAILURE: i32 = 78;

#[derive(Parser)]
#[command(name = "lintrelay")]
#[command(about = "Lint the workspace and report results as a check run", long_about = None)]
pub struct Cli {
    /// Comma-separated files or directories to lint (overrides INPUT_FILES).
    #[arg(long)]
    files: Option<String>,

    /// Comma-separated extension filters, e.g. ".js,.jsx" (overrides INPUT_EXTENSIONS).
    #[arg(long)]
    extensions: Option<String>,

    /// Publish warnings as annotations too (overrides INPUT_WARNINGS).
    #[arg(long)]
    warnings: bool,

    /// Path to a rule configuration file. If omitted, uses lintrelay.toml
    /// at the workspace root when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// API base URL (overrides GITHUB_API_URL).
    #[arg(long)]
    api_url: Option<String>,

    /// Maximum annotations published with the check run.
    #[arg(long, default_value_t = DEFAULT_MAX_ANNOTATIONS)]
    max_annotations: usize,

    /// Maximum findings echoed to the console per severity group.
    #[arg(long, default_value_t = DEFAULT_CONSOLE_LIMIT)]
    console_limit: usize,

    /// Enable verbose (info-level) logging to stderr.
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Enable debug-level logging to stderr.
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    match run_with_args(std::env::args_os()) {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            eprintln!("{err:?}");
            ExitCode::from(1)
        }
    }
}

fn run_with_args<I, T>(args: I) -> Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    init_logging(cli.verbose, cli.debug);

    let ctx = RunContext::resolve(&cli)?;
    run(&ctx)
}

/// Initialize tracing/logging based on CLI flags.
fn init_logging(verbose: bool, debug: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn run(ctx: &RunContext) -> Result<i32> {
    let client = CheckRunClient::new(
        &ctx.api_url,
        &ctx.token,
        &ctx.owner,
        &ctx.repo,
        CHECK_NAME,
        &ctx.head_sha,
    )
    .context("build check-run client")?;

    // No check run exists until this succeeds, so a failure here is terminal
    // with nothing to complete remotely.
    let handle = client.create().context("create check run")?;

    match lint_and_complete(ctx, &client, &handle) {
        Ok(code) => Ok(code),
        Err(err) => {
            // Leave nothing stuck in_progress. Best-effort, log-only: the run
            // already failed and exits 1 for the original error either way.
            if let Err(update_err) = client.complete(&handle, Conclusion::Failure, None) {
                warn!(
                    "could not mark check run {} as failed: {update_err}",
                    handle.id()
                );
            }
            Err(err)
        }
    }
}

fn lint_and_complete(
    ctx: &RunContext,
    client: &CheckRunClient,
    handle: &CheckRunHandle,
) -> Result<i32> {
    let report = run_lint(&ctx.workspace, &ctx.lint_options()).context("run lint engine")?;

    let translation = translate(
        &report.diagnostics,
        report.counts,
        &ctx.workspace,
        ctx.include_warnings,
        &ctx.caps,
    )?;

    println!("{}", translation.output.summary);
    let console = render_console_report(&translation, ctx.caps.console_limit);
    if !console.is_empty() {
        print!("{console}");
    }

    client
        .complete(handle, translation.conclusion, Some(&translation.output))
        .context("complete check run")?;

    Ok(match translation.conclusion {
        Conclusion::Failure => EXIT_LINT_FAILURE,
        Conclusion::Success => 0,
    })
}
