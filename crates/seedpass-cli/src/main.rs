mod logging;
mod summary;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use seedpass_core::{AugmentError, AugmentOptions, DEFAULT_INPUT, DEFAULT_OUTPUT, augment_with_options};
use thiserror::Error;

use logging::{LogFormat, init_logging};
use summary::{RunSummary, write_summary};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Augment(#[from] AugmentError),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "seedpass", version, about = "Adds derived password columns to seed SQL dumps")]
struct Cli {
    /// Log output format on stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rewrite the users inserts of a dump with a password column.
    Augment(AugmentArgs),
}

#[derive(Args, Debug)]
struct AugmentArgs {
    /// SQL dump to read.
    #[arg(long, default_value = DEFAULT_INPUT)]
    input: PathBuf,
    /// Destination for the augmented dump.
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
    /// Check that each pass_hash is SHA-256 of the derived password.
    #[arg(long, default_value_t = false)]
    verify_hashes: bool,
    /// Optional path for a JSON run summary.
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = init_logging(cli.log_format).and_then(|()| match cli.command {
        Command::Augment(args) => run_augment(args),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_augment(args: AugmentArgs) -> Result<(), CliError> {
    let AugmentArgs {
        input,
        output,
        verify_hashes,
        report,
    } = args;

    let started_at = chrono::Utc::now();
    let timer = Instant::now();

    let options = AugmentOptions {
        input,
        output,
        verify_hashes,
    };
    let augment_report = augment_with_options(&options)?;

    if let Some(check) = &augment_report.hash_check {
        tracing::info!(
            event = "hash_check_finished",
            checked = check.checked,
            matched = check.matched,
            mismatched = check.mismatched
        );
    }

    let duration_ms = u64::try_from(timer.elapsed().as_millis()).unwrap_or(u64::MAX);
    tracing::info!(
        event = "run_finished",
        status = "success",
        headers_rewritten = augment_report.headers_rewritten,
        tuples_augmented = augment_report.tuples_augmented,
        duration_ms = duration_ms
    );

    if let Some(path) = report {
        let summary = RunSummary {
            started_at,
            duration_ms,
            input: options.input,
            output: options.output,
            report: augment_report,
        };
        write_summary(&path, &summary)?;
        tracing::info!(event = "summary_written", path = %path.display());
    }

    Ok(())
}
