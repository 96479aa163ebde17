//! mmgoget - go get a GitHub-hosted module pinned at the commit behind a tag
//!
//! Usage: `mmgoget [--comment] github.com/<org>/<repo>/<module_version>@<tag>`

use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use mmgoget::cli::CliArgs;
use mmgoget::error::AppError;
use mmgoget::orchestrator::Orchestrator;
use mmgoget::output::{create_formatter, OutputConfig};
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Usage errors share exit code 1 with every other failure
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                return ExitCode::FAILURE;
            }
        },
    };

    // Run the main logic and handle errors
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<()> {
    if args.verbose {
        eprintln!("mmgoget v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Manifest: {}", args.manifest.display());
    }

    let orchestrator = Orchestrator::new(args.clone()).map_err(with_context)?;
    let outcome = orchestrator.run().await.map_err(with_context)?;

    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet);
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    formatter.format(&outcome, &mut stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Attach the step's static context to an application error
fn with_context(err: AppError) -> anyhow::Error {
    match err.context() {
        Some(context) => anyhow::Error::new(err).context(context),
        None => err.into(),
    }
}
