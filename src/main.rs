/*============================================================
  Synavera Project: vsce-stats
  Module: vsce_stats::main
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Entry point for vsce-stats. Queries the VS Code marketplace
    through `vsce show --json` and emits one CSV record of the
    extension's statistics on stdout.

  Security / Safety Notes:
    Operates within user privileges. Executes `npx vsce` only;
    writes nothing but stdout and an optional log file.

  Dependencies:
    clap for CLI parsing, tokio for the subprocess runtime,
    chrono for the report timestamp.

  Operational Scope:
    Invoked by schedulers whose redirection appends each run's
    record to a time-series CSV log.

  Revision History:
    2026-10-15 COD  Authored vsce-stats runtime.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Result-first error handling with deterministic exits
    - Structured logging following Synavera cadence
    - Zero or one complete record per run
============================================================*/

mod config;
mod error;
mod logger;
mod marketplace;
mod model;
mod report;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::{ArgAction, Parser};

use config::ReportConfig;
use error::Result;
use logger::Logger;
use report::{audit_statistics, write_report};

/// Command-line arguments for vsce-stats.
#[derive(Debug, Parser)]
#[command(
    name = "vsce-stats",
    version,
    author = "Synavera Systems",
    about = "Report marketplace statistics for one extension as a CSV row",
    disable_help_flag = true
)]
struct Cli {
    /// Print the CSV header record before the data record.
    #[arg(short = 'h', long = "header", action = ArgAction::SetTrue)]
    print_header: bool,
    /// Append diagnostics to this log file.
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,
    /// Enable verbose logging to stderr.
    #[arg(long, action = ArgAction::SetTrue)]
    verbose: bool,
    /// Print help.
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = ReportConfig::default();
    let logger = match Logger::new(cli.log.clone(), cli.verbose) {
        Ok(logger) => logger.scoped(config.target),
        Err(err) => {
            eprintln!("[vsce-stats] {err}");
            return ExitCode::from(1);
        }
    };

    match run(&cli, &config, &logger).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = if err.is_fetch_error() { "FETCH" } else { "REPORT" };
            logger.error(code, err.to_string());
            ExitCode::from(1)
        }
    }
}

async fn run(cli: &Cli, config: &ReportConfig, logger: &Logger) -> Result<()> {
    if let Some(path) = logger.path() {
        logger.debug("INIT", format!("Appending diagnostics to {}", path.display()));
    }
    logger.info("INIT", format!("Querying {}", config.target));

    let result = marketplace::fetch(&config.tool, &config.target, interrupted(), logger).await?;

    if result.versions.is_empty() {
        logger.warn("VERSIONS", "Marketplace listed no versions; LatestVersion left empty");
    }
    if let Some(latest) = result.versions.first() {
        let published = latest
            .last_updated
            .map(|ts| ts.to_rfc3339())
            .unwrap_or_else(|| "unknown".into());
        logger.debug(
            "VERSIONS",
            format!("Latest version {} updated {published}", latest.version),
        );
    }

    let audit = audit_statistics(&result, config.statistics);
    if !audit.missing.is_empty() {
        logger.debug(
            "STATS",
            format!("Statistics absent from response: {}", audit.missing.join(", ")),
        );
    }
    if !audit.non_numeric.is_empty() {
        logger.warn(
            "STATTYPE",
            format!(
                "Non-numeric statistics reported verbatim: {}",
                audit.non_numeric.join(", ")
            ),
        );
    }

    let stdout = io::stdout();
    let mut sink = stdout.lock();
    write_report(
        &mut sink,
        &result,
        config.statistics,
        cli.print_header,
        Utc::now(),
    )?;

    logger.info("COMPLETE", "Report record written.");
    Ok(())
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed.
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
