//! CLI entrypoint for the stublibc conformance harness.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use stublibc_harness::report::{self, ConformanceReport};
use stublibc_harness::structured_log::{LogEmitter, utc_timestamp};
use stublibc_harness::verify;

/// Conformance tooling for the stublibc stub table.
#[derive(Debug, Parser)]
#[command(name = "stublibc-harness")]
#[command(about = "Inspect and verify the stublibc capability stub table")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Md,
    Json,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the stub table.
    Table {
        #[arg(long, value_enum, default_value = "md")]
        format: Format,
    },
    /// Print the SHA-256 digest of the stub table.
    Digest,
    /// Probe every stub and check it against the table.
    Verify {
        /// Output report path (JSON).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Output report path (markdown).
        #[arg(long)]
        markdown: Option<PathBuf>,
        /// JSONL structured log path.
        #[arg(long, default_value = "target/stublibc/conformance.log.jsonl")]
        log: PathBuf,
    },
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Table { format } => match format {
            Format::Md => print!("{}", report::table_markdown()),
            Format::Json => println!("{}", report::table_json()?),
        },
        Command::Digest => println!("{}", report::table_digest()),
        Command::Verify { report, markdown, log } => {
            let mut emitter = LogEmitter::to_file(&log, "stublibc-conformance")?;
            let summary = verify::run_gate(&mut emitter)?;
            let report_doc = ConformanceReport {
                title: String::from("stublibc Conformance Report"),
                timestamp: utc_timestamp(Utc::now()),
                table_digest: report::table_digest(),
                summary,
            };

            eprintln!(
                "Verification complete: total={}, passed={}, failed={}, skipped={}",
                report_doc.summary.total,
                report_doc.summary.passed,
                report_doc.summary.failed,
                report_doc.summary.skipped
            );
            eprintln!("Structured log written to {}", log.display());

            if let Some(path) = report {
                std::fs::write(&path, report_doc.to_json())?;
                eprintln!("JSON report written to {}", path.display());
            }
            if let Some(path) = markdown {
                std::fs::write(&path, report_doc.to_markdown())?;
                eprintln!("Markdown report written to {}", path.display());
            }

            if !report_doc.summary.all_passed() {
                for r in report_doc.summary.results.iter().filter(|r| !r.passed()) {
                    eprintln!("FAIL {}: {}", r.case_name, r.diff.as_deref().unwrap_or(""));
                }
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
