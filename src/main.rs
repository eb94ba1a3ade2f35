//! CLI entry point for the mark sheet grader.
//!
//! Provides subcommands for grading a mark sheet, showing the grading scale,
//! and showing the expected input layout.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mark_grader::output::{render_outcome, render_preview, render_scale, render_summary, to_json};
use mark_grader::process_mark_sheet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const SAMPLE_INPUT: &str = "\
Student Name,Matric Number,CA,Exam
Alice,12345,30,45
Bob,23456,25,30
Charlie,34567,40,35
";

#[derive(Parser)]
#[command(name = "mark_grader")]
#[command(about = "Grade student mark sheets and summarize class results", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a mark sheet (.csv, .xlsx or .xls) and write the graded CSV
    Process {
        /// Mark sheet to grade
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Where to write the graded CSV (default: graded_<name>.csv next to FILE)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the full report as JSON instead of a text summary
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Number of graded records to preview
        #[arg(short, long, default_value_t = 3)]
        preview: usize,
    },
    /// Show the grading scale
    Scale,
    /// Show the expected input layout with sample rows
    Sample,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_logging()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            file,
            output,
            json,
            preview,
        } => {
            let report = process_mark_sheet(&file, output.as_deref())
                .with_context(|| format!("failed to grade {}", file.display()))?;

            if json {
                println!("{}", to_json(&report)?);
                return Ok(());
            }

            println!("{}", render_outcome(&file, &report.output, report.students.len()));
            if report.students.is_empty() {
                warn!(file = %file.display(), "No valid student records found");
                return Ok(());
            }

            println!();
            print!("{}", render_summary(&report.summary));
            println!();
            print!("{}", render_preview(&report.students, preview));
        }
        Commands::Scale => {
            print!("{}", render_scale());
        }
        Commands::Sample => {
            print!("{SAMPLE_INPUT}");
        }
    }

    info!("Done");
    Ok(())
}

/// Logging setup: colored stderr + JSON rolling log file.
///
/// The returned guard must be held until exit so buffered file logs are flushed.
fn init_logging() -> Result<WorkerGuard> {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/mark_grader.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("mark_grader.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(file_guard)
}
