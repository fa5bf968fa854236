//! Vouch response checker CLI
//!
//! Checks a recorded HTTP response body (plus status and headers given on the
//! command line) against a JSON or YAML expectation file.
//!
//! Usage:
//!   vouch --expect <file> --actual <file> [OPTIONS]

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use vouch::{ErrorKind, HeaderSet, MatchError, MatchMode};
use vouch_check::{check_files, CheckOptions, CheckReport};

// ANSI color codes
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Vouch Response Checker
#[derive(Parser, Debug)]
#[command(name = "vouch")]
#[command(
    author,
    version,
    about = "Check a recorded HTTP response against an expectation file"
)]
struct Args {
    /// Expectation file (.json, .yaml or .yml)
    #[arg(short, long)]
    expect: PathBuf,

    /// Recorded response body
    #[arg(short, long)]
    actual: PathBuf,

    /// Recorded status code; the status check is skipped when absent
    #[arg(short, long)]
    status: Option<u16>,

    /// Recorded header as "Name: value" (repeatable)
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    headers: Vec<(String, String)>,

    /// Override the match mode declared by the expectation
    #[arg(short, long)]
    mode: Option<ModeArg>,

    /// Override the root of reported field paths
    #[arg(long)]
    root: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Exact,
    Subset,
}

impl From<ModeArg> for MatchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Exact => MatchMode::Exact,
            ModeArg::Subset => MatchMode::Subset,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected \"Name: value\", got {raw:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("header name is empty in {raw:?}"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(report) if report.passed() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(e) => {
            eprintln!("{RED}{BOLD}error:{RESET} {e:#}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<CheckReport> {
    let headers: HeaderSet = args.headers.iter().cloned().collect();
    if args.status.is_none() {
        warn!("no --status given, skipping the status check");
    }

    let options = CheckOptions {
        mode: args.mode.map(MatchMode::from),
        root: args.root.clone(),
        ignore_status: args.status.is_none(),
    };

    let report = check_files(
        &args.expect,
        &args.actual,
        args.status.unwrap_or_default(),
        headers,
        &options,
    )
    .with_context(|| {
        format!(
            "checking {} against {}",
            args.actual.display(),
            args.expect.display()
        )
    })?;

    match args.output {
        OutputFormat::Json => print_report_json(&report)?,
        OutputFormat::Text => print_report(&report, args),
    }

    Ok(report)
}

fn print_report_json(report: &CheckReport) -> Result<()> {
    let output = serde_json::to_string_pretty(report).context("serializing report")?;
    println!("{output}");
    Ok(())
}

fn print_report(report: &CheckReport, args: &Args) {
    println!("{BOLD}{CYAN}Vouch Response Checker{RESET}");
    println!("{DIM}{RULE}{RESET}");
    println!("{DIM}Expectation:{RESET} {CYAN}{}{RESET}", args.expect.display());
    println!("{DIM}Response:{RESET}    {CYAN}{}{RESET}", args.actual.display());
    println!("{DIM}Mode:{RESET}        {BOLD}{}{RESET}\n", report.mode);

    if report.passed() {
        println!("{GREEN}{BOLD}No mismatches found!{RESET}");
    } else {
        for error in &report.errors {
            print_error(error, args.verbose);
        }
        println!();
    }

    // Summary
    println!("{DIM}{RULE}{RESET}");
    println!("{BOLD}{CYAN}Summary{RESET}");
    println!("{DIM}{RULE}{RESET}");

    if report.passed() {
        println!("  {GREEN}Mismatches:{RESET} {BOLD}{GREEN}0{RESET}");
    } else {
        println!(
            "  {RED}Mismatches:{RESET} {BOLD}{RED}{}{RESET}",
            report.errors.len()
        );
        for (kind, count) in &report.counts {
            println!("    {DIM}{}:{RESET} {BOLD}{count}{RESET}", kind.label());
        }
    }

    println!();

    if report.passed() {
        println!("{GREEN}{BOLD}Response matches expectation{RESET}");
    } else {
        println!("{RED}{BOLD}Response does not match expectation{RESET}");
    }
}

fn print_error(error: &MatchError, verbose: bool) {
    let color = kind_color(error.kind);
    let marker = format!("{color}|{RESET}");

    let location = if error.path.is_empty() {
        String::new()
    } else {
        format!("{DIM}[{RESET}{CYAN}{}{RESET}{DIM}]{RESET} ", error.path)
    };

    println!(
        "  {marker} {location}{BOLD}{color}{}{RESET}: {}",
        error.kind.label(),
        error.detail
    );

    if verbose {
        if let Some(expected) = &error.expected {
            println!("  {marker}   {DIM}expected:{RESET} {expected}");
        }
        if let Some(actual) = &error.actual {
            println!("  {marker}   {DIM}actual:{RESET}   {actual}");
        }
    }
}

fn kind_color(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::MissingHeader | ErrorKind::HeaderValueMismatch | ErrorKind::WrongStatus => {
            YELLOW
        }
        _ => RED,
    }
}
