//! veridocx CLI - thesis submission layout checker

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use veridocx::{
    report, validate_bytes_with_profile, Severity, ValidationProfile, ValidationReport,
};

#[derive(Parser)]
#[command(name = "veridocx")]
#[command(version)]
#[command(about = "Validate DOCX thesis submissions against layout rules", long_about = None)]
struct Cli {
    /// Profile override file (JSON, partial profiles allowed)
    #[arg(long, global = true, value_name = "FILE")]
    profile: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a single document and print the checklist
    Check {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the JSON report instead of the checklist
        #[arg(long)]
        json: bool,

        /// Compact JSON (implies --json)
        #[arg(long)]
        compact: bool,
    },

    /// Validate every .docx file in a directory
    Batch {
        /// Directory containing submissions
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Print one JSON report per file
        #[arg(long)]
        json: bool,
    },

    /// Print the effective validation profile as JSON
    Profile,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(all_passed) => {
            if all_passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let profile = load_profile(cli.profile.as_deref())?;

    match cli.command {
        Commands::Check {
            input,
            json,
            compact,
        } => {
            let result = check_file(&input, &profile)
                .with_context(|| format!("could not process {}", input.display()))?;
            if json || compact {
                let format = if compact {
                    report::JsonFormat::Compact
                } else {
                    report::JsonFormat::Pretty
                };
                println!("{}", report::to_json(&result, format)?);
            } else {
                print_checklist(&input, &result);
            }
            Ok(result.ok)
        }
        Commands::Batch { dir, json } => batch(&dir, &profile, json),
        Commands::Profile => {
            println!("{}", serde_json::to_string_pretty(&profile)?);
            Ok(true)
        }
    }
}

fn load_profile(path: Option<&Path>) -> Result<ValidationProfile> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("cannot read profile {}", path.display()))?;
            let profile = serde_json::from_str(&text)
                .with_context(|| format!("invalid profile {}", path.display()))?;
            log::debug!("loaded profile override from {}", path.display());
            Ok(profile)
        }
        None => Ok(ValidationProfile::default()),
    }
}

fn check_file(path: &Path, profile: &ValidationProfile) -> Result<ValidationReport> {
    let data = fs::read(path)?;
    Ok(validate_bytes_with_profile(&data, profile)?)
}

fn print_checklist(path: &Path, result: &ValidationReport) {
    println!("{}", path.display().to_string().bold());
    println!(
        "  estimated pages: {}",
        result.page_count_estimate.to_string().cyan()
    );

    if result.diagnostics.is_empty() {
        println!("  {} all checks passed", "✓".green());
    }
    for diagnostic in &result.diagnostics {
        let (mark, severity) = match diagnostic.severity {
            Severity::Error => ("✗".red(), "error".red()),
            Severity::Warning => ("!".yellow(), "warning".yellow()),
        };
        let location = diagnostic
            .paragraph_index
            .map(|i| format!(" (paragraph {i})"))
            .unwrap_or_default();
        println!(
            "  {mark} [{severity}] {}: {}{location}",
            diagnostic.rule, diagnostic.message
        );
    }

    let verdict = if result.ok {
        "PASS".green().bold()
    } else {
        "FAIL".red().bold()
    };
    println!(
        "  {verdict} ({} error(s), {} warning(s))",
        result.error_count(),
        result.warning_count()
    );
}

fn batch(dir: &Path, profile: &ValidationProfile, json: bool) -> Result<bool> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("cannot read directory {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case("docx"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();

    if files.is_empty() {
        println!("no .docx files in {}", dir.display());
        return Ok(true);
    }

    let bar = ProgressBar::new(files.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    // Each run is a pure function of the bytes; fan out across files.
    let results: Vec<(PathBuf, Result<ValidationReport>)> = files
        .par_iter()
        .map(|path| {
            let result = check_file(path, profile);
            bar.inc(1);
            (path.clone(), result)
        })
        .collect();
    bar.finish_and_clear();

    let mut passed = 0usize;
    let mut failed = 0usize;
    let mut fatal = 0usize;

    for (path, result) in &results {
        match result {
            Ok(result) => {
                if json {
                    println!("{}", report::to_json(result, report::JsonFormat::Compact)?);
                } else {
                    print_checklist(path, result);
                }
                if result.ok {
                    passed += 1;
                } else {
                    failed += 1;
                }
            }
            Err(e) => {
                fatal += 1;
                eprintln!(
                    "{} could not process {}: {e:#}",
                    "✗".red(),
                    path.display()
                );
            }
        }
    }

    println!(
        "{}: {} passed, {} failed, {} could not be processed",
        "summary".bold(),
        passed.to_string().green(),
        failed.to_string().red(),
        fatal
    );

    Ok(failed == 0 && fatal == 0)
}
