// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Misti contributors

//! Misti - command-line front end for the Misti lexer
//!
//! ## Features
//!
//! - Interactive REPL with lexer-driven highlighting and history
//! - Async file loading with tokio
//! - Parallel tokenization of many files

mod config;
mod output;
mod repl;

use anyhow::Context;
use clap::Parser;
use misti_core::{Lexed, tokenize_all};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use config::Config;
use output::{Format, Outcome, Printer, Report};

#[derive(Parser)]
#[command(
    name = "misti",
    about = "Tokenizer and REPL for the Misti language",
    version
)]
struct Cli {
    /// Source files to tokenize
    files: Vec<PathBuf>,

    /// Tokenize code given on the command line
    #[arg(short = 'e', long = "eval", value_name = "CODE")]
    eval: Option<String>,

    /// Parse one primary expression instead of printing tokens
    #[arg(long)]
    parse: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Pretty)]
    format: Format,

    /// Configuration file (default: <config dir>/misti/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,

    /// Start interactive REPL
    #[arg(short = 'i', long = "interactive", alias = "repl")]
    interactive: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "misti=debug,misti_core=debug"
    } else {
        "misti=warn,misti_core=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = Config::load(cli.config.as_deref())?;

    if cli.interactive || (cli.eval.is_none() && cli.files.is_empty()) {
        return run_repl(&config);
    }

    let mut sources = Vec::new();
    if let Some(code) = cli.eval {
        sources.push(("<eval>".to_string(), Ok(code)));
    }
    sources.extend(read_files(&cli.files).await?);

    let reports: Vec<Report> = if cli.parse {
        sources.into_iter().map(|(name, text)| parse_report(name, text)).collect()
    } else {
        tokenize_reports(sources).await?
    };

    match cli.format {
        Format::Json => println!("{}", output::to_json(&reports)?),
        Format::Pretty => {
            let printer = Printer {
                color: config.color,
                show_positions: config.show_positions,
            };
            let headings = reports.len() > 1;
            for report in &reports {
                printer.print_report(report, headings);
            }
        }
    }

    if reports.iter().any(Report::has_problems) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Start the interactive REPL
fn run_repl(config: &Config) -> anyhow::Result<ExitCode> {
    let mut repl = repl::Repl::new(config).context("failed to initialize REPL")?;
    repl.run().context("REPL error")?;
    Ok(ExitCode::SUCCESS)
}

type Source = (String, Result<String, String>);

/// Reads every file concurrently, keeping the command-line order.
async fn read_files(paths: &[PathBuf]) -> anyhow::Result<Vec<Source>> {
    let mut tasks = tokio::task::JoinSet::new();
    for (index, path) in paths.iter().cloned().enumerate() {
        tasks.spawn(async move {
            let text = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| format!("failed to read {}: {e}", path.display()));
            (index, path.display().to_string(), text)
        });
    }

    let mut read = Vec::with_capacity(paths.len());
    while let Some(result) = tasks.join_next().await {
        read.push(result?);
    }
    read.sort_by_key(|(index, _, _)| *index);

    tracing::debug!(files = read.len(), "read source files");
    Ok(read.into_iter().map(|(_, name, text)| (name, text)).collect())
}

/// Tokenizes every readable source on the rayon pool.
async fn tokenize_reports(sources: Vec<Source>) -> anyhow::Result<Vec<Report>> {
    let texts: Vec<String> = sources
        .iter()
        .filter_map(|(_, text)| text.as_ref().ok().cloned())
        .collect();
    let mut lexed = tokio::task::spawn_blocking(move || tokenize_all(&texts))
        .await?
        .into_iter();

    let reports = sources
        .into_iter()
        .map(|(source, text)| match text {
            Ok(_) => {
                let Lexed {
                    tokens,
                    diagnostics,
                } = lexed.next().unwrap_or_else(|| misti_core::tokenize(""));
                Report {
                    source,
                    outcome: Outcome::Tokens(tokens),
                    diagnostics,
                }
            }
            Err(message) => Report {
                source,
                outcome: Outcome::Error(message),
                diagnostics: Vec::new(),
            },
        })
        .collect();

    Ok(reports)
}

fn parse_report(source: String, text: Result<String, String>) -> Report {
    let text = match text {
        Ok(text) => text,
        Err(message) => {
            return Report {
                source,
                outcome: Outcome::Error(message),
                diagnostics: Vec::new(),
            };
        }
    };

    let mut parser = misti_core::Parser::new(&text);
    let outcome = match parser.parse_expression() {
        Ok(expr) => Outcome::Expr(expr),
        Err(e) => Outcome::Error(e.to_string()),
    };
    Report {
        source,
        outcome,
        diagnostics: parser.into_diagnostics().into_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["misti", "-e", "1 2", "--parse", "--format", "json", "a.mt"]);
        assert_eq!(cli.eval.as_deref(), Some("1 2"));
        assert!(cli.parse);
        assert_eq!(cli.format, Format::Json);
        assert_eq!(cli.files, [PathBuf::from("a.mt")]);
        assert!(!cli.interactive);
    }

    #[test]
    fn test_parse_report() {
        let report = parse_report("<eval>".into(), Ok("(\"s\")".into()));
        assert!(matches!(report.outcome, Outcome::Expr(_)));
        assert!(!report.has_problems());

        let report = parse_report("<eval>".into(), Ok("(1".into()));
        assert!(matches!(report.outcome, Outcome::Error(_)));
    }

    #[tokio::test]
    async fn test_files_keep_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.mt");
        let second = dir.path().join("second.mt");
        std::fs::write(&first, "val x").unwrap();
        std::fs::write(&second, "\"open").unwrap();
        let missing = dir.path().join("missing.mt");

        let sources = read_files(&[first, missing, second]).await.unwrap();
        let reports = tokenize_reports(sources).await.unwrap();

        assert_eq!(reports.len(), 3);
        assert!(matches!(&reports[0].outcome, Outcome::Tokens(t) if t.len() == 3));
        assert!(matches!(reports[1].outcome, Outcome::Error(_)));
        assert!(matches!(&reports[2].outcome, Outcome::Tokens(t) if t[0].text == "open"));
        assert!(!reports[0].has_problems());
        assert!(reports[1].has_problems());
        assert!(reports[2].has_problems());
    }
}
