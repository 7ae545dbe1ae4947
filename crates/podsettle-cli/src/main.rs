//! podsettle - static pod failure correlation CLI
//!
//! ## Commands
//!
//! - `check`: correlate static pod failures against recovery events and
//!   report a single pass/fail result
//! - `extract`: parse one failure note and print the extracted fact

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};

use podsettle_core::config::parse_namespace_list;
use podsettle_core::{
    render_result_md, run_check_detailed, write_result_json, CheckConfig, CheckOutcome,
};
use podsettle_kube::KubeConnector;

#[derive(Parser)]
#[command(name = "podsettle")]
#[command(author = "Stevedores Org")]
#[command(version = podsettle_core::VERSION)]
#[command(about = "Checks whether static pod failures recovered before a run ended", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Correlate static pod failures with recovery events
    Check {
        /// TOML config file
        #[arg(short, long, env = "PODSETTLE_CONFIG")]
        config: Option<PathBuf>,

        /// Namespaces to scan (comma-separated or repeated); replaces the configured set
        #[arg(short, long = "namespace", value_delimiter = ',')]
        namespaces: Vec<String>,

        /// Kubeconfig context
        #[arg(long)]
        context: Option<String>,

        /// Write the JSON result artifact here
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write a markdown summary here
        #[arg(long)]
        summary: Option<PathBuf>,
    },

    /// Parse a single failure note and print the extracted fact
    Extract {
        /// Event note text
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    podsettle_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Check {
            config,
            namespaces,
            context,
            output,
            summary,
        } => {
            let config = build_config(config.as_ref(), &namespaces, context)?;
            cmd_check(&config, output.as_ref(), summary.as_ref()).await
        }
        Commands::Extract { text } => cmd_extract(&text),
    }
}

fn build_config(
    path: Option<&PathBuf>,
    namespaces: &[String],
    context: Option<String>,
) -> Result<CheckConfig> {
    let mut config = match path {
        Some(path) => {
            let mut config = CheckConfig::load(path)?;
            config.apply_env();
            config
        }
        None => CheckConfig::from_env(),
    };

    if !namespaces.is_empty() {
        config.namespaces = parse_namespace_list(&namespaces.join(","));
    }
    if context.is_some() {
        config.cluster.context = context;
    }

    config.validate().context("invalid check configuration")?;
    Ok(config)
}

async fn cmd_check(
    config: &CheckConfig,
    output: Option<&PathBuf>,
    summary: Option<&PathBuf>,
) -> Result<ExitCode> {
    info!(
        namespaces = ?config.namespaces,
        context = ?config.cluster.context,
        "running static pod check"
    );

    let outcome = run_check_detailed(&KubeConnector, config).await;
    print_outcome(&outcome);

    if let Some(path) = output {
        write_result_json(path, &outcome)?;
        println!("Result written to {}", path.display());
    }
    if let Some(path) = summary {
        std::fs::write(path, render_result_md(&outcome))
            .with_context(|| format!("write {:?}", path))?;
        println!("Summary written to {}", path.display());
    }

    Ok(if outcome.result.passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_outcome(outcome: &CheckOutcome) {
    let result = &outcome.result;
    let correlation = &outcome.correlation;

    println!("Test: {}", result.name);
    println!(
        "Status: {}",
        if result.passed { "✓ PASSED" } else { "✗ FAILED" }
    );
    println!(
        "Failures found: {} (unresolved: {}, resolved via legacy events: {})",
        correlation.verdicts.len(),
        correlation.unresolved_count(),
        correlation.resolved_via_secondary()
    );

    if !result.failure_detail.is_empty() {
        println!();
        for line in result.failure_detail.lines() {
            println!("  ✗ {}", line);
        }
    } else if !result.system_out.is_empty() {
        println!();
        for line in result.system_out.lines() {
            println!("  ! {}", line);
        }
    }
}

fn cmd_extract(text: &str) -> Result<ExitCode> {
    match podsettle_core::extract(text) {
        Ok(fact) => {
            println!("{}", serde_json::to_string_pretty(&fact)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{}", err);
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_check_flags() {
        let cli = Cli::try_parse_from([
            "podsettle",
            "--json",
            "check",
            "-n",
            "a,b",
            "--namespace",
            "c",
            "--context",
            "ci",
        ])
        .expect("parse");
        assert!(cli.json);
        match cli.command {
            Commands::Check {
                namespaces, context, ..
            } => {
                assert_eq!(namespaces, vec!["a", "b", "c"]);
                assert_eq!(context.as_deref(), Some("ci"));
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn build_config_applies_flag_overrides() {
        let config = build_config(None, &["x".to_string(), " y ".to_string()], Some("ctx".to_string()))
            .expect("config");
        assert_eq!(config.namespaces.iter().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(config.cluster.context.as_deref(), Some("ctx"));
    }

    #[test]
    fn extract_rejects_malformed_note() {
        let code = cmd_extract("not a failure note").expect("extract");
        assert_eq!(format!("{:?}", code), format!("{:?}", ExitCode::FAILURE));
    }
}
