// SPDX-FileCopyrightText: 2026 Sylloprove Project Team
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Sylloprove CLI - Main binary entry point
//!
//! Generates formula sets, inspects single syllogisms, and runs the
//! distributed prover batch

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use sylloprove::store::{load_formulas, save_formulas};
use sylloprove::{
    generate_all, make_instance_from_uid, report, GenerateOptions, Orchestrator, ProverKind,
    RunConfig,
};
use tracing::info;

mod output;

use output::{OutputFormat, OutputFormatter};

/// Sylloprove - modal syllogism generation and multi-prover adjudication
#[derive(Parser)]
#[command(name = "sylloprove")]
#[command(version, about, long_about = None)]
#[command(author = "Sylloprove Project Team")]
struct Cli {
    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enumerate syllogisms and write the formula set
    Generate {
        /// Maximum number of syllogisms to keep
        #[arg(short, long)]
        limit: Option<usize>,

        /// Keep every N-th syllogism
        #[arg(long, default_value = "1")]
        stride: usize,

        /// Syllogisms dropped from the front
        #[arg(long, default_value = "0")]
        skip: usize,

        /// Keep structurally equal formulas
        #[arg(long)]
        no_dedup: bool,

        /// Output path of the formula set
        #[arg(short, long, default_value = "formulas.bin")]
        out: PathBuf,
    },

    /// Show one syllogism by UID
    Show {
        /// Seven-character UID, e.g. 1A0A0A0
        uid: String,
    },

    /// Run the prover batch over a formula set
    Run {
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of processes (ranks)
        #[arg(short = 'n', long)]
        processes: Option<usize>,

        /// Base timeout in seconds
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Formula set to read
        #[arg(long)]
        formulas: Option<PathBuf>,

        /// CSV file to write
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List available provers
    ListProvers {
        /// Show detailed information
        #[arg(short, long)]
        detailed: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let formatter = OutputFormatter::new(cli.format);

    match cli.command {
        Commands::Generate {
            limit,
            stride,
            skip,
            no_dedup,
            out,
        } => {
            let options = GenerateOptions {
                limit,
                stride,
                skip,
                dedup: !no_dedup,
            };
            generate_command(options, out, &formatter)?;
        }

        Commands::Show { uid } => {
            show_command(&uid, &formatter)?;
        }

        Commands::Run {
            config,
            processes,
            timeout,
            formulas,
            output,
        } => {
            run_command(config, processes, timeout, formulas, output, &formatter).await?;
        }

        Commands::ListProvers { detailed } => {
            list_provers_command(detailed, &formatter)?;
        }
    }

    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::{fmt, prelude::*};

    let filter = if verbose {
        EnvFilter::new("sylloprove=debug,info")
    } else {
        EnvFilter::new("sylloprove=info,warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

fn generate_command(options: GenerateOptions, out: PathBuf, formatter: &OutputFormatter) -> Result<()> {
    let pb = (!formatter.is_json()).then(|| create_progress_bar("Enumerating syllogisms..."));

    let formulas = generate_all(options).context("Failed to enumerate syllogisms")?;

    if let Some(pb) = &pb {
        pb.set_message(format!("Writing {} formulas...", formulas.len()));
    }
    save_formulas(&out, &formulas)
        .with_context(|| format!("Failed to write formula set: {}", out.display()))?;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    formatter.success(&format!(
        "Wrote {} syllogisms to {}",
        formulas.len(),
        out.display()
    ))?;
    Ok(())
}

fn show_command(uid: &str, formatter: &OutputFormatter) -> Result<()> {
    let syllogism =
        make_instance_from_uid(uid).with_context(|| format!("Invalid syllogism UID: {}", uid))?;
    formatter.output_syllogism(&syllogism)
}

async fn run_command(
    config_path: Option<PathBuf>,
    processes: Option<usize>,
    timeout: Option<u64>,
    formulas: Option<PathBuf>,
    output: Option<PathBuf>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let mut config = match &config_path {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => RunConfig::default(),
    };

    if processes.is_some() {
        config.processes = processes;
    }
    if let Some(timeout) = timeout {
        config.base_timeout = timeout;
    }
    if let Some(path) = formulas {
        config.formula_set_path = path;
    }
    if let Some(path) = output {
        config.output_path = path;
    }

    // Layout and roster problems must surface before the formula set is read.
    let orchestrator = Orchestrator::from_config(&config).context("Invalid run configuration")?;

    let formulas = load_formulas(&config.formula_set_path).with_context(|| {
        format!(
            "Failed to read formula set: {}",
            config.formula_set_path.display()
        )
    })?;

    info!("Loaded {} formulas", formulas.len());
    info!("Base timeout: {}s", config.base_timeout);
    info!("Logic: {} | Domain: {}", config.logic, config.domain);

    let started = Instant::now();
    let summary = orchestrator.run(formulas).await.context("Batch run failed")?;
    info!("Run finished in {:.2}s", started.elapsed().as_secs_f64());

    report::write_report_file(&config.output_path, &summary.engine_names, &summary.records)
        .with_context(|| format!("Failed to write report: {}", config.output_path.display()))?;

    formatter.output_summary(&summary)?;
    if summary.contradictions() > 0 {
        formatter.warning(&format!(
            "{} formulas need review: engines contradicted each other",
            summary.contradictions()
        ))?;
    }
    formatter.success(&format!("Results written to {}", config.output_path.display()))?;
    Ok(())
}

fn list_provers_command(detailed: bool, formatter: &OutputFormatter) -> Result<()> {
    formatter.header("Available Provers")?;
    formatter.info(&format!("Total: {} provers\n", ProverKind::ALL.len()))?;

    for kind in ProverKind::ALL {
        let logics: Vec<&str> = kind.supported_logics().iter().map(|l| l.as_str()).collect();
        let domains: Vec<&str> = kind.supported_domains().iter().map(|d| d.as_str()).collect();

        if detailed {
            formatter.section(kind.name())?;
            formatter.info(&format!("  Timeout modifier: {}", kind.timeout_modifier()))?;
            formatter.info(&format!("  Logics: {}", logics.join(", ")))?;
            formatter.info(&format!("  Domains: {}", domains.join(", ")))?;
            formatter.info("")?;
        } else {
            formatter.result(&format!(
                "{:10} - modifier {:.1} | logics {}",
                kind.name(),
                kind.timeout_modifier(),
                logics.join(" ")
            ))?;
        }
    }

    Ok(())
}

/// Create a progress bar for long-running operations
fn create_progress_bar(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
