//! dpreval - command-line BOQ extraction and risk simulation.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use dpreval::{BoqLineItem, BoqSummary, EvaluationConfig, RiskConfig};

#[derive(Parser, Debug)]
#[command(name = "dpreval", version, about = "BOQ extraction and cost/schedule risk simulation for project reports")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract and summarize the bill of quantities of a document
    Boq {
        /// Document text file, or `-` for stdin
        file: PathBuf,
    },
    /// Run a Monte Carlo cost/schedule simulation
    Simulate {
        /// Planned total cost
        #[arg(long)]
        base_cost: f64,
        /// Planned duration in days
        #[arg(long, default_value_t = 365.0)]
        duration_days: f64,
        #[command(flatten)]
        overrides: RiskOverrides,
    },
    /// Extract the BOQ and simulate risk around its total
    Evaluate {
        /// Document text file, or `-` for stdin
        file: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        #[command(flatten)]
        overrides: RiskOverrides,
    },
}

#[derive(clap::Args, Debug)]
struct RiskOverrides {
    /// Coefficient of variation of cost
    #[arg(long)]
    cost_cv: Option<f64>,
    /// Coefficient of variation of duration
    #[arg(long)]
    duration_cv: Option<f64>,
    /// Number of samples
    #[arg(long)]
    samples: Option<usize>,
    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
}

impl RiskOverrides {
    fn apply(&self, config: &mut RiskConfig) {
        if let Some(cv) = self.cost_cv {
            config.cost_cv = cv;
        }
        if let Some(cv) = self.duration_cv {
            config.duration_cv = cv;
        }
        if let Some(samples) = self.samples {
            config.sample_count = samples;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Json,
    Markdown,
}

#[derive(Serialize)]
struct BoqOutput<'a> {
    items: &'a [BoqLineItem],
    summary: &'a BoqSummary,
}

fn read_document(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read document from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

fn load_config(path: Option<&Path>) -> Result<EvaluationConfig> {
    match path {
        Some(path) => EvaluationConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(EvaluationConfig::default()),
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Boq { file } => {
            let text = read_document(&file)?;
            let (items, summary) = dpreval::extract_and_summarize_boq_with(&text, &config.section);
            let output = BoqOutput {
                items: &items,
                summary: &summary,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Simulate {
            base_cost,
            duration_days,
            overrides,
        } => {
            overrides.apply(&mut config.risk);
            let result = dpreval::simulate_risk(base_cost, duration_days, &config.risk)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Evaluate {
            file,
            format,
            overrides,
        } => {
            overrides.apply(&mut config.risk);
            if let Some(samples) = overrides.samples {
                config.baseline.sample_count = samples;
            }
            let text = read_document(&file)?;
            let assessment = dpreval::evaluate_document(&text, &config)?;
            match format {
                OutputFormat::Json => println!("{}", assessment.to_json()?),
                OutputFormat::Markdown => println!("{}", assessment.to_markdown()),
            }
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
