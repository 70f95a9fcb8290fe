//! Assurance CLI
//!
//! Scores a project's questionnaire against an assessment framework and
//! classifies its risks against the project's risk appetite.
//!
//! Usage:
//!   assurance validate --config framework.toml
//!   assurance report --config framework.toml --project project.json --profile enhanced
//!   assurance risks --project project.json --format csv

use anyhow::{Context, Result};
use assurance_engine::export::{MarkdownExporter, RiskCsvExporter};
use assurance_engine::project::ProjectRecords;
use assurance_engine::risk::{RiskSummary, RiskToleranceEvaluator};
use assurance_engine::{AssessmentConfig, AssessmentEngine, Profile};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "assurance", version, about = "Compliance and risk scoring")]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a framework configuration file
    Validate {
        /// Framework config (.toml or .json)
        #[arg(long)]
        config: PathBuf,
    },
    /// Produce a compliance report for a project
    Report {
        /// Framework config (.toml or .json)
        #[arg(long)]
        config: PathBuf,
        /// Project records (.json)
        #[arg(long)]
        project: PathBuf,
        /// Assurance profile to score against
        #[arg(long, default_value = "baseline")]
        profile: Profile,
        #[arg(long, value_enum, default_value_t = ReportFormat::Markdown)]
        format: ReportFormat,
    },
    /// Classify a project's risks against its appetite
    Risks {
        /// Project records (.json)
        #[arg(long)]
        project: PathBuf,
        #[arg(long, value_enum, default_value_t = RiskFormat::Csv)]
        format: RiskFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReportFormat {
    Json,
    Markdown,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RiskFormat {
    Json,
    Csv,
    Markdown,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Validate { config } => {
            let loaded = AssessmentConfig::load_from_file(&config)
                .with_context(|| format!("loading {}", config.display()))?;
            loaded.validate().context("configuration is invalid")?;
            println!(
                "{}: ok ({} objectives, {} requirements, {} questions)",
                config.display(),
                loaded.framework.objectives.len(),
                loaded.requirements.len(),
                loaded.questions.len()
            );
        }
        Commands::Report {
            config,
            project,
            profile,
            format,
        } => {
            let engine = AssessmentEngine::from_file(&config)
                .with_context(|| format!("loading {}", config.display()))?;
            let records = ProjectRecords::load_from_file(&project)
                .with_context(|| format!("loading {}", project.display()))?;

            let report = engine.report(&records.project_id, profile, &records.response_set());
            info!(project = %records.project_id, status = %report.status(), "report generated");

            match format {
                ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                ReportFormat::Markdown => print!("{}", MarkdownExporter::new().export_report(&report)),
            }
        }
        Commands::Risks { project, format } => {
            let records = ProjectRecords::load_from_file(&project)
                .with_context(|| format!("loading {}", project.display()))?;
            let classifications =
                RiskToleranceEvaluator::new(&records.appetite).classify_all(&records.risks);

            match format {
                RiskFormat::Json => {
                    let body = serde_json::json!({
                        "project_id": records.project_id,
                        "summary": RiskSummary::from_classifications(&classifications),
                        "risks": classifications,
                    });
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                RiskFormat::Csv => print!("{}", RiskCsvExporter::new().export(&classifications)?),
                RiskFormat::Markdown => {
                    print!("{}", MarkdownExporter::new().export_risks(&classifications))
                }
            }
        }
    }

    Ok(())
}
