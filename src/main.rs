//! Usability report generator
//!
//! Operator harness around the library: reads a JSON snapshot of survey
//! responses, runs the analysis, and writes the PDF report plus the
//! structured JSON result.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};
use tracing_subscriber::{self, EnvFilter};
use usability_core::report::BarChartRenderer;
use usability_core::{EngineConfig, ResponseRecord, SurveyId, SurveySet, UsabilityAnalyzer};

#[derive(Parser)]
#[command(name = "usability-report")]
#[command(about = "SUS scoring and feedback analysis for usability surveys", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Set log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Configuration file (TOML); USABILITY__* environment variables override it
    #[arg(short, long, env = "USABILITY_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one survey and write the report
    Report {
        /// JSON array of response records
        snapshot: PathBuf,

        /// Survey id to analyze (defaults to the first one in the snapshot)
        #[arg(short, long)]
        survey: Option<String>,

        /// Output PDF path
        #[arg(short, long, default_value = "usability-report.pdf")]
        output: PathBuf,

        /// Also write the structured result as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// List survey ids present in a snapshot
    Surveys {
        snapshot: PathBuf,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn read_snapshot(path: &Path) -> anyhow::Result<Vec<ResponseRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let records: Vec<ResponseRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;
    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // RUST_LOG wins when set; reqwest/hyper stay at warn otherwise
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "usability_core={level},usability_report={level},hyper=warn,reqwest=warn",
            level = level.as_str().to_lowercase()
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // Write logs to stderr, not stdout
        .init();

    debug!("usability-report v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = EngineConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Report {
            snapshot,
            survey,
            output,
            json,
        } => {
            let records = read_snapshot(&snapshot)?;
            let survey_id = match survey {
                Some(id) => SurveyId::new(id),
                None => match SurveySet::survey_ids(&records).into_iter().next() {
                    Some(id) => id,
                    None => bail!("Snapshot {} contains no records", snapshot.display()),
                },
            };

            let analyzer = UsabilityAnalyzer::new(config);
            let report = analyzer
                .generate_report(
                    &survey_id,
                    &records,
                    &BarChartRenderer::default(),
                    chrono::Utc::now(),
                )
                .await?;

            std::fs::write(&output, &report.document.bytes)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!(
                "Wrote {} ({} pages)",
                output.display(),
                report.document.page_count
            );

            if let Some(path) = json {
                let body = serde_json::to_string_pretty(&report.analysis)?;
                std::fs::write(&path, body)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("Wrote {}", path.display());
            }

            match report.analysis.aggregate.mean() {
                Some(mean) => println!(
                    "{}: SUS {:.1} ({}) from {} responses",
                    survey_id,
                    mean,
                    report
                        .analysis
                        .aggregate
                        .band()
                        .map(|band| band.to_string())
                        .unwrap_or_default(),
                    report.analysis.valid_responses()
                ),
                None => println!("{}: insufficient data", survey_id),
            }
            for recommendation in &report.analysis.recommendations {
                println!("  [{}] {}", recommendation.priority, recommendation.message);
            }
        }

        Commands::Surveys { snapshot } => {
            let records = read_snapshot(&snapshot)?;
            for id in SurveySet::survey_ids(&records) {
                let count = records.iter().filter(|r| r.survey_id == id).count();
                println!("{}\t{} responses", id, count);
            }
        }

        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}
