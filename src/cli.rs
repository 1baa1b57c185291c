use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "schema-audit",
    version,
    about = "JSON Schema quality and design-principle scoring CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score every schema in a directory and render the corpus report
    Analyze(AnalyzeCommand),
    /// Score a single schema file with its factor breakdown
    Score(ScoreCommand),
    /// Print the effective design-principle table
    Principles(PrinciplesCommand),
}

#[derive(Args)]
pub struct AnalyzeCommand {
    pub path: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Write the report here instead of stdout (overrides report.output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Exit with code 2 when the average quality score is below this value
    #[arg(long, value_parser = parse_quality_score)]
    pub fail_under: Option<f64>,
}

#[derive(Args)]
pub struct ScoreCommand {
    pub path: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct PrinciplesCommand {
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

fn parse_quality_score(raw: &str) -> Result<f64, String> {
    let value = raw
        .parse::<f64>()
        .map_err(|e| format!("invalid score '{raw}': {e}"))?;
    if (0.0..=5.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("score must be between 0.0 and 5.0, got {value}"))
    }
}
