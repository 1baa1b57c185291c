mod analyze;
mod cli;
mod config;
mod error;
mod report;
mod scan;
mod types;

use crate::error::AuditError;
use crate::report::{OutputFormat, RenderContext};
use crate::types::report::CorpusReport;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const BLOCKING: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn output_format(format: &cli::ReportFormat) -> OutputFormat {
    match format {
        cli::ReportFormat::Json => OutputFormat::Json,
        cli::ReportFormat::Md => OutputFormat::Md,
    }
}

fn timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

fn print_summary(corpus: &CorpusReport) {
    let summary = &corpus.summary;
    println!("validation summary:");
    println!("  total schemas: {}", summary.total_schemas);
    println!("  average quality: {:.2}/5.0", summary.avg_quality_score);
    println!("  bff compatible: {:.1}%", summary.bff_compatibility_rate);
    println!("  multi-root support: {:.1}%", summary.multi_root_support_rate);
    println!("  json-ld context: {:.1}%", summary.jsonld_context_rate);
}

fn run_analyze(cmd: cli::AnalyzeCommand) -> Result<i32, AuditError> {
    if !cmd.path.exists() {
        return Err(AuditError::PathNotFound(cmd.path.display().to_string()));
    }

    let config = config::resolve_config(&cmd.path)?;
    let rubric = analyze::Rubric::from_config(&config)?;
    let principles = config.principles()?;

    let sources = scan::discover(&cmd.path, &config.scan_settings())?;
    let schemas = scan::load_all(&sources);
    let corpus = analyze::analyze_corpus(&schemas, &rubric);

    let generated_at = timestamp();
    let ctx = RenderContext {
        title: config.report_title(),
        generated_at: &generated_at,
        thresholds: rubric.thresholds,
        principles: &principles,
    };
    let rendered = report::render(&corpus, output_format(&cmd.format), &ctx)?;

    // An explicit --output is relative to the working directory; the
    // configured one is relative to the analyzed directory.
    let output: Option<PathBuf> = cmd
        .output
        .clone()
        .or_else(|| config.report_output().map(|path| cmd.path.join(path)));
    match output {
        Some(path) => {
            report::write_report(&path, &rendered)?;
            println!("report written: {}", path.display());
            print_summary(&corpus);
        }
        None => println!("{rendered}"),
    }

    let failed = corpus.failed_count();
    if failed > 0 {
        eprintln!("warning: {failed} schema(s) failed to load");
    }

    match cmd.fail_under {
        Some(minimum) if corpus.summary.avg_quality_score < minimum => {
            eprintln!(
                "error: average quality {:.3} is below --fail-under {:.3}",
                corpus.summary.avg_quality_score, minimum
            );
            Ok(exit_code::BLOCKING)
        }
        _ if failed > 0 => Ok(exit_code::WARNINGS),
        _ => Ok(exit_code::SUCCESS),
    }
}

fn run_score(cmd: cli::ScoreCommand) -> Result<i32, AuditError> {
    if !cmd.path.exists() {
        return Err(AuditError::PathNotFound(cmd.path.display().to_string()));
    }

    let root = cmd
        .path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let config = config::resolve_config(root)?;
    let rubric = analyze::Rubric::from_config(&config)?;
    let principles = config.principles()?;

    let schema = scan::load_schema(&cmd.path);
    tracing::info!(path = %schema.path.display(), bytes = schema.size_bytes, "scoring schema");
    let document = schema.document?;
    let result = analyze::analyze(&schema.name, Ok(&document), schema.size_bytes, &rubric);

    let generated_at = timestamp();
    let ctx = RenderContext {
        title: config.report_title(),
        generated_at: &generated_at,
        thresholds: rubric.thresholds,
        principles: &principles,
    };
    let rendered = report::render_schema(&result, output_format(&cmd.format), &ctx)?;
    println!("{rendered}");
    Ok(exit_code::SUCCESS)
}

fn run_principles(cmd: cli::PrinciplesCommand) -> Result<i32, AuditError> {
    if !cmd.path.exists() {
        return Err(AuditError::PathNotFound(cmd.path.display().to_string()));
    }
    let config = config::resolve_config(&cmd.path)?;
    let principles = config.principles()?;
    print!("{}", report::md::principle_table(&principles));
    Ok(exit_code::SUCCESS)
}

fn run() -> Result<i32, AuditError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "schema-audit starting");

    match cli.command {
        cli::Commands::Analyze(cmd) => run_analyze(cmd),
        cli::Commands::Score(cmd) => run_score(cmd),
        cli::Commands::Principles(cmd) => run_principles(cmd),
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
