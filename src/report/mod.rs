pub mod json;
pub mod md;

use crate::error::{AuditError, Result};
use crate::types::config::Thresholds;
use crate::types::principle::PrincipleDefinition;
use crate::types::report::{CorpusReport, SchemaResult};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

/// Inputs the renderers need beyond the scores themselves.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub title: &'a str,
    pub generated_at: &'a str,
    pub thresholds: Thresholds,
    pub principles: &'a [PrincipleDefinition],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    High,
    Medium,
    Low,
}

impl Tier {
    pub fn of(quality_score: f64, thresholds: &Thresholds) -> Self {
        if quality_score >= thresholds.high_tier {
            Tier::High
        } else if quality_score >= thresholds.medium_tier {
            Tier::Medium
        } else {
            Tier::Low
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            Tier::High => "🟢",
            Tier::Medium => "🟡",
            Tier::Low => "🔴",
        }
    }
}

pub fn render(report: &CorpusReport, format: OutputFormat, ctx: &RenderContext<'_>) -> Result<String> {
    match format {
        OutputFormat::Json => json::to_json(report, ctx.generated_at).map_err(AuditError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report, ctx)),
    }
}

pub fn render_schema(
    result: &SchemaResult,
    format: OutputFormat,
    ctx: &RenderContext<'_>,
) -> Result<String> {
    match format {
        OutputFormat::Json => json::to_json_schema(result).map_err(AuditError::Json),
        OutputFormat::Md => Ok(md::to_markdown_schema(result, ctx)),
    }
}

pub fn write_report(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "report written");
    Ok(())
}
