pub mod aggregate;
pub mod jsonld;
pub mod principles;
pub mod quality;

use crate::error::AuditError;
use crate::scan::LoadedSchema;
use crate::types::config::{AuditConfig, Thresholds};
use crate::types::principle::{BFF_INTEGRATION, MULTI_ROOT_TRUST};
use crate::types::report::{size_kb, CorpusReport, SchemaResult, MAX_QUALITY_SCORE};
use crate::types::Document;
use principles::PrincipleSet;
use rayon::prelude::*;

pub use aggregate::aggregate;

/// Everything needed to score a schema, built once per run.
#[derive(Debug, Clone)]
pub struct Rubric {
    pub principles: PrincipleSet,
    pub thresholds: Thresholds,
}

impl Rubric {
    pub fn from_config(config: &AuditConfig) -> Result<Self, AuditError> {
        Ok(Self {
            principles: PrincipleSet::compile(&config.principles()?)?,
            thresholds: config.thresholds(),
        })
    }
}

/// Scores one schema. A load failure becomes an error result rather than an
/// `Err`, so one bad file never aborts a corpus pass.
pub fn analyze(
    name: &str,
    document: Result<&Document, &AuditError>,
    size_bytes: u64,
    rubric: &Rubric,
) -> SchemaResult {
    let document = match document {
        Ok(document) => document,
        Err(e) => return SchemaResult::failed(name, e.to_string(), size_bytes),
    };

    let principle_scores = match rubric.principles.evaluate(document) {
        Ok(scores) => scores,
        Err(e) => return SchemaResult::failed(name, e.to_string(), size_bytes),
    };
    let quality_factors = quality::quality_factors(document);
    let design_score = if principle_scores.is_empty() {
        0.0
    } else {
        principle_scores.values().sum::<f64>() / principle_scores.len() as f64
    };
    let principle = |key: &str| principle_scores.get(key).copied().unwrap_or(0.0);

    SchemaResult {
        name: name.to_string(),
        error: None,
        quality_score: quality_factors.total(),
        bff_compatible: principle(BFF_INTEGRATION) > rubric.thresholds.bff_compatible,
        multi_root_support: principle(MULTI_ROOT_TRUST) > rubric.thresholds.multi_root_support,
        has_jsonld_context: document.contains_key("@context"),
        jsonld_score: quality_factors.interoperability,
        quality_factors,
        design_score,
        principle_scores,
        schema_size_kb: size_kb(size_bytes),
        max_quality_score: MAX_QUALITY_SCORE,
    }
}

/// Scores every loaded schema in parallel and aggregates the results.
pub fn analyze_corpus(schemas: &[LoadedSchema], rubric: &Rubric) -> CorpusReport {
    let results = schemas
        .par_iter()
        .map(|schema| {
            analyze(
                &schema.name,
                schema.document.as_ref(),
                schema.size_bytes,
                rubric,
            )
        })
        .collect::<Vec<_>>();
    aggregate(results)
}
