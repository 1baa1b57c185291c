use crate::types::report::{CorpusReport, CorpusSummary, SchemaResult};

/// Corpus statistics over the valid results only. Every average and rate is
/// 0.0 when nothing loaded.
pub fn aggregate(results: Vec<SchemaResult>) -> CorpusReport {
    let valid = results.iter().filter(|result| result.is_valid()).collect::<Vec<_>>();
    let mut summary = CorpusSummary {
        total_schemas: results.len(),
        valid_schemas: valid.len(),
        ..CorpusSummary::default()
    };

    if !valid.is_empty() {
        let count = valid.len() as f64;
        let rate = |predicate: fn(&SchemaResult) -> bool| {
            valid.iter().filter(|result| predicate(result)).count() as f64 / count * 100.0
        };
        summary.avg_quality_score = valid.iter().map(|r| r.quality_score).sum::<f64>() / count;
        summary.avg_design_score = valid.iter().map(|r| r.design_score).sum::<f64>() / count;
        summary.bff_compatibility_rate = rate(|r| r.bff_compatible);
        summary.multi_root_support_rate = rate(|r| r.multi_root_support);
        summary.jsonld_context_rate = rate(|r| r.has_jsonld_context);
    }

    tracing::info!(
        total = summary.total_schemas,
        valid = summary.valid_schemas,
        avg_quality = summary.avg_quality_score,
        "corpus aggregated"
    );

    CorpusReport { summary, results }
}
