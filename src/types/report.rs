use serde::Serialize;
use std::collections::BTreeMap;

pub const MAX_QUALITY_SCORE: f64 = 5.0;

/// Per-factor contributions to the quality score, each in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct QualityFactors {
    pub structure: f64,
    pub descriptions: f64,
    pub examples: f64,
    pub validation: f64,
    pub interoperability: f64,
}

impl QualityFactors {
    pub fn total(&self) -> f64 {
        (self.structure + self.descriptions + self.examples + self.validation + self.interoperability)
            .min(MAX_QUALITY_SCORE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaResult {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub quality_score: f64,
    pub quality_factors: QualityFactors,
    pub design_score: f64,
    pub principle_scores: BTreeMap<String, f64>,
    pub bff_compatible: bool,
    pub multi_root_support: bool,
    pub has_jsonld_context: bool,
    pub jsonld_score: f64,
    pub schema_size_kb: f64,
    pub max_quality_score: f64,
}

impl SchemaResult {
    pub fn failed(name: &str, error: String, size_bytes: u64) -> Self {
        Self {
            name: name.to_string(),
            error: Some(error),
            quality_score: 0.0,
            quality_factors: QualityFactors::default(),
            design_score: 0.0,
            principle_scores: BTreeMap::new(),
            bff_compatible: false,
            multi_root_support: false,
            has_jsonld_context: false,
            jsonld_score: 0.0,
            schema_size_kb: size_kb(size_bytes),
            max_quality_score: MAX_QUALITY_SCORE,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

pub fn size_kb(size_bytes: u64) -> f64 {
    (size_bytes as f64 / 1024.0 * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CorpusSummary {
    pub total_schemas: usize,
    pub valid_schemas: usize,
    pub avg_quality_score: f64,
    pub avg_design_score: f64,
    pub bff_compatibility_rate: f64,
    pub multi_root_support_rate: f64,
    pub jsonld_context_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusReport {
    #[serde(flatten)]
    pub summary: CorpusSummary,
    pub results: Vec<SchemaResult>,
}

impl CorpusReport {
    pub fn failed_count(&self) -> usize {
        self.summary.total_schemas - self.summary.valid_schemas
    }

    /// Results ordered by quality score, highest first. Ties keep input order.
    pub fn ranked_results(&self) -> Vec<&SchemaResult> {
        let mut ranked = self.results.iter().collect::<Vec<_>>();
        ranked.sort_by(|a, b| b.quality_score.total_cmp(&a.quality_score));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_kb_rounds_to_two_decimals() {
        assert_eq!(size_kb(0), 0.0);
        assert_eq!(size_kb(1024), 1.0);
        assert_eq!(size_kb(1500), 1.46);
    }

    #[test]
    fn failed_result_is_invalid_with_zero_scores() {
        let result = SchemaResult::failed("broken", "bad json".to_string(), 2048);
        assert!(!result.is_valid());
        assert_eq!(result.quality_score, 0.0);
        assert!(result.principle_scores.is_empty());
        assert_eq!(result.schema_size_kb, 2.0);
    }

    #[test]
    fn quality_total_is_capped() {
        let factors = QualityFactors {
            structure: 1.0,
            descriptions: 1.0,
            examples: 1.0,
            validation: 1.0,
            interoperability: 1.5,
        };
        assert_eq!(factors.total(), MAX_QUALITY_SCORE);
    }

    #[test]
    fn ranked_results_orders_by_quality_descending() {
        let mut low = SchemaResult::failed("low", "x".to_string(), 0);
        low.error = None;
        low.quality_score = 1.0;
        let mut high = low.clone();
        high.name = "high".to_string();
        high.quality_score = 4.2;
        let report = CorpusReport {
            summary: CorpusSummary::default(),
            results: vec![low, high],
        };
        let names = report
            .ranked_results()
            .iter()
            .map(|result| result.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["high", "low"]);
    }
}
