use super::{RenderContext, Tier};
use crate::types::principle::PrincipleDefinition;
use crate::types::report::{CorpusReport, SchemaResult, MAX_QUALITY_SCORE};

const METHODOLOGY: [&str; 5] = [
    "**Required JSON Schema fields**: $schema, type, properties",
    "**Property descriptions**: every property has a description",
    "**Examples provided**: schema-level and property-level examples",
    "**Schema validation metadata**: patterns, constraints, required fields, enums and formats",
    "**JSON-LD context for interoperability**: @context with standard vocabularies, https $id",
];

pub fn to_markdown(report: &CorpusReport, ctx: &RenderContext<'_>) -> String {
    let summary = &report.summary;
    let mut output = String::new();
    output.push_str(&format!("# {}\n\n", ctx.title));
    output.push_str(&format!("**Generated**: {}\n\n", ctx.generated_at));

    output.push_str("## Summary\n\n");
    output.push_str(&format!(
        "- **Total Schemas**: {}\n- **Valid Schemas**: {}\n- **Average Quality Score**: {:.3}/{:.1}\n- **Average Design Score**: {:.3}/1.0\n- **BFF Compatibility**: {:.1}%\n- **Multi-Root Support**: {:.1}%\n- **JSON-LD Context Support**: {:.1}%\n\n",
        summary.total_schemas,
        summary.valid_schemas,
        summary.avg_quality_score,
        MAX_QUALITY_SCORE,
        summary.avg_design_score,
        summary.bff_compatibility_rate,
        summary.multi_root_support_rate,
        summary.jsonld_context_rate
    ));

    output.push_str("## Quality Scoring Methodology\n\n");
    output.push_str("Schemas are scored on 5 factors (1.0 point each, max 5.0):\n\n");
    for (index, line) in METHODOLOGY.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", index + 1, line));
    }
    output.push('\n');

    output.push_str("## Design Principles Coverage\n\n");
    output.push_str(&principle_table(ctx.principles));
    output.push('\n');

    output.push_str("## Detailed Results\n\n");
    if report.results.is_empty() {
        output.push_str("- none\n");
    }
    for result in report.ranked_results() {
        output.push_str(&schema_section(result, ctx));
        output.push('\n');
    }

    output
}

/// Single-schema card with the per-factor and per-principle breakdown.
pub fn to_markdown_schema(result: &SchemaResult, ctx: &RenderContext<'_>) -> String {
    let mut output = schema_section(result, ctx);
    if !result.is_valid() {
        return output;
    }

    let factors = &result.quality_factors;
    output.push_str("\n#### Quality Factors\n\n");
    output.push_str(&format!(
        "- structure: {:.2}\n- descriptions: {:.2}\n- examples: {:.2}\n- validation: {:.2}\n- interoperability: {:.2}\n",
        factors.structure,
        factors.descriptions,
        factors.examples,
        factors.validation,
        factors.interoperability
    ));

    output.push_str("\n#### Design Principles\n\n");
    for principle in ctx.principles {
        let score = result
            .principle_scores
            .get(&principle.name)
            .copied()
            .unwrap_or(0.0);
        output.push_str(&format!("- {}: {:.2}\n", principle.name, score));
    }
    output
}

fn schema_section(result: &SchemaResult, ctx: &RenderContext<'_>) -> String {
    if let Some(error) = &result.error {
        return format!("### ❌ {} - ERROR\n- **Error**: {}\n", result.name, error);
    }

    let tier = Tier::of(result.quality_score, &ctx.thresholds);
    format!(
        "### {} {}\n- **Quality Score**: {:.2}/{:.1}\n- **Design Score**: {:.2}/1.0\n- **BFF Compatible**: {}\n- **Multi-Root Support**: {}\n- **JSON-LD Context**: {} (Score: {:.2})\n- **Schema Size**: {:.2} KB\n",
        tier.marker(),
        result.name,
        result.quality_score,
        MAX_QUALITY_SCORE,
        result.design_score,
        check(result.bff_compatible),
        check(result.multi_root_support),
        check(result.has_jsonld_context),
        result.jsonld_score,
        result.schema_size_kb
    )
}

pub fn principle_table(principles: &[PrincipleDefinition]) -> String {
    if principles.is_empty() {
        return "- none\n".to_string();
    }
    let mut output = String::from("| Principle | Strategy | Checks | Weight |\n|---|---|---|---|\n");
    for principle in principles {
        output.push_str(&format!(
            "| {} | {} | {} | {:.2} |\n",
            principle.name,
            principle.strategy.kind(),
            principle.strategy.entries().join(", "),
            principle.weight
        ));
    }
    output
}

fn check(flag: bool) -> &'static str {
    if flag {
        "✅"
    } else {
        "❌"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::aggregate;
    use crate::types::config::Thresholds;
    use crate::types::principle::default_principles;
    use crate::types::report::QualityFactors;
    use std::collections::BTreeMap;

    fn result(name: &str, quality: f64) -> SchemaResult {
        SchemaResult {
            name: name.to_string(),
            error: None,
            quality_score: quality,
            quality_factors: QualityFactors::default(),
            design_score: 0.4,
            principle_scores: BTreeMap::from([("bff_integration".to_string(), 0.75)]),
            bff_compatible: true,
            multi_root_support: false,
            has_jsonld_context: true,
            jsonld_score: 0.8,
            schema_size_kb: 1.46,
            max_quality_score: MAX_QUALITY_SCORE,
        }
    }

    fn with_ctx<T>(f: impl FnOnce(&RenderContext<'_>) -> T) -> T {
        let principles = default_principles();
        let ctx = RenderContext {
            title: "Schema Validation Report",
            generated_at: "2026-10-19T12:00:00",
            thresholds: Thresholds::default(),
            principles: &principles,
        };
        f(&ctx)
    }

    #[test]
    fn markdown_report_contains_sections() {
        let report = aggregate(vec![result("Identity", 4.2)]);
        let rendered = with_ctx(|ctx| to_markdown(&report, ctx));
        assert!(rendered.starts_with("# Schema Validation Report"));
        assert!(rendered.contains("**Generated**: 2026-10-19T12:00:00"));
        assert!(rendered.contains("## Summary"));
        assert!(rendered.contains("- **Average Quality Score**: 4.200/5.0"));
        assert!(rendered.contains("- **BFF Compatibility**: 100.0%"));
        assert!(rendered.contains("| multi_root_trust | required_properties |"));
        assert!(rendered.contains("### 🟢 Identity"));
        assert!(rendered.contains("- **Schema Size**: 1.46 KB"));
    }

    #[test]
    fn results_are_sorted_and_tiered() {
        let report = aggregate(vec![
            result("low", 1.0),
            result("high", 4.0),
            SchemaResult::failed("broken", "bad json".to_string(), 0),
            result("mid", 3.0),
        ]);
        let rendered = with_ctx(|ctx| to_markdown(&report, ctx));
        let high = rendered.find("### 🟢 high").expect("high tier section");
        let mid = rendered.find("### 🟡 mid").expect("medium tier section");
        let low = rendered.find("### 🔴 low").expect("low tier section");
        let broken = rendered.find("### ❌ broken - ERROR").expect("error section");
        assert!(high < mid && mid < low && low < broken);
        assert!(rendered.contains("- **Error**: bad json"));
    }

    #[test]
    fn empty_corpus_renders_zero_summary() {
        let report = aggregate(Vec::new());
        let rendered = with_ctx(|ctx| to_markdown(&report, ctx));
        assert!(rendered.contains("- **Total Schemas**: 0"));
        assert!(rendered.contains("- **Average Design Score**: 0.000/1.0"));
        assert!(rendered.contains("- **JSON-LD Context Support**: 0.0%"));
    }

    #[test]
    fn schema_card_lists_factors_and_principles() {
        let rendered = with_ctx(|ctx| to_markdown_schema(&result("Identity", 3.5), ctx));
        assert!(rendered.contains("### 🟡 Identity"));
        assert!(rendered.contains("#### Quality Factors"));
        assert!(rendered.contains("- bff_integration: 0.75"));
        assert!(rendered.contains("- did_integration: 0.00"));
    }

    #[test]
    fn schema_size_keeps_two_decimals() {
        let mut whole = result("Whole", 2.0);
        whole.schema_size_kb = 2.0;
        let rendered = with_ctx(|ctx| to_markdown_schema(&whole, ctx));
        assert!(rendered.contains("- **Schema Size**: 2.00 KB"));
    }
}
