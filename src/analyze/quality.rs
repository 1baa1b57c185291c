use super::jsonld::jsonld_score;
use crate::types::report::QualityFactors;
use crate::types::Document;
use serde_json::{Map, Value};

const CONSTRAINT_KEYWORDS: [&str; 6] = [
    "minLength",
    "maxLength",
    "minimum",
    "maximum",
    "minItems",
    "maxItems",
];
const VALIDATION_CHECKS: f64 = 4.0;

pub fn quality_score(document: &Document) -> f64 {
    quality_factors(document).total()
}

pub fn quality_factors(document: &Document) -> QualityFactors {
    QualityFactors {
        structure: structure_score(document),
        descriptions: description_coverage(document),
        examples: example_coverage(document),
        validation: validation_richness(document),
        interoperability: jsonld_score(document),
    }
}

pub(crate) fn properties(document: &Document) -> Option<&Map<String, Value>> {
    document.get("properties").and_then(Value::as_object)
}

/// Property definitions under `properties` that are themselves objects.
fn property_schemas(document: &Document) -> impl Iterator<Item = &Map<String, Value>> {
    properties(document)
        .into_iter()
        .flat_map(|properties| properties.values())
        .filter_map(Value::as_object)
}

fn structure_score(document: &Document) -> f64 {
    let has_core = document.contains_key("$schema") && document.contains_key("type");
    if has_core && document.contains_key("properties") {
        1.0
    } else if has_core {
        0.5
    } else {
        0.0
    }
}

fn description_coverage(document: &Document) -> f64 {
    let total = properties(document).map_or(0, Map::len);
    if total == 0 {
        return 0.0;
    }
    let described = property_schemas(document)
        .filter(|property| property.contains_key("description"))
        .count();
    described as f64 / total as f64
}

fn example_coverage(document: &Document) -> f64 {
    let root = document.contains_key("examples");
    let property = property_schemas(document).any(|property| property.contains_key("examples"));
    match (root, property) {
        (true, true) => 1.0,
        (true, false) | (false, true) => 0.5,
        (false, false) => 0.0,
    }
}

fn validation_richness(document: &Document) -> f64 {
    let has_any = |keys: &[&str]| {
        keys.iter().any(|key| document.contains_key(*key))
            || property_schemas(document)
                .any(|property| keys.iter().any(|key| property.contains_key(*key)))
    };

    let checks = [
        property_schemas(document).any(|property| property.contains_key("pattern")),
        document
            .get("required")
            .and_then(Value::as_array)
            .is_some_and(|required| !required.is_empty()),
        has_any(&CONSTRAINT_KEYWORDS),
        has_any(&["enum", "format"]),
    ];
    checks.iter().filter(|passed| **passed).count() as f64 / VALIDATION_CHECKS
}
