use super::quality::properties;
use crate::types::Document;
use serde_json::Value;

const JSONLD_KEYWORDS: [&str; 3] = ["@type", "@id", "@context"];

/// Linked-data interoperability score in `[0.0, 1.0]`.
pub fn jsonld_score(document: &Document) -> f64 {
    let mut score: f64 = 0.0;

    match document.get("@context") {
        Some(context @ Value::Array(entries)) if !entries.is_empty() => {
            score += 0.6;
            let text = context.to_string().to_lowercase();
            if text.contains("schema.org") {
                score += 0.2;
            }
            if text.contains("w3.org") || text.contains("jsonld.org") {
                score += 0.1;
            }
            if text.contains("originvault") || text.contains("openverifiable") {
                score += 0.1;
            }
        }
        Some(Value::String(context)) if context.starts_with("http") => {
            score += 0.5;
        }
        _ => {}
    }

    if document
        .get("$id")
        .and_then(Value::as_str)
        .is_some_and(|id| id.starts_with("https://"))
    {
        score += 0.2;
    }

    if properties(document)
        .is_some_and(|properties| properties.keys().any(|key| JSONLD_KEYWORDS.contains(&key.as_str())))
    {
        score += 0.1;
    }

    score.min(1.0)
}
