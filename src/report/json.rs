use crate::types::report::{CorpusReport, SchemaResult};
use serde::Serialize;

#[derive(Serialize)]
struct Stamped<'a, T: Serialize> {
    generated_at: &'a str,
    #[serde(flatten)]
    body: &'a T,
}

pub fn to_json(report: &CorpusReport, generated_at: &str) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Stamped {
        generated_at,
        body: report,
    })
}

pub fn to_json_schema(result: &SchemaResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}
