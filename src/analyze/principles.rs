use super::quality::properties;
use crate::error::AuditError;
use crate::types::principle::{PrincipleDefinition, Strategy};
use crate::types::Document;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use std::collections::BTreeMap;
use std::io;

#[derive(Debug, Clone)]
enum Check {
    RequiredProperties(Vec<String>),
    Patterns(Vec<Regex>),
}

#[derive(Debug, Clone)]
struct CompiledPrinciple {
    name: String,
    check: Check,
}

/// Principle table with patterns compiled once, shared by every analysis.
#[derive(Debug, Clone)]
pub struct PrincipleSet {
    principles: Vec<CompiledPrinciple>,
}

impl PrincipleSet {
    pub fn compile(definitions: &[PrincipleDefinition]) -> Result<Self, AuditError> {
        let principles = definitions
            .iter()
            .map(|definition| {
                let check = match &definition.strategy {
                    Strategy::RequiredProperties(names) => Check::RequiredProperties(names.clone()),
                    Strategy::Patterns(patterns) => Check::Patterns(
                        patterns
                            .iter()
                            .map(|pattern| compile_pattern(&definition.name, pattern))
                            .collect::<Result<Vec<_>, _>>()?,
                    ),
                };
                Ok(CompiledPrinciple {
                    name: definition.name.clone(),
                    check,
                })
            })
            .collect::<Result<Vec<_>, AuditError>>()?;
        Ok(Self { principles })
    }

    pub fn evaluate(&self, document: &Document) -> Result<BTreeMap<String, f64>, AuditError> {
        // Serialized lazily: property-only tables never need the text.
        let mut text: Option<String> = None;
        let mut scores = BTreeMap::new();
        for principle in &self.principles {
            let score = match &principle.check {
                Check::RequiredProperties(names) => property_coverage(document, names),
                Check::Patterns(patterns) => {
                    if text.is_none() {
                        text = Some(document_text(document)?);
                    }
                    pattern_coverage(patterns, text.as_deref().unwrap_or_default())
                }
            };
            scores.insert(principle.name.clone(), score);
        }
        Ok(scores)
    }
}

fn compile_pattern(principle: &str, pattern: &str) -> Result<Regex, AuditError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| AuditError::InvalidPrinciple {
            name: principle.to_string(),
            reason: format!("pattern '{pattern}' does not compile: {e}"),
        })
}

/// Writes JSON with `", "` and `": "` separators and every non-ASCII
/// character escaped as `\uXXXX`, keys in source order.
struct SpacedAsciiFormatter;

impl Formatter for SpacedAsciiFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(fragment[start..index].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units).iter() {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = index + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Lowercased text the pattern strategy searches.
fn document_text(document: &Document) -> Result<String, AuditError> {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, SpacedAsciiFormatter);
    document.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buffer).to_lowercase())
}

pub fn matches(pattern: &Regex, text: &str) -> bool {
    pattern.is_match(text)
}

/// A name present both at the root and under `properties` counts twice; the
/// result is capped at 1.0.
fn property_coverage(document: &Document, names: &[String]) -> f64 {
    if names.is_empty() {
        return 0.0;
    }
    let in_properties = properties(document).map_or(0, |properties| {
        names
            .iter()
            .filter(|name| properties.contains_key(name.as_str()))
            .count()
    });
    let at_root = names
        .iter()
        .filter(|name| document.contains_key(name.as_str()))
        .count();
    ((in_properties + at_root) as f64 / names.len() as f64).min(1.0)
}

fn pattern_coverage(patterns: &[Regex], text: &str) -> f64 {
    if patterns.is_empty() {
        return 0.0;
    }
    let matched = patterns
        .iter()
        .filter(|pattern| matches(pattern, text))
        .count();
    (matched as f64 / patterns.len() as f64).min(1.0)
}
