use crate::error::AuditError;
use crate::types::principle::{default_principles, PrincipleDefinition, Strategy};
use regex::RegexBuilder;
use serde::Deserialize;
use std::collections::BTreeMap;

pub const DEFAULT_REPORT_TITLE: &str = "Schema Validation Report";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditConfig {
    pub scan: Option<ScanConfig>,
    pub report: Option<ReportConfig>,
    pub thresholds: Option<ThresholdsConfig>,
    #[serde(default)]
    pub principles: BTreeMap<String, PrincipleConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    pub extension: Option<String>,
    #[serde(default)]
    pub recursive: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub output: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdsConfig {
    pub bff_compatible: Option<f64>,
    pub multi_root_support: Option<f64>,
    pub high_tier: Option<f64>,
    pub medium_tier: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrincipleConfig {
    pub required_properties: Option<Vec<String>>,
    pub patterns: Option<Vec<String>>,
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub bff_compatible: f64,
    pub multi_root_support: f64,
    pub high_tier: f64,
    pub medium_tier: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            bff_compatible: 0.5,
            multi_root_support: 0.3,
            high_tier: 4.0,
            medium_tier: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanSettings {
    pub extension: String,
    pub recursive: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            extension: "json".to_string(),
            recursive: false,
        }
    }
}

impl PrincipleConfig {
    fn to_definition(&self, name: &str) -> Result<PrincipleDefinition, AuditError> {
        let invalid = |reason: &str| AuditError::InvalidPrinciple {
            name: name.to_string(),
            reason: reason.to_string(),
        };
        let strategy = match (&self.required_properties, &self.patterns) {
            (Some(properties), None) => Strategy::RequiredProperties(properties.clone()),
            (None, Some(patterns)) => Strategy::Patterns(patterns.clone()),
            (Some(_), Some(_)) => {
                return Err(invalid(
                    "declares both required_properties and patterns; exactly one is allowed",
                ))
            }
            (None, None) => return Err(invalid("declares neither required_properties nor patterns")),
        };
        Ok(PrincipleDefinition {
            name: name.to_string(),
            strategy,
            weight: self.weight.unwrap_or(0.0),
        })
    }
}

impl AuditConfig {
    pub fn thresholds(&self) -> Thresholds {
        let defaults = Thresholds::default();
        match &self.thresholds {
            Some(thresholds) => Thresholds {
                bff_compatible: thresholds.bff_compatible.unwrap_or(defaults.bff_compatible),
                multi_root_support: thresholds
                    .multi_root_support
                    .unwrap_or(defaults.multi_root_support),
                high_tier: thresholds.high_tier.unwrap_or(defaults.high_tier),
                medium_tier: thresholds.medium_tier.unwrap_or(defaults.medium_tier),
            },
            None => defaults,
        }
    }

    pub fn scan_settings(&self) -> ScanSettings {
        let defaults = ScanSettings::default();
        match &self.scan {
            Some(scan) => ScanSettings {
                extension: scan
                    .extension
                    .as_deref()
                    .map(|ext| ext.trim_start_matches('.').to_string())
                    .unwrap_or(defaults.extension),
                recursive: scan.recursive,
            },
            None => defaults,
        }
    }

    pub fn report_output(&self) -> Option<&str> {
        self.report
            .as_ref()
            .and_then(|report| report.output.as_deref())
    }

    pub fn report_title(&self) -> &str {
        self.report
            .as_ref()
            .and_then(|report| report.title.as_deref())
            .unwrap_or(DEFAULT_REPORT_TITLE)
    }

    /// Built-in principles with configured entries replacing same-named
    /// defaults in place; new names are appended in name order.
    pub fn principles(&self) -> Result<Vec<PrincipleDefinition>, AuditError> {
        let mut principles = default_principles();
        for (name, configured) in &self.principles {
            let definition = configured.to_definition(name)?;
            match principles.iter_mut().find(|existing| existing.name == *name) {
                Some(existing) => *existing = definition,
                None => principles.push(definition),
            }
        }
        Ok(principles)
    }

    pub fn validate(&self) -> Result<(), AuditError> {
        if self.scan_settings().extension.trim().is_empty() {
            return Err(AuditError::ConfigParse(
                "scan.extension must not be empty".to_string(),
            ));
        }

        let thresholds = self.thresholds();
        for (key, value) in [
            ("bff_compatible", thresholds.bff_compatible),
            ("multi_root_support", thresholds.multi_root_support),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(AuditError::ConfigParse(format!(
                    "thresholds.{key} must be between 0.0 and 1.0"
                )));
            }
        }
        for (key, value) in [
            ("high_tier", thresholds.high_tier),
            ("medium_tier", thresholds.medium_tier),
        ] {
            if !(0.0..=5.0).contains(&value) {
                return Err(AuditError::ConfigParse(format!(
                    "thresholds.{key} must be between 0.0 and 5.0"
                )));
            }
        }
        if thresholds.medium_tier > thresholds.high_tier {
            return Err(AuditError::ConfigParse(format!(
                "thresholds.medium_tier ({:.2}) cannot exceed thresholds.high_tier ({:.2})",
                thresholds.medium_tier, thresholds.high_tier
            )));
        }

        for principle in self.principles()? {
            validate_principle(&principle)?;
        }

        Ok(())
    }
}

fn validate_principle(principle: &PrincipleDefinition) -> Result<(), AuditError> {
    let invalid = |reason: String| AuditError::InvalidPrinciple {
        name: principle.name.clone(),
        reason,
    };

    if !(0.0..=1.0).contains(&principle.weight) {
        return Err(invalid("weight must be between 0.0 and 1.0".to_string()));
    }

    let kind = principle.strategy.kind();
    let entries = principle.strategy.entries();
    if entries.is_empty() {
        return Err(invalid(format!("{kind} must not be empty")));
    }
    if entries.iter().any(|entry| entry.trim().is_empty()) {
        return Err(invalid(format!("{kind} entries must be non-empty")));
    }
    if let Strategy::Patterns(patterns) = &principle.strategy {
        for pattern in patterns {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| invalid(format!("pattern '{pattern}' does not compile: {e}")))?;
        }
    }

    Ok(())
}
