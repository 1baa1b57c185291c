use serde::Serialize;

/// How a design principle is checked against a schema document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Property names looked up at the document root and under `properties`.
    RequiredProperties(Vec<String>),
    /// Regular expressions searched in the serialized document.
    Patterns(Vec<String>),
}

impl Strategy {
    pub fn kind(&self) -> &'static str {
        match self {
            Strategy::RequiredProperties(_) => "required_properties",
            Strategy::Patterns(_) => "patterns",
        }
    }

    pub fn entries(&self) -> &[String] {
        match self {
            Strategy::RequiredProperties(entries) | Strategy::Patterns(entries) => entries,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrincipleDefinition {
    pub name: String,
    #[serde(flatten)]
    pub strategy: Strategy,
    /// Declared weight. Reported, never applied: design scores use a plain mean.
    pub weight: f64,
}

impl PrincipleDefinition {
    fn new(name: &str, strategy: Strategy, weight: f64) -> Self {
        Self {
            name: name.to_string(),
            strategy,
            weight,
        }
    }
}

pub const MULTI_ROOT_TRUST: &str = "multi_root_trust";
pub const BFF_INTEGRATION: &str = "bff_integration";

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub fn default_principles() -> Vec<PrincipleDefinition> {
    vec![
        PrincipleDefinition::new(
            MULTI_ROOT_TRUST,
            Strategy::RequiredProperties(owned(&[
                "rootType",
                "governanceModel",
                "delegationChain",
                "trustChainContext",
            ])),
            0.25,
        ),
        PrincipleDefinition::new(
            "did_integration",
            Strategy::Patterns(owned(&["did:", "DID", "decentralized", "identifier"])),
            0.20,
        ),
        PrincipleDefinition::new(
            "verifiable_credentials",
            Strategy::Patterns(owned(&["credential", "VC", "verifiable", "claim"])),
            0.20,
        ),
        PrincipleDefinition::new(
            "cross_platform_compatibility",
            Strategy::Patterns(owned(&["interop", "compatible", "standard", "W3C"])),
            0.15,
        ),
        PrincipleDefinition::new(
            BFF_INTEGRATION,
            Strategy::RequiredProperties(owned(&[
                "id",
                "metadata",
                "timestamps",
                "blockchainSync",
            ])),
            0.20,
        ),
    ]
}
