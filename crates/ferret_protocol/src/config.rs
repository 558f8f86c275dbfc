//! Configuration *shapes* consumed by the in-scope pipeline. Loading these
//! from a YAML file or merging them with CLI flags is explicitly out of
//! scope (spec §1, §6) — these structs are the seam an external loader
//! targets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `defaults.*` keys from spec §6.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub format: Option<String>,
    pub confidence_level: Option<f64>,
    pub checks: Vec<String>,
    pub enable_preprocessors: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

/// `validators.<name>.<option>` — an open, per-validator knob bag (e.g.
/// `intellectual_property.internal_urls`, `social_media.platform_patterns`
/// from spec §4.5/§6).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidatorConfig {
    pub name: String,
    pub options: BTreeMap<String, serde_json::Value>,
}

/// `preprocessors.text_extraction.*`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreprocessorConfig {
    pub enabled: bool,
    pub types: Vec<String>,
    pub max_size_bytes: Option<u64>,
    pub timeout_ms: Option<u64>,
}

/// `profiles.<name>.{…overrides…}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub name: String,
    pub overrides: EngineConfig,
}

/// `redaction.*`. The redactor itself is out of scope (spec §6 "Redactor
/// boundary"); this struct is only the configuration the (external)
/// redactor plugin would be constructed from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedactionConfig {
    pub enabled: bool,
    pub output_dir: Option<String>,
    pub strategy: Option<String>,
}
