//! Suppression Engine (spec §4.8): a rule store matched in insertion
//! order, an active/suppressed partition with an `expired` flag, YAML
//! persistence, and a generation mode for turning scan results into
//! reviewable disabled rules.

mod fingerprint;
mod generation;
mod persistence;
mod store;

pub use fingerprint::fingerprint;
pub use generation::generate_rules;
pub use persistence::{load, save, SuppressionFileError};
pub use store::RuleStore;
