//! Context Analyzer (spec §4.4): structure detection, domain detection,
//! semantic scoring, and cross-validator signal matching, folded into one
//! `ContextInsights` per file.

mod analyzer;
mod cross_validator;
mod domain;
mod semantic;
mod structure;

pub use analyzer::ContextAnalyzer;
