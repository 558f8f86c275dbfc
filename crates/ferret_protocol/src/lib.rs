//! Canonical data model shared across the Ferret-Scan scanning pipeline.
//!
//! This crate has no behavior of its own — it is the set of types every
//! other crate in the workspace (preprocessors, router, context analyzer,
//! validators, manager, orchestrator, suppression engine, formatter) agrees
//! on.

pub mod config;
pub mod context_insights;
pub mod error;
pub mod finding;
pub mod model;
pub mod sensitivity;
pub mod suppression;

pub use config::{EngineConfig, PreprocessorConfig, ProfileConfig, RedactionConfig, ValidatorConfig};
pub use context_insights::{ContextInsights, CrossValidatorSignal, Domain, DocumentType, SemanticScores};
pub use error::{FatalError, PipelineError, PreprocessError, ValidatorError};
pub use finding::{Context, Finding};
pub use model::{FilePath, MetadataBlob, MetadataKind, ProcessedContent, ProcessorType, RoutedContent};
pub use sensitivity::SensitivityWeight;
pub use suppression::{SuppressedFinding, SuppressionRule};
