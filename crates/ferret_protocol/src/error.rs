//! The four error kinds of spec §7, shared so the orchestrator, manager,
//! and suppression engine can report failures without stringly-typed tags.

use thiserror::Error;

/// A preprocessor's own failure reason, carried inside a
/// `ProcessedContent { success: false, .. }` rather than thrown (spec §7
/// kind 2: "surfaced as a `ProcessedContent{success=false, error}`").
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PreprocessError {
    #[error("file exceeds size limit: {size} bytes (limit {limit} bytes)")]
    SizeLimitExceeded { size: u64, limit: u64 },
    #[error("operation timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("malformed {format} input: {message}")]
    Malformed { format: String, message: String },
    #[error("i/o error: {0}")]
    Io(String),
    #[error("cancelled")]
    Cancelled,
}

/// Spec §7 kind 3: a panic/error inside a single validator must not take
/// down the run. The manager wraps each call and records one of these per
/// (file, validator) pair while continuing with the others.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("validator '{validator}' failed: {message}")]
pub struct ValidatorError {
    pub validator: String,
    pub message: String,
}

/// Spec §7 kind 4: I/O errors on the output file, configuration errors, and
/// cancellation-as-abort all exit the run with code 2.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FatalError {
    #[error("i/o error: {0}")]
    Io(String),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("run cancelled before completion")]
    Cancelled,
}

/// Umbrella error distinguishing the four kinds named in spec §7, for
/// callers (the orchestrator, the CLI driver) that need to decide an exit
/// code without inspecting every individual error type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Kind 1: no preprocessor for the extension. Reported as a warning;
    /// the orchestrator skips the file, this is never a hard error.
    #[error("no preprocessor available for extension: {0}")]
    Routing(String),
    #[error(transparent)]
    Preprocessor(#[from] PreprocessError),
    #[error(transparent)]
    Validator(#[from] ValidatorError),
    #[error(transparent)]
    Fatal(#[from] FatalError),
}

impl PipelineError {
    /// `true` for the kinds that should abort the whole run (exit code 2
    /// per spec §6), as opposed to being logged and skipped.
    pub fn is_fatal(&self) -> bool {
        matches!(self, PipelineError::Fatal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routing_and_preprocessor_errors_are_not_fatal() {
        assert!(!PipelineError::Routing("xyz".into()).is_fatal());
        assert!(!PipelineError::Preprocessor(PreprocessError::Cancelled).is_fatal());
    }

    #[test]
    fn fatal_errors_report_as_fatal() {
        assert!(PipelineError::Fatal(FatalError::Cancelled).is_fatal());
    }
}
