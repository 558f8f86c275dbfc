//! The `Formatter` trait and its error type — one trait, several concrete
//! writers, each given the active/suppressed split already computed by the
//! Suppression Engine.

use ferret_protocol::{Finding, SuppressedFinding};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatterError {
    #[error("{message}")]
    Message { message: String },
    #[error("serializing output: {0}")]
    Serialize(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl FormatterError {
    pub fn message(message: impl Into<String>) -> Self {
        FormatterError::Message { message: message.into() }
    }
}

pub type FormatterResult<T> = std::result::Result<T, FormatterError>;

pub trait Formatter {
    fn kind(&self) -> crate::FormatKind;

    fn format(&self, active: &[Finding], suppressed: &[SuppressedFinding]) -> FormatterResult<String>;
}
