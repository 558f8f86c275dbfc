//! Formatter contract (spec §6): one trait, several concrete writers, an
//! error enum. `csv`/`junit`/`sarif`/`gitlab-sast` are declared as
//! [`FormatKind`] variants with documented shape but no implementation
//! here — their bit layout is not pinned by the spec.

mod formatter;
mod json;
mod kind;
mod text;
mod yaml;

pub use formatter::{Formatter, FormatterError, FormatterResult};
pub use json::JsonFormatter;
pub use kind::FormatKind;
pub use text::TextFormatter;
pub use yaml::YamlFormatter;
