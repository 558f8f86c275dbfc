//! The closed output-format vocabulary (spec §6). Only `text`/`json`/`yaml`
//! have reference implementations here; the rest are declared so a real
//! front-end has a documented shape to target.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    Text,
    Json,
    Csv,
    Yaml,
    Junit,
    Sarif,
    GitlabSast,
}

impl FormatKind {
    /// Whether this crate ships a reference `Formatter` for this kind.
    pub fn has_reference_implementation(self) -> bool {
        matches!(self, FormatKind::Text | FormatKind::Json | FormatKind::Yaml)
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FormatKind::Text => "text",
            FormatKind::Json => "json",
            FormatKind::Csv => "csv",
            FormatKind::Yaml => "yaml",
            FormatKind::Junit => "junit",
            FormatKind::Sarif => "sarif",
            FormatKind::GitlabSast => "gitlab-sast",
        };
        write!(f, "{s}")
    }
}

impl FromStr for FormatKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(FormatKind::Text),
            "json" => Ok(FormatKind::Json),
            "csv" => Ok(FormatKind::Csv),
            "yaml" => Ok(FormatKind::Yaml),
            "junit" => Ok(FormatKind::Junit),
            "sarif" => Ok(FormatKind::Sarif),
            "gitlab-sast" => Ok(FormatKind::GitlabSast),
            other => Err(format!("unrecognized output format '{other}'")),
        }
    }
}
