//! Reference YAML formatter (spec §6): the same document shape as
//! [`crate::json`], serialized as YAML instead.

use crate::formatter::{Formatter, FormatterError, FormatterResult};
use crate::json::to_document;
use crate::FormatKind;
use ferret_protocol::{Finding, SuppressedFinding};

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn kind(&self) -> FormatKind {
        FormatKind::Yaml
    }

    fn format(&self, active: &[Finding], suppressed: &[SuppressedFinding]) -> FormatterResult<String> {
        let document = to_document(active, suppressed);
        serde_yaml::to_string(&document).map_err(|e| FormatterError::Serialize(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferret_protocol::Context;

    #[test]
    fn active_finding_renders_as_yaml_mapping() {
        let f = Finding::new("SSN", "123-45-6789", 1, 70.0, "ssn", "hr.csv", Context::default());
        let out = YamlFormatter.format(std::slice::from_ref(&f), &[]).unwrap();
        assert!(out.contains("validator: ssn"));
        assert!(out.contains("filename: hr.csv"));
    }
}
