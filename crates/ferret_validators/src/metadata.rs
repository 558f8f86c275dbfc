//! Metadata validator (spec §4.5): consumes only `MetadataBlob` text
//! (already serialized as `"Key: value"` lines by the preprocessor layer)
//! and looks for fields semantically equivalent to PII.

use crate::common::{build_context, Validator};
use ferret_protocol::{Finding, MetadataBlob};

const NAME_FIELD_NAMES: &[&str] = &["author", "creator", "last modified by", "artist", "owner"];

const PII_FIELD_NAMES: &[&str] = &["company", "user", "email"];

const GPS_FIELD_NAMES: &[&str] = &["gps latitude", "gps longitude", "gps position"];

/// A field's classification determines its emitted finding type: a
/// name-bearing key reuses the `PERSON_NAME` type tag (spec §8 scenario 3),
/// everything else stays under the `METADATA/<subtype>` family.
enum FieldClass {
    Name,
    Subtype(&'static str),
}

fn classify_field(key: &str) -> Option<FieldClass> {
    let lower = key.to_lowercase();
    if GPS_FIELD_NAMES.iter().any(|f| lower.contains(f)) {
        Some(FieldClass::Subtype("GPS"))
    } else if NAME_FIELD_NAMES.iter().any(|f| lower == *f) {
        Some(FieldClass::Name)
    } else if PII_FIELD_NAMES.iter().any(|f| lower == *f) {
        Some(FieldClass::Subtype("IDENTITY"))
    } else {
        None
    }
}

pub struct MetadataValidator;

impl MetadataValidator {
    /// Each blob keeps its own line-number origin, independent of the
    /// document body and of other blobs (spec §4.3, §4.6).
    pub fn validate_blob(&self, blob: &MetadataBlob, filename: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (index, line) in blob.text.lines().enumerate() {
            let Some((key, value)) = line.split_once(": ") else { continue };
            let Some(class) = classify_field(key) else { continue };
            if value.trim().is_empty() {
                continue;
            }

            let context = build_context(line, 0, line.len());
            let (r#type, confidence) = match class {
                FieldClass::Name => ("PERSON_NAME".to_string(), 65.0),
                FieldClass::Subtype("GPS") => ("METADATA/GPS".to_string(), 85.0),
                FieldClass::Subtype(subtype) => (format!("METADATA/{subtype}"), 65.0),
            };

            let finding = Finding::new(
                r#type,
                value.trim(),
                index + 1,
                confidence,
                self.name(),
                filename,
                context,
            )
            .with_metadata("field", key)
            .with_metadata("source", format!("{:?}", blob.kind));

            findings.push(finding);
        }

        findings
    }
}

impl Validator for MetadataValidator {
    fn name(&self) -> &'static str {
        "metadata"
    }

    fn supported_types(&self) -> &'static [&'static str] {
        &["METADATA"]
    }

    /// Path-only / body-only calls never apply to this validator — it is
    /// driven exclusively through `validate_blob` by the manager.
    fn validate(&self, _content: &str, _original_path: &str) -> Vec<Finding> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferret_protocol::MetadataKind;

    #[test]
    fn author_field_yields_person_name_finding() {
        let validator = MetadataValidator;
        let blob = MetadataBlob::new(MetadataKind::Pdf, "Author: Jane Doe\nPages: 3".to_string());
        let findings = validator.validate_blob(&blob, "resume.pdf");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].r#type, "PERSON_NAME");
        assert_eq!(findings[0].text, "Jane Doe");
    }

    #[test]
    fn company_field_yields_identity_finding() {
        let validator = MetadataValidator;
        let blob = MetadataBlob::new(MetadataKind::Office, "Company: Acme Corp\nPages: 3".to_string());
        let findings = validator.validate_blob(&blob, "report.docx");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].r#type, "METADATA/IDENTITY");
    }

    #[test]
    fn gps_latitude_field_yields_high_confidence() {
        let validator = MetadataValidator;
        let blob = MetadataBlob::new(MetadataKind::Image, "GPS Latitude: 37.7749\nGPS Longitude: -122.4194".to_string());
        let findings = validator.validate_blob(&blob, "image.jpg");
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|f| f.r#type == "METADATA/GPS" && f.confidence >= 80.0));
    }

    #[test]
    fn unrecognized_fields_are_ignored() {
        let validator = MetadataValidator;
        let blob = MetadataBlob::new(MetadataKind::Office, "Application: Word\nRevision: 4".to_string());
        assert!(validator.validate_blob(&blob, "x.docx").is_empty());
    }

    #[test]
    fn generic_validate_call_never_emits_directly() {
        let validator = MetadataValidator;
        assert!(validator.validate("Author: Jane Doe", "x.pdf").is_empty());
    }
}
