//! Social media validator (spec §4.5): purely configuration-driven. With
//! no platform patterns configured it logs a warning and never emits a
//! Finding rather than falling back to a hard-coded guess.

use crate::common::{build_context, locate, Validator};
use ferret_protocol::Finding;
use regex::Regex;

pub struct PlatformPattern {
    pub platform: String,
    pub regex: Regex,
}

pub struct SocialMediaValidator {
    platforms: Vec<PlatformPattern>,
}

impl SocialMediaValidator {
    pub fn new(platforms: Vec<PlatformPattern>) -> Self {
        if platforms.is_empty() {
            tracing::warn!("social_media validator has no configured platform patterns; disabling");
        }
        Self { platforms }
    }
}

impl Validator for SocialMediaValidator {
    fn name(&self) -> &'static str {
        "social_media"
    }

    fn supported_types(&self) -> &'static [&'static str] {
        &["SOCIAL_MEDIA_HANDLE"]
    }

    fn validate(&self, content: &str, filename: &str) -> Vec<Finding> {
        if self.platforms.is_empty() {
            return Vec::new();
        }

        let mut findings = Vec::new();
        for platform in &self.platforms {
            for m in platform.regex.find_iter(content) {
                let (line_number, line_text, line_offset) = locate(content, m.start());
                let match_end_in_line = line_offset + m.as_str().len();
                let context = build_context(line_text, line_offset, match_end_in_line);

                let finding = Finding::new(
                    format!("SOCIAL_MEDIA_HANDLE/{}", platform.platform.to_uppercase()),
                    m.as_str(),
                    line_number,
                    55.0,
                    self.name(),
                    filename,
                    context,
                );
                findings.push(finding);
            }
        }
        findings
    }
}
