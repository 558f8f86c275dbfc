//! Email validator (spec §4.5): RFC-shaped regex, domain classification
//! into a closed type set exposed as the finding's type, test-account
//! penalties.

use crate::common::{apply_keyword_scoring, build_context, locate, Validator};
use ferret_protocol::Finding;
use once_cell::sync::Lazy;
use regex::Regex;

static CANDIDATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

const POSITIVE_KEYWORDS: &[&str] = &["email", "contact", "e-mail", "@", "send to"];
const NEGATIVE_KEYWORDS: &[&str] = &["example", "test", "noreply", "donotreply"];

const TEST_USERNAMES: &[&str] = &["test", "example", "admin", "user", "foo", "bar", "sample"];
const TEST_DOMAINS: &[&str] = &["example.com", "example.org", "test.com", "localhost"];

const TLD_WHITELIST: &[&str] = &[
    "com", "org", "net", "edu", "gov", "mil", "io", "co", "us", "uk", "ca", "de", "fr", "jp",
    "cn", "au", "info", "biz",
];

fn classify_domain(domain: &str) -> &'static str {
    let lower = domain.to_lowercase();
    match lower.as_str() {
        "gmail.com" => "GMAIL",
        "outlook.com" | "hotmail.com" | "live.com" => "OUTLOOK",
        "icloud.com" | "me.com" | "mac.com" => "ICLOUD",
        "yahoo.com" => "YAHOO",
        "protonmail.com" | "proton.me" => "PROTONMAIL",
        _ if lower.ends_with(".edu") => "EDUCATIONAL",
        _ if lower.ends_with(".gov") || lower.ends_with(".mil") => "GOVERNMENT",
        _ if DISPOSABLE_DOMAINS.contains(&lower.as_str()) => "DISPOSABLE",
        _ if lower.split('.').count() > 2 && !lower.starts_with("www.") => "BUSINESS",
        _ => "EMAIL",
    }
}

const DISPOSABLE_DOMAINS: &[&str] = &["mailinator.com", "10minutemail.com", "guerrillamail.com", "tempmail.com"];

fn is_valid_tld(domain: &str) -> bool {
    domain
        .rsplit('.')
        .next()
        .map(|tld| TLD_WHITELIST.contains(&tld.to_lowercase().as_str()) || (tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())))
        .unwrap_or(false)
}

pub struct EmailValidator;

impl Validator for EmailValidator {
    fn name(&self) -> &'static str {
        "email"
    }

    fn supported_types(&self) -> &'static [&'static str] {
        &["EMAIL"]
    }

    fn validate(&self, content: &str, filename: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        for m in CANDIDATE.find_iter(content) {
            let address = m.as_str();
            let Some((local, domain)) = address.split_once('@') else { continue };
            if !is_valid_tld(domain) {
                continue;
            }

            let (line_number, line_text, line_offset) = locate(content, m.start());
            let match_start_in_line = line_offset;
            let match_end_in_line = match_start_in_line + address.len();

            let mut context = build_context(line_text, match_start_in_line, match_end_in_line);
            apply_keyword_scoring(&mut context, POSITIVE_KEYWORDS, NEGATIVE_KEYWORDS, 8.0, 15.0);

            let mut confidence = 75.0 + context.confidence_impact;

            let local_lower = local.to_lowercase();
            if TEST_USERNAMES.iter().any(|u| local_lower == *u) {
                confidence -= 40.0;
            }
            if TEST_DOMAINS.contains(&domain.to_lowercase().as_str()) {
                confidence -= 40.0;
            }

            if confidence <= 0.0 {
                continue;
            }

            let domain_type = classify_domain(domain);
            let finding_type = format!("EMAIL/{domain_type}");

            let finding = Finding::new(
                finding_type,
                address,
                line_number,
                confidence,
                self.name(),
                filename,
                context,
            )
            .with_metadata("domain", domain.to_lowercase())
            .with_metadata("domain_type", domain_type);

            findings.push(finding);
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gmail_address_classified_correctly() {
        let validator = EmailValidator;
        let findings = validator.validate("contact email: alice@gmail.com\n", "x.txt");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].r#type, "EMAIL/GMAIL");
    }

    #[test]
    fn example_domain_is_penalized_into_rejection() {
        let validator = EmailValidator;
        let findings = validator.validate("user@example.com\n", "x.txt");
        assert!(findings.is_empty() || findings[0].confidence < 50.0);
    }

    #[test]
    fn government_domain_classified() {
        let validator = EmailValidator;
        let findings = validator.validate("official contact: j.doe@state.gov\n", "x.txt");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].r#type, "EMAIL/GOVERNMENT");
    }
}
