//! IP address validator (spec §4.5): IPv4/IPv6 matching with reduced
//! confidence for private, loopback, link-local, and documentation ranges.

use crate::common::{build_context, locate, Validator};
use ferret_protocol::Finding;
use once_cell::sync::Lazy;
use regex::Regex;
use std::net::IpAddr;

static IPV4_CANDIDATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}\b").unwrap());
static IPV6_CANDIDATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:[A-Fa-f0-9]{1,4}:){2,7}[A-Fa-f0-9:]{1,4}\b").unwrap());

fn is_test_range(addr: &IpAddr) -> bool {
    match addr {
        IpAddr::V4(v4) => {
            v4.is_private()
                || v4.is_loopback()
                || v4.is_link_local()
                || v4.is_documentation()
                || v4.is_broadcast()
                || v4.is_unspecified()
        }
        IpAddr::V6(v6) => v6.is_loopback() || v6.is_unspecified() || (v6.segments()[0] & 0xfe00) == 0xfc00,
    }
}

pub struct IpAddressValidator;

impl Validator for IpAddressValidator {
    fn name(&self) -> &'static str {
        "ip_address"
    }

    fn supported_types(&self) -> &'static [&'static str] {
        &["IP_ADDRESS"]
    }

    fn validate(&self, content: &str, filename: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        for m in IPV4_CANDIDATE.find_iter(content).chain(IPV6_CANDIDATE.find_iter(content)) {
            let candidate = m.as_str();
            let Ok(addr) = candidate.parse::<IpAddr>() else { continue };

            let (line_number, line_text, line_offset) = locate(content, m.start());
            let match_end_in_line = line_offset + candidate.len();
            let context = build_context(line_text, line_offset, match_end_in_line);

            let confidence = if is_test_range(&addr) { 30.0 } else { 70.0 };

            let finding = Finding::new(
                "IP_ADDRESS",
                candidate,
                line_number,
                confidence,
                self.name(),
                filename,
                context,
            )
            .with_metadata("version", if addr.is_ipv4() { "4" } else { "6" });

            findings.push(finding);
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_ipv4_gets_higher_confidence() {
        let validator = IpAddressValidator;
        let findings = validator.validate("connect to 8.8.8.8 please\n", "x.txt");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].confidence >= 60.0);
    }

    #[test]
    fn private_range_is_downweighted() {
        let validator = IpAddressValidator;
        let findings = validator.validate("internal host 192.168.1.5\n", "x.txt");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].confidence <= 40.0);
    }

    #[test]
    fn loopback_ipv6_is_downweighted() {
        let validator = IpAddressValidator;
        let findings = validator.validate("bound to 0:0:0:0:0:0:0:1 locally\n", "x.txt");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].confidence <= 40.0);
    }
}
