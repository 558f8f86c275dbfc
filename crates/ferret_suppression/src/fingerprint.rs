//! SHA-256 fingerprint of `validator|type|filename|line|text` (spec §3,
//! §4.8) — the stable identity a suppression rule pins to when it targets
//! one exact finding rather than a whole validator/type family.

use ferret_protocol::Finding;
use sha2::{Digest, Sha256};

pub fn fingerprint(finding: &Finding) -> String {
    let joined = format!(
        "{}|{}|{}|{}|{}",
        finding.validator, finding.r#type, finding.filename, finding.line_number, finding.text
    );
    let digest = Sha256::digest(joined.as_bytes());
    hex_encode(&digest)
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferret_protocol::Context;

    fn finding() -> Finding {
        Finding::new(
            "EMAIL/GMAIL",
            "alice@gmail.com",
            3,
            80.0,
            "email",
            "contacts.csv",
            Context::default(),
        )
    }

    #[test]
    fn fingerprint_is_deterministic() {
        assert_eq!(fingerprint(&finding()), fingerprint(&finding()));
    }

    #[test]
    fn fingerprint_changes_with_line_number() {
        let mut other = finding();
        other.line_number = 4;
        assert_ne!(fingerprint(&finding()), fingerprint(&other));
    }
}
