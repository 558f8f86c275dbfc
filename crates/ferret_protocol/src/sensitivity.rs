//! SARIF `rank` sensitivity weights (spec §6, open question (d)): "adopted
//! verbatim... but implementers may configure them without breaking the
//! contract." Exposed as named constants rather than buried in formatter
//! code so an external SARIF formatter can reuse or override them.

/// Per-validator-family sensitivity weight used in
/// `rank = sensitivity_weight * 5 + (confidence / 10) * 5`, clamped to
/// `[0, 100]` (spec §6).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensitivityWeight(pub f64);

impl SensitivityWeight {
    pub const CREDIT_CARD: SensitivityWeight = SensitivityWeight(18.0);
    pub const SSN: SensitivityWeight = SensitivityWeight(18.0);
    pub const PASSPORT: SensitivityWeight = SensitivityWeight(16.0);
    pub const SECRETS: SensitivityWeight = SensitivityWeight(17.0);
    pub const PHONE: SensitivityWeight = SensitivityWeight(10.0);
    pub const EMAIL: SensitivityWeight = SensitivityWeight(8.0);
    pub const IP_ADDRESS: SensitivityWeight = SensitivityWeight(9.0);
    pub const PERSON_NAME: SensitivityWeight = SensitivityWeight(7.0);
    pub const INTELLECTUAL_PROPERTY: SensitivityWeight = SensitivityWeight(12.0);
    pub const SOCIAL_MEDIA: SensitivityWeight = SensitivityWeight(6.0);
    pub const METADATA: SensitivityWeight = SensitivityWeight(8.0);
    /// Fallback for any validator name not enumerated above.
    pub const DEFAULT: SensitivityWeight = SensitivityWeight(10.0);

    pub fn for_validator(name: &str) -> SensitivityWeight {
        match name {
            "creditcard" => Self::CREDIT_CARD,
            "ssn" => Self::SSN,
            "passport" => Self::PASSPORT,
            "secrets" => Self::SECRETS,
            "phone" => Self::PHONE,
            "email" => Self::EMAIL,
            "ip_address" => Self::IP_ADDRESS,
            "person_name" => Self::PERSON_NAME,
            "intellectual_property" => Self::INTELLECTUAL_PROPERTY,
            "social_media" => Self::SOCIAL_MEDIA,
            "metadata" => Self::METADATA,
            _ => Self::DEFAULT,
        }
    }

    /// SARIF `rank`, clamped to `[0, 100]` per spec §6.
    pub fn rank(self, confidence: f64) -> f64 {
        (self.0 * 5.0 + (confidence / 10.0) * 5.0).clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_clamps_to_100() {
        assert_eq!(SensitivityWeight::CREDIT_CARD.rank(100.0), 100.0);
    }

    #[test]
    fn unknown_validator_uses_default_weight() {
        assert_eq!(SensitivityWeight::for_validator("no_such_validator"), SensitivityWeight::DEFAULT);
    }

    #[test]
    fn rank_scales_with_confidence() {
        let low = SensitivityWeight::EMAIL.rank(10.0);
        let high = SensitivityWeight::EMAIL.rank(90.0);
        assert!(high > low);
    }
}
