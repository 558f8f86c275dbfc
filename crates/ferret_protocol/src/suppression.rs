//! [`SuppressionRule`] and [`SuppressedFinding`] — the data shapes the
//! Suppression Engine (`ferret_suppression`) operates on. Kept in the
//! protocol crate so the manager, orchestrator, and formatter can all refer
//! to them without depending on the suppression engine's matching logic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::finding::Finding;
use ferret_ids::SuppressionRuleId;

/// A user-declared waiver. `text`/`fingerprint` narrow a rule to one exact
/// match; leaving both `None` makes the rule match every finding that
/// passes the `validator`/`type`/`path_glob` filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuppressionRule {
    pub id: SuppressionRuleId,
    /// Matches findings whose `validator` equals this, if set.
    pub validator: Option<String>,
    /// Matches findings whose `type` equals this, if set.
    pub r#type: Option<String>,
    /// Matches findings whose raw `text` equals this, if set.
    pub text: Option<String>,
    /// SHA-256 fingerprint of `validator|type|filename|line|text`, if set.
    pub fingerprint: Option<String>,
    /// Glob matched against the finding's `filename`, if set.
    pub path_glob: Option<String>,
    pub enabled: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub reason: String,
}

impl SuppressionRule {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }
}

/// Wraps a [`Finding`] that a [`SuppressionRule`] matched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuppressedFinding {
    pub finding: Finding,
    pub rule_id: SuppressionRuleId,
    /// `true` when the matching rule's `expires_at` has passed — lets
    /// downstream tools distinguish intentional waivers from forgotten
    /// ones (spec §4.8).
    pub expired: bool,
}

impl SuppressedFinding {
    pub fn expires_at<'a>(&self, rules: &'a [SuppressionRule]) -> Option<&'a DateTime<Utc>> {
        rules
            .iter()
            .find(|r| r.id == self.rule_id)
            .and_then(|r| r.expires_at.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn rule(expires_at: Option<DateTime<Utc>>) -> SuppressionRule {
        SuppressionRule {
            id: SuppressionRuleId::new(),
            validator: Some("email".into()),
            r#type: Some("EMAIL/GMAIL".into()),
            text: None,
            fingerprint: None,
            path_glob: None,
            enabled: true,
            expires_at,
            reason: "known test fixture".into(),
        }
    }

    #[test]
    fn rule_without_expiry_never_expires() {
        assert!(!rule(None).is_expired(Utc::now()));
    }

    #[test]
    fn rule_with_past_expiry_is_expired() {
        let past = Utc::now() - Duration::days(1);
        assert!(rule(Some(past)).is_expired(Utc::now()));
    }

    #[test]
    fn rule_with_future_expiry_is_not_expired() {
        let future = Utc::now() + Duration::days(365);
        assert!(!rule(Some(future)).is_expired(Utc::now()));
    }
}
