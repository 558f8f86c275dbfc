//! YAML persistence for the rule file (conventionally
//! `.ferret-scan-suppressions.yaml`, spec §4.8/§6).

use crate::store::RuleStore;
use ferret_protocol::SuppressionRule;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SuppressionFileError {
    #[error("reading suppression file: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing suppression file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub fn load(path: &Path) -> Result<RuleStore, SuppressionFileError> {
    let text = std::fs::read_to_string(path)?;
    let rules: Vec<SuppressionRule> = serde_yaml::from_str(&text)?;
    Ok(RuleStore::from_rules(rules))
}

pub fn save(store: &RuleStore, path: &Path) -> Result<(), SuppressionFileError> {
    let text = serde_yaml::to_string(store.rules())?;
    std::fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferret_ids::SuppressionRuleId;

    fn rule() -> SuppressionRule {
        SuppressionRule {
            id: SuppressionRuleId::new(),
            validator: Some("ssn".to_string()),
            r#type: Some("SSN".to_string()),
            text: None,
            fingerprint: None,
            path_glob: Some("**/*.csv".to_string()),
            enabled: true,
            expires_at: None,
            reason: "known fixture data".to_string(),
        }
    }

    #[test]
    fn round_trips_through_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".ferret-scan-suppressions.yaml");

        let mut store = RuleStore::new();
        store.add(rule());
        save(&store, &path).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.rules().len(), 1);
        assert_eq!(loaded.rules()[0].validator.as_deref(), Some("ssn"));
    }
}
