//! Semantic scores (spec §4.4): for each of {PersonalData, FinancialData,
//! MedicalData, TestData, Production}, the hit rate of its keyword list
//! over the full content.

use ferret_protocol::SemanticScores;

const PERSONAL_DATA: &[&str] = &["name", "address", "date of birth", "phone", "email", "ssn"];
const FINANCIAL_DATA: &[&str] = &["account", "routing", "balance", "invoice", "payment", "iban"];
const MEDICAL_DATA: &[&str] = &["diagnosis", "prescription", "treatment", "patient", "physician"];
const TEST_DATA: &[&str] = &["test", "example", "sample", "dummy", "fixture", "lorem ipsum", "foo", "bar"];
const PRODUCTION: &[&str] = &["production", "prod", "live", "customer", "deployed"];

fn hit_rate(sample: &str, keywords: &[&str]) -> f64 {
    if keywords.is_empty() {
        return 0.0;
    }
    let hits = keywords.iter().filter(|kw| sample.contains(*kw)).count();
    hits as f64 / keywords.len() as f64
}

/// Score each semantic dimension against the whole (lower-cased) content.
pub fn score(content: &str) -> SemanticScores {
    let sample = content.to_lowercase();
    SemanticScores {
        personal_data: hit_rate(&sample, PERSONAL_DATA),
        financial_data: hit_rate(&sample, FINANCIAL_DATA),
        medical_data: hit_rate(&sample, MEDICAL_DATA),
        test_data: hit_rate(&sample, TEST_DATA),
        production: hit_rate(&sample, PRODUCTION),
    }
}
