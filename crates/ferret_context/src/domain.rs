//! Domain detection (spec §4.4): the first 5000 characters, lower-cased,
//! are scanned for keywords grouped by domain. The winning domain needs at
//! least 0.3 of total hits; otherwise `Unknown`.

use ferret_protocol::Domain;

const SAMPLE_CHARS: usize = 5000;
const MIN_SHARE: f64 = 0.3;

const HEALTHCARE: &[&str] = &["patient", "hipaa", "clinic", "diagnosis", "physician", "medical record"];
const FINANCIAL: &[&str] = &["aba", "iban", "pci", "routing number", "swift", "account balance"];
const HR_PAYROLL: &[&str] = &["w2", "payroll", "pto", "salary", "employee id", "direct deposit"];
const GOVERNMENT: &[&str] = &["federal", "agency", "classified", "fisma", "clearance"];
const EDUCATION: &[&str] = &["student id", "transcript", "ferpa", "enrollment", "gpa"];
const RETAIL: &[&str] = &["order number", "sku", "checkout", "loyalty card", "gift card"];

fn keyword_hits(sample: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|kw| sample.contains(*kw)).count()
}

/// Detect the dominant domain and a confidence in `[0, 1]`.
pub fn detect(content: &str) -> (Domain, f64) {
    let sample: String = content.chars().take(SAMPLE_CHARS).collect::<String>().to_lowercase();

    let scored = [
        (Domain::Healthcare, keyword_hits(&sample, HEALTHCARE)),
        (Domain::Financial, keyword_hits(&sample, FINANCIAL)),
        (Domain::HrPayroll, keyword_hits(&sample, HR_PAYROLL)),
        (Domain::Government, keyword_hits(&sample, GOVERNMENT)),
        (Domain::Education, keyword_hits(&sample, EDUCATION)),
        (Domain::Retail, keyword_hits(&sample, RETAIL)),
    ];

    let total: usize = scored.iter().map(|(_, hits)| hits).sum();
    if total == 0 {
        return (Domain::Unknown, 0.0);
    }

    let (best_domain, best_hits) = scored.into_iter().max_by_key(|(_, hits)| *hits).unwrap();
    let share = best_hits as f64 / total as f64;
    if share >= MIN_SHARE {
        (best_domain, share)
    } else {
        (Domain::Unknown, share)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthcare_keywords_win_over_noise() {
        let content = "The patient's diagnosis was reviewed by the physician at the clinic.";
        let (domain, _) = detect(content);
        assert_eq!(domain, Domain::Healthcare);
    }

    #[test]
    fn no_keywords_is_unknown() {
        let (domain, confidence) = detect("A plain sentence with no domain markers.");
        assert_eq!(domain, Domain::Unknown);
        assert_eq!(confidence, 0.0);
    }

    #[test]
    fn mixed_signals_below_threshold_fall_back_to_unknown() {
        let content = "patient aba w2 federal student id order number";
        let (domain, confidence) = detect(content);
        assert_eq!(domain, Domain::Unknown);
        assert!(confidence < MIN_SHARE);
    }
}
