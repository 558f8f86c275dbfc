//! Shared validator-contract plumbing (spec §4.5): window extraction around
//! a match, the common positive/negative keyword scoring, and line lookup.

use ferret_protocol::Context;

pub const WINDOW_RADIUS: usize = 50;

/// Every validator implements this contract. Path-only calls MUST return
/// an empty list — validators only see preprocessed content (spec §4.5).
pub trait Validator: Send + Sync {
    fn name(&self) -> &'static str;
    fn supported_types(&self) -> &'static [&'static str];
    fn validate(&self, content: &str, original_path: &str) -> Vec<ferret_protocol::Finding>;

    /// Monotone raw-to-calibrated confidence mapping (spec §4.6 step 6).
    /// Constants live on the validator, not the manager; identity unless
    /// overridden.
    fn calibrate(&self, raw_confidence: f64) -> f64 {
        raw_confidence
    }
}

/// Line + byte offset within that line for a byte offset into the whole
/// content — validators iterate matches over the whole string but report
/// 1-based line numbers (spec invariant 2).
pub fn locate(content: &str, byte_offset: usize) -> (usize, &str, usize) {
    let mut line_number = 1;
    let mut line_start = 0;
    for line in content.split_inclusive('\n') {
        let line_end = line_start + line.len();
        if byte_offset < line_end || line_end == content.len() {
            let trimmed = line.trim_end_matches('\n').trim_end_matches('\r');
            return (line_number, trimmed, byte_offset.saturating_sub(line_start));
        }
        line_start = line_end;
        line_number += 1;
    }
    (line_number.max(1), "", 0)
}

/// Build a `Context` for a match at `[match_start, match_end)` within
/// `full_line` (already the isolated line text), with a `WINDOW_RADIUS`
/// character window on either side.
pub fn build_context(full_line: &str, match_start: usize, match_end: usize) -> Context {
    let before_start = match_start.saturating_sub(WINDOW_RADIUS).min(full_line.len());
    let after_end = (match_end + WINDOW_RADIUS).min(full_line.len());

    let before_text = safe_slice(full_line, before_start, match_start.min(full_line.len()));
    let after_text = safe_slice(full_line, match_end.min(full_line.len()), after_end);

    Context {
        before_text,
        after_text,
        full_line: full_line.to_string(),
        positive_keywords: Vec::new(),
        negative_keywords: Vec::new(),
        confidence_impact: 0.0,
    }
}

/// Byte-safe substring that snaps to the nearest char boundary rather than
/// panicking on a multi-byte split.
fn safe_slice(s: &str, mut start: usize, mut end: usize) -> String {
    while start < s.len() && !s.is_char_boundary(start) {
        start += 1;
    }
    while end < s.len() && !s.is_char_boundary(end) {
        end += 1;
    }
    if start >= end {
        return String::new();
    }
    s[start..end].to_string()
}

/// Scores a context window against positive/negative keyword lists,
/// recording which keywords hit and returning a net confidence delta (spec
/// §4.5 step 5).
pub fn apply_keyword_scoring(
    context: &mut Context,
    positive: &[&str],
    negative: &[&str],
    positive_weight: f64,
    negative_weight: f64,
) {
    let window = format!("{} {}", context.before_text, context.after_text).to_lowercase();

    for kw in positive {
        if window.contains(kw) {
            context.positive_keywords.push((*kw).to_string());
        }
    }
    for kw in negative {
        if window.contains(kw) {
            context.negative_keywords.push((*kw).to_string());
        }
    }

    context.confidence_impact = context.positive_keywords.len() as f64 * positive_weight
        - context.negative_keywords.len() as f64 * negative_weight;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_finds_correct_line_and_offset() {
        let content = "first line\nsecond line\nthird";
        let (line, text, offset) = locate(content, 12);
        assert_eq!(line, 2);
        assert_eq!(text, "second line");
        assert_eq!(offset, 0);
    }

    #[test]
    fn build_context_captures_window_around_match() {
        let line = "contact email: alice@example.com please";
        let ctx = build_context(line, 15, 33);
        assert!(ctx.before_text.contains("contact email"));
        assert!(ctx.after_text.contains("please"));
    }

    #[test]
    fn keyword_scoring_records_hits_and_nets_impact() {
        let mut ctx = build_context("production ssn: 123-45-6789 test", 16, 27);
        apply_keyword_scoring(&mut ctx, &["ssn", "production"], &["test"], 10.0, 15.0);
        assert!(ctx.positive_keywords.contains(&"production".to_string()));
        assert!(ctx.negative_keywords.contains(&"test".to_string()));
    }
}
