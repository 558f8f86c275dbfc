//! In-memory operation-timing and alerting model (spec §2 "Observability
//! Sink", §9 "scoped... mutation is append-only and synchronized per
//! record").

use std::sync::Mutex;
use std::time::Duration;

/// One timed operation (a preprocessor run, a validator call, a whole
/// file) recorded for later summary or alerting.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRecord {
    pub operation: String,
    pub path: Option<String>,
    pub duration: Duration,
    pub success: bool,
}

/// A threshold that fires when an operation exceeds a duration, or when
/// the failure count for an operation crosses a count (spec §2: "alerting
/// thresholds (optional)").
#[derive(Debug, Clone, PartialEq)]
pub struct AlertRule {
    pub operation: String,
    pub max_duration: Option<Duration>,
    pub max_failures: Option<usize>,
}

/// A human-readable description of an [`AlertRule`] that fired.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub rule_operation: String,
    pub message: String,
}

/// Append-only observability sink. Created at run start, dropped at run
/// end — never a process-wide singleton (spec §9).
#[derive(Debug, Default)]
pub struct Sink {
    records: Mutex<Vec<OperationRecord>>,
    alert_rules: Mutex<Vec<AlertRule>>,
}

impl Sink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alert_rules(rules: Vec<AlertRule>) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            alert_rules: Mutex::new(rules),
        }
    }

    /// Record one completed operation. Locked per record, as the spec
    /// requires ("mutation is append-only and synchronized per record").
    pub fn record_operation(&self, operation: impl Into<String>, path: Option<String>, duration: Duration, success: bool) {
        let record = OperationRecord {
            operation: operation.into(),
            path,
            duration,
            success,
        };
        if !record.success {
            tracing::debug!(operation = %record.operation, path = ?record.path, "operation failed");
        }
        self.records.lock().unwrap().push(record);
    }

    /// Times `f` and records the result under `operation`.
    pub fn time<T>(&self, operation: impl Into<String>, path: Option<String>, f: impl FnOnce() -> T) -> T {
        let start = std::time::Instant::now();
        let result = f();
        self.record_operation(operation, path, start.elapsed(), true);
        result
    }

    pub fn records(&self) -> Vec<OperationRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Evaluate every configured [`AlertRule`] against the records seen so
    /// far, returning any that fire.
    pub fn check_alerts(&self) -> Vec<Alert> {
        let records = self.records.lock().unwrap();
        let rules = self.alert_rules.lock().unwrap();
        let mut alerts = Vec::new();

        for rule in rules.iter() {
            let matching: Vec<&OperationRecord> = records
                .iter()
                .filter(|r| r.operation == rule.operation)
                .collect();

            if let Some(max_duration) = rule.max_duration {
                if let Some(slow) = matching.iter().find(|r| r.duration > max_duration) {
                    alerts.push(Alert {
                        rule_operation: rule.operation.clone(),
                        message: format!(
                            "operation '{}' took {:?} (threshold {:?})",
                            rule.operation, slow.duration, max_duration
                        ),
                    });
                }
            }

            if let Some(max_failures) = rule.max_failures {
                let failures = matching.iter().filter(|r| !r.success).count();
                if failures > max_failures {
                    alerts.push(Alert {
                        rule_operation: rule.operation.clone(),
                        message: format!(
                            "operation '{}' failed {} times (threshold {})",
                            rule.operation, failures, max_failures
                        ),
                    });
                }
            }
        }

        alerts
    }

    /// Total recorded operations and the count that failed — used for the
    /// end-of-run failure summary in normal mode (spec §7).
    pub fn summary(&self) -> (usize, usize) {
        let records = self.records.lock().unwrap();
        let total = records.len();
        let failed = records.iter().filter(|r| !r.success).count();
        (total, failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_accumulate_across_calls() {
        let sink = Sink::new();
        sink.record_operation("preprocess", Some("a.txt".into()), Duration::from_millis(5), true);
        sink.record_operation("preprocess", Some("b.txt".into()), Duration::from_millis(5), false);
        let (total, failed) = sink.summary();
        assert_eq!(total, 2);
        assert_eq!(failed, 1);
    }

    #[test]
    fn duration_alert_fires_when_threshold_exceeded() {
        let sink = Sink::with_alert_rules(vec![AlertRule {
            operation: "preprocess".into(),
            max_duration: Some(Duration::from_millis(10)),
            max_failures: None,
        }]);
        sink.record_operation("preprocess", None, Duration::from_millis(50), true);
        let alerts = sink.check_alerts();
        assert_eq!(alerts.len(), 1);
    }

    #[test]
    fn failure_count_alert_requires_exceeding_not_meeting_threshold() {
        let sink = Sink::with_alert_rules(vec![AlertRule {
            operation: "validate".into(),
            max_duration: None,
            max_failures: Some(2),
        }]);
        for _ in 0..2 {
            sink.record_operation("validate", None, Duration::from_millis(1), false);
        }
        assert!(sink.check_alerts().is_empty());
        sink.record_operation("validate", None, Duration::from_millis(1), false);
        assert_eq!(sink.check_alerts().len(), 1);
    }

    #[test]
    fn time_records_success_and_returns_closure_value() {
        let sink = Sink::new();
        let value = sink.time("preprocess", None, || 42);
        assert_eq!(value, 42);
        assert_eq!(sink.summary(), (1, 0));
    }
}
