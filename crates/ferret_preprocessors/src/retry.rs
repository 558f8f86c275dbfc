//! Shared transient-retry helper (spec §4.2: "Retry is allowed for
//! transient errors up to a small bound (default 3) with exponential
//! back-off").

use std::thread;
use std::time::Duration;

/// A small, cheaply-cloned backoff schedule. Preprocessors that talk to
/// the filesystem (the only transient failure source in this pipeline)
/// share one policy instead of each hand-rolling a loop.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(20),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self { max_attempts: max_attempts.max(1), base_delay }
    }

    /// Runs `op` up to `max_attempts` times. `is_transient` decides whether
    /// a given error is worth retrying at all (e.g. a malformed-content
    /// error never is). Delay doubles each attempt.
    pub fn run<T, E>(
        &self,
        mut op: impl FnMut() -> Result<T, E>,
        is_transient: impl Fn(&E) -> bool,
    ) -> Result<T, E> {
        let mut attempt = 0;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(err) if attempt + 1 < self.max_attempts && is_transient(&err) => {
                    let delay = self.base_delay * 2u32.pow(attempt);
                    thread::sleep(delay);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn retries_transient_errors_until_success() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1));
        let attempts = Cell::new(0);
        let result: Result<i32, &str> = policy.run(
            || {
                let n = attempts.get() + 1;
                attempts.set(n);
                if n < 3 {
                    Err("transient")
                } else {
                    Ok(42)
                }
            },
            |_| true,
        );
        assert_eq!(result, Ok(42));
        assert_eq!(attempts.get(), 3);
    }

    #[test]
    fn non_transient_error_is_not_retried() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1));
        let attempts = Cell::new(0);
        let result: Result<i32, &str> = policy.run(
            || {
                attempts.set(attempts.get() + 1);
                Err("fatal")
            },
            |_| false,
        );
        assert_eq!(result, Err("fatal"));
        assert_eq!(attempts.get(), 1);
    }

    #[test]
    fn exhausts_attempts_and_returns_last_error() {
        let policy = RetryPolicy::new(2, Duration::from_millis(1));
        let attempts = Cell::new(0);
        let result: Result<i32, &str> = policy.run(
            || {
                attempts.set(attempts.get() + 1);
                Err("transient")
            },
            |_| true,
        );
        assert_eq!(result, Err("transient"));
        assert_eq!(attempts.get(), 2);
    }
}
