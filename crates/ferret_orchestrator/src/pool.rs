//! Bounded worker pool (spec §4.7): one job per file, a single cancel
//! token, a per-file soft timeout, an optional global deadline, and a
//! progress callback invoked from the completing worker.

use crate::cancel::CancellationToken;
use ferret_protocol::Finding;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// What one file-processing call returns to the orchestrator.
pub struct FileOutcome {
    pub findings: Vec<Finding>,
    pub error: Option<String>,
}

pub struct JobResult {
    pub path: PathBuf,
    pub findings: Vec<Finding>,
    pub error: Option<String>,
}

pub struct RunOutcome {
    pub results: Vec<JobResult>,
    pub cancelled: bool,
}

pub struct OrchestratorConfig {
    pub workers: usize,
    pub queue_capacity: usize,
    pub per_file_timeout: Duration,
    pub global_deadline: Option<Duration>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        let workers = 8;
        Self {
            workers,
            queue_capacity: workers * 4,
            per_file_timeout: Duration::from_secs(30),
            global_deadline: None,
        }
    }
}

pub type ProgressCallback = Box<dyn FnMut(usize, usize, &Path) + Send>;

pub struct Orchestrator {
    config: OrchestratorConfig,
}

impl Orchestrator {
    pub fn new(config: OrchestratorConfig) -> Self {
        Self { config }
    }

    /// Drives `process` over every path using the bounded pool. `process`
    /// must itself observe the cancel token between lines/I/O boundaries;
    /// the soft timeout here is a last-resort backstop, not a substitute.
    pub fn run<F>(
        &self,
        paths: Vec<PathBuf>,
        process: F,
        token: CancellationToken,
        progress: Option<ProgressCallback>,
        sink: Option<&ferret_logging::Sink>,
    ) -> RunOutcome
    where
        F: Fn(&Path, &CancellationToken) -> FileOutcome + Send + Sync + 'static,
    {
        let total = paths.len();
        let workers = self.config.workers.max(1);
        let queue_capacity = self.config.queue_capacity.max(1);

        let (job_tx, job_rx) = crossbeam::channel::bounded::<PathBuf>(queue_capacity);
        let (result_tx, result_rx) = crossbeam::channel::unbounded::<JobResult>();

        let process = Arc::new(process);
        let completed = Arc::new(AtomicUsize::new(0));
        let progress = Arc::new(Mutex::new(progress));
        let per_file_timeout = self.config.per_file_timeout;
        let deadline = self.config.global_deadline.map(|d| Instant::now() + d);

        thread::scope(|scope| {
            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                let process = Arc::clone(&process);
                let worker_token = token.clone();
                let completed = Arc::clone(&completed);
                let progress = Arc::clone(&progress);

                scope.spawn(move || {
                    while let Ok(path) = job_rx.recv() {
                        if worker_token.is_cancelled() {
                            break;
                        }

                        let started = Instant::now();
                        let outcome = run_with_soft_timeout(&path, &process, &worker_token, per_file_timeout);
                        if let Some(s) = sink {
                            s.record_operation(
                                "scan_file",
                                Some(path.to_string_lossy().to_string()),
                                started.elapsed(),
                                outcome.error.is_none(),
                            );
                        }

                        let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                        if let Ok(mut guard) = progress.lock() {
                            if let Some(cb) = guard.as_mut() {
                                cb(done, total, &path);
                            }
                        }

                        let _ = result_tx.send(JobResult { path, findings: outcome.findings, error: outcome.error });
                    }
                });
            }
            drop(result_tx);

            for path in paths {
                if token.is_cancelled() {
                    break;
                }
                if let Some(dl) = deadline {
                    if Instant::now() >= dl {
                        token.cancel();
                        break;
                    }
                }
                if job_tx.send(path).is_err() {
                    break;
                }
            }
            drop(job_tx);

            // The channel drains even on early cancellation: the aggregator
            // never loses already-completed findings (spec §4.7 Cancellation).
            let mut results: Vec<JobResult> = result_rx.iter().collect();
            results.sort_by(|a, b| a.path.cmp(&b.path));
            for result in &mut results {
                result.findings.sort_by(|a, b| {
                    a.line_number.cmp(&b.line_number).then_with(|| a.validator.cmp(&b.validator))
                });
            }

            RunOutcome { results, cancelled: token.is_cancelled() }
        })
    }
}

/// Runs `process` on a detached thread and waits up to `timeout`. On
/// timeout the call is not forcibly terminated (Rust threads can't be
/// killed) — the in-flight thread is abandoned and its eventual result
/// discarded, while this call returns a file-level error immediately.
fn run_with_soft_timeout(
    path: &Path,
    process: &Arc<dyn Fn(&Path, &CancellationToken) -> FileOutcome + Send + Sync>,
    token: &CancellationToken,
    timeout: Duration,
) -> FileOutcome {
    let (tx, rx) = crossbeam::channel::bounded(1);
    let process = Arc::clone(process);
    let owned_path = path.to_path_buf();
    let worker_token = token.clone();

    thread::spawn(move || {
        let outcome = process(&owned_path, &worker_token);
        let _ = tx.send(outcome);
    });

    match rx.recv_timeout(timeout) {
        Ok(outcome) => outcome,
        Err(_) => FileOutcome {
            findings: Vec::new(),
            error: Some(format!("file processing exceeded soft timeout of {timeout:?}")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome_with(text: &str) -> FileOutcome {
        FileOutcome { findings: Vec::new(), error: if text.is_empty() { None } else { Some(text.to_string()) } }
    }

    #[test]
    fn all_jobs_complete_and_results_are_sorted_by_path() {
        let orchestrator = Orchestrator::new(OrchestratorConfig { workers: 2, ..Default::default() });
        let paths = vec![PathBuf::from("c.txt"), PathBuf::from("a.txt"), PathBuf::from("b.txt")];
        let run = orchestrator.run(
            paths,
            |_path, _token| outcome_with(""),
            CancellationToken::new(),
            None,
            None,
        );
        let ordered: Vec<_> = run.results.iter().map(|r| r.path.to_string_lossy().to_string()).collect();
        assert_eq!(ordered, vec!["a.txt", "b.txt", "c.txt"]);
        assert!(!run.cancelled);
    }

    #[test]
    fn soft_timeout_produces_a_file_level_error_without_losing_other_results() {
        let orchestrator = Orchestrator::new(OrchestratorConfig {
            workers: 2,
            per_file_timeout: Duration::from_millis(20),
            ..Default::default()
        });
        let paths = vec![PathBuf::from("slow.txt"), PathBuf::from("fast.txt")];
        let run = orchestrator.run(
            paths,
            |path, _token| {
                if path.to_string_lossy().contains("slow") {
                    thread::sleep(Duration::from_millis(200));
                }
                outcome_with("")
            },
            CancellationToken::new(),
            None,
            None,
        );
        assert_eq!(run.results.len(), 2);
        let slow = run.results.iter().find(|r| r.path.to_string_lossy().contains("slow")).unwrap();
        assert!(slow.error.is_some());
    }

    #[test]
    fn progress_callback_observes_every_completion() {
        let orchestrator = Orchestrator::new(OrchestratorConfig { workers: 2, ..Default::default() });
        let paths = vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")];
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = Arc::clone(&seen);
        let progress: ProgressCallback = Box::new(move |_done, _total, _path| {
            seen_clone.fetch_add(1, Ordering::SeqCst);
        });
        orchestrator.run(paths, |_p, _t| outcome_with(""), CancellationToken::new(), Some(progress), None);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn cancellation_before_submission_returns_no_results_but_flags_cancelled() {
        let orchestrator = Orchestrator::new(OrchestratorConfig { workers: 2, ..Default::default() });
        let token = CancellationToken::new();
        token.cancel();
        let run = orchestrator.run(
            vec![PathBuf::from("a.txt")],
            |_p, _t| outcome_with(""),
            token,
            None,
            None,
        );
        assert!(run.cancelled);
    }
}
