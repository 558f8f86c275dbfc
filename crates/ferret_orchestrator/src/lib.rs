//! Parallel Orchestrator (spec §4.7): a bounded worker pool consuming one
//! job per file from a single queue, with cooperative cancellation, a
//! per-file soft timeout, and a final deterministic sort before formatter
//! invocation.

mod cancel;
mod pool;

pub use cancel::CancellationToken;
pub use pool::{FileOutcome, JobResult, Orchestrator, OrchestratorConfig, ProgressCallback, RunOutcome};
