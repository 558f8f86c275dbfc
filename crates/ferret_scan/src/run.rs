//! Wires the in-scope pipeline together end to end (spec §3.11): File
//! Router -> Preprocessor -> Content Router -> Context Analyzer ->
//! Validator Manager -> Parallel Orchestrator -> Suppression split ->
//! (reference) Formatter.

use crate::cli::Args;
use crate::{discover, preprocess, validators};
use anyhow::{Context as _, Result};
use chrono::Utc;
use ferret_formatter::{FormatKind, Formatter, JsonFormatter, TextFormatter, YamlFormatter};
use ferret_logging::{LogConfig, Sink};
use ferret_manager::{ManagerItem, ValidatorManager};
use ferret_orchestrator::{CancellationToken, FileOutcome, Orchestrator, OrchestratorConfig};
use ferret_preprocessors::{process_path, PreprocessLimits};
use ferret_protocol::Finding;
use ferret_router::{route_content, EmbedContext, FileRouter};
use ferret_suppression::RuleStore;
use std::path::Path;
use std::sync::Arc;

/// Exit codes from spec §6: `0` success, `1` blocking-threshold findings,
/// `2` system error. `main.rs` turns the `Result` itself into `2`.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_BLOCKED: i32 = 1;

/// Confidence a finding must reach to block the run when quiet
/// (pre-commit) mode is active and the caller didn't name an explicit
/// `--confidence` floor to reuse as the blocking threshold (spec §6:
/// "default: any high-confidence finding in pre-commit mode").
const DEFAULT_PRE_COMMIT_BLOCKING_CONFIDENCE: f64 = 80.0;

/// Environment variables that indicate a pre-commit/CI context (spec §6:
/// "detected by environment variables").
const PRE_COMMIT_ENV_VARS: &[&str] = &["PRE_COMMIT", "CI", "GIT_COMMIT"];

fn detect_pre_commit_env() -> bool {
    PRE_COMMIT_ENV_VARS.iter().any(|var| std::env::var_os(var).is_some())
}

pub fn run(args: Args) -> Result<i32> {
    let quiet_mode = detect_pre_commit_env();
    let _ = ferret_logging::init_logging(LogConfig { app_name: "ferret_scan", verbose: args.verbose, quiet_mode });

    let files = discover::discover(&args.paths, args.recursive);
    if files.is_empty() {
        tracing::warn!("no input files matched the given path(s)");
    }

    let router = FileRouter::with_all_enabled();
    let limits = PreprocessLimits::default();
    let sink = Sink::new();

    if args.preprocess_only {
        let dump = preprocess::dump(&files, &router, &limits, &sink);
        write_output(args.output.as_deref(), &dump)?;
        return Ok(EXIT_SUCCESS);
    }

    let manager = Arc::new(ValidatorManager::new(validators::build_validators(&args.checks)));
    let router = Arc::new(router);
    let limits = Arc::new(limits);

    let process = {
        let manager = Arc::clone(&manager);
        let router = Arc::clone(&router);
        let limits = Arc::clone(&limits);
        move |path: &Path, _token: &CancellationToken| -> FileOutcome { process_one_file(path, &router, &limits, &manager) }
    };

    let orchestrator = Orchestrator::new(OrchestratorConfig::default());
    let outcome = orchestrator.run(files, process, CancellationToken::new(), None, Some(&sink));

    let mut findings: Vec<Finding> = Vec::new();
    for result in outcome.results {
        if let Some(error) = &result.error {
            tracing::error!(path = %result.path.display(), error = %error, "file processing error");
        }
        findings.extend(result.findings);
    }

    let min_confidence = args.confidence.unwrap_or(0.0);
    findings.retain(|finding| finding.confidence >= min_confidence);

    if let Some(generate_to) = &args.generate_suppressions {
        let rules = ferret_suppression::generate_rules(&findings);
        ferret_suppression::save(&RuleStore::from_rules(rules), generate_to)
            .context("writing generated suppression rules")?;
    }

    let store = match &args.suppression_file {
        Some(path) if path.exists() => ferret_suppression::load(path).context("loading suppression file")?,
        _ => RuleStore::new(),
    };
    let (active, suppressed) = store.partition(findings, Utc::now());

    let kind: FormatKind = args.format.parse().map_err(anyhow::Error::msg)?;
    if !kind.has_reference_implementation() {
        anyhow::bail!(
            "output format '{kind}' has no reference implementation in this crate; \
             it is an external formatter plugin per the formatter contract"
        );
    }
    let formatter: Box<dyn Formatter> = match kind {
        FormatKind::Text => Box::new(TextFormatter),
        FormatKind::Json => Box::new(JsonFormatter),
        FormatKind::Yaml => Box::new(YamlFormatter),
        _ => unreachable!("checked has_reference_implementation above"),
    };
    let rendered = formatter.format(&active, &suppressed)?;
    write_output(args.output.as_deref(), &rendered)?;

    let (total, failed) = sink.summary();
    if failed > 0 {
        tracing::warn!(total, failed, "some files failed to process");
    }

    let blocking_threshold = if quiet_mode { Some(args.confidence.unwrap_or(DEFAULT_PRE_COMMIT_BLOCKING_CONFIDENCE)) } else { None };
    if let Some(threshold) = blocking_threshold {
        if active.iter().any(|finding| finding.confidence >= threshold) {
            return Ok(EXIT_BLOCKED);
        }
    }

    Ok(EXIT_SUCCESS)
}

/// The single-file closure the orchestrator's worker pool calls (spec
/// §4.7): route, preprocess, split into body/metadata streams, then run
/// the whole validator-manager contract on the result.
fn process_one_file(path: &Path, router: &FileRouter, limits: &PreprocessLimits, manager: &ValidatorManager) -> FileOutcome {
    let decision = router.route(path);
    let processed = process_path(path, decision, limits, &EmbedContext::root(), None);
    if !processed.success {
        return FileOutcome { findings: Vec::new(), error: processed.error.clone() };
    }

    let routed = route_content(&processed);
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    let item = ManagerItem { filename: &processed.original_path, extension, routed: &routed };
    FileOutcome { findings: manager.process_one(&item), error: None }
}

fn write_output(output: Option<&Path>, rendered: &str) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, rendered).with_context(|| format!("writing output to {}", path.display())),
        None => {
            println!("{rendered}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferret_router::RouteDecision;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn process_one_file_routes_and_validates_a_plain_text_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "contact me at alice@example.com").unwrap();

        let router = FileRouter::with_all_enabled();
        let limits = PreprocessLimits::default();
        let manager = ValidatorManager::new(validators::build_validators(&[]));
        let outcome = process_one_file(&file, &router, &limits, &manager);

        assert!(outcome.error.is_none());
        assert!(outcome.findings.iter().any(|f| f.validator == "email"));
    }

    #[test]
    fn unsupported_extension_yields_an_error_outcome() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("binary.exe");
        fs::write(&file, "data").unwrap();

        let router = FileRouter::with_all_enabled();
        assert_eq!(router.route(&file), RouteDecision::Unsupported);

        let manager = ValidatorManager::new(Vec::new());
        let outcome = process_one_file(&file, &router, &PreprocessLimits::default(), &manager);
        assert!(outcome.error.is_some());
    }
}
