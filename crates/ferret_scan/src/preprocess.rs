//! `--preprocess-only` mode (spec §6 "Preprocessor output envelope"): dumps
//! each file's extracted `ProcessedContent` and exits without running any
//! validator.

use ferret_logging::Sink;
use ferret_preprocessors::{process_path, PreprocessLimits};
use ferret_router::{EmbedContext, FileRouter, RouteDecision};
use std::fmt::Write;
use std::path::Path;

pub fn dump(files: &[std::path::PathBuf], router: &FileRouter, limits: &PreprocessLimits, sink: &Sink) -> String {
    let mut out = String::new();
    for path in files {
        render_one(&mut out, path, router, limits, sink);
    }
    out
}

fn render_one(out: &mut String, path: &Path, router: &FileRouter, limits: &PreprocessLimits, sink: &Sink) {
    let _ = writeln!(out, "=== FILE: {} ===", path.display());

    let decision = router.route(path);
    if decision == RouteDecision::Unsupported {
        let _ = writeln!(out, "Status: Error - no preprocessor available");
        return;
    }

    let processed = process_path(path, decision, limits, &EmbedContext::root(), Some(sink));
    if processed.success {
        let _ = writeln!(out, "Status: OK");
        let _ = writeln!(out, "{}", processed.text);
    } else {
        let message = processed.error.as_deref().unwrap_or("unknown error");
        let _ = writeln!(out, "Status: Error - {message}");
    }
}
