//! Format-specific preprocessors (spec §4.2): each implements
//! `can_process(path) -> bool` / `process(path, context) -> ProcessedContent`
//! for one file family, plus the umbrella [`process_path`] the orchestrator
//! actually calls, which resolves routing and embedded-media recursion.

mod audio;
mod image;
mod office;
mod opendocument;
mod pdf;
mod plain_text;
pub mod retry;
mod video;

pub use audio::AudioPreprocessor;
pub use image::ImagePreprocessor;
pub use office::OfficePreprocessor;
pub use opendocument::OpenDocumentPreprocessor;
pub use pdf::PdfPreprocessor;
pub use plain_text::PlainTextPreprocessor;
pub use retry::RetryPolicy;
pub use video::VideoPreprocessor;

use ferret_protocol::{PreprocessError, ProcessedContent, ProcessorType};
use ferret_router::{EmbedContext, FileRouter, RouteDecision};
use std::path::Path;
use std::time::{Duration, Instant};

/// A per-run resource ceiling every preprocessor is called under (spec
/// §4.2: "All preprocessors enforce a file-size limit and a per-file
/// timeout").
#[derive(Debug, Clone, Copy)]
pub struct PreprocessLimits {
    pub max_size_bytes: u64,
    pub timeout: Duration,
    pub retry: RetryPolicy,
    /// Loop guard on embedded-media recursion (spec §9: "bounds recursion
    /// depth, default 3").
    pub max_embed_depth: usize,
}

impl Default for PreprocessLimits {
    fn default() -> Self {
        Self {
            max_size_bytes: plain_text::DEFAULT_MAX_SIZE_BYTES,
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
            max_embed_depth: 3,
        }
    }
}

/// Runs the preprocessor selected by `decision` against `path`, honoring
/// the size limit and timeout, and recursing into embedded media for
/// Office documents (spec §4.1 "Embedded media", §4.2 "Office metadata").
pub fn process_path(
    path: &Path,
    decision: RouteDecision,
    limits: &PreprocessLimits,
    embed: &EmbedContext,
    sink: Option<&ferret_logging::Sink>,
) -> ProcessedContent {
    let processor_type = match decision {
        RouteDecision::Processor(p) => p,
        RouteDecision::Unsupported => {
            return ProcessedContent::failed(
                embed.display_path(&path.display().to_string()),
                ProcessorType::PlainText,
                "no preprocessor available",
            )
        }
    };

    if let Ok(size) = std::fs::metadata(path).map(|m| m.len()) {
        if size > limits.max_size_bytes {
            return ProcessedContent::failed(
                embed.display_path(&path.display().to_string()),
                processor_type,
                PreprocessError::SizeLimitExceeded { size, limit: limits.max_size_bytes }.to_string(),
            );
        }
    }

    let started = Instant::now();
    let mut result = run_processor(path, processor_type, limits);
    let elapsed = started.elapsed();

    if let Some(sink) = sink {
        sink.record_operation("preprocess", Some(path.display().to_string()), elapsed, result.success);
    }

    if elapsed > limits.timeout {
        result = ProcessedContent::failed(
            embed.display_path(&path.display().to_string()),
            processor_type,
            PreprocessError::Timeout(elapsed).to_string(),
        );
    }

    if embed.depth() > 0 {
        result.original_path = embed.display_path(&result.original_path);
    }

    if processor_type == ProcessorType::OfficeMetadata {
        extract_embedded_media(path, &mut result, limits, embed, sink);
    }

    result
}

fn run_processor(path: &Path, processor_type: ProcessorType, limits: &PreprocessLimits) -> ProcessedContent {
    let outcome: Result<ProcessedContent, PreprocessError> = limits.retry.run(
        || match processor_type {
            ProcessorType::PlainText => PlainTextPreprocessor { max_size_bytes: limits.max_size_bytes }.process(path),
            ProcessorType::PdfText => PdfPreprocessor::default().process_text(path),
            ProcessorType::PdfMetadata => PdfPreprocessor::default().process_metadata(path),
            ProcessorType::OfficeText => OfficePreprocessor.process_text(path),
            ProcessorType::OfficeMetadata => OfficePreprocessor.process_metadata(path),
            ProcessorType::OpenDocumentText => OpenDocumentPreprocessor.process(path),
            ProcessorType::ImageMetadata => ImagePreprocessor.process(path),
            ProcessorType::AudioMetadata => AudioPreprocessor.process(path),
            ProcessorType::VideoMetadata => VideoPreprocessor.process(path),
        },
        |err| matches!(err, PreprocessError::Io(_)),
    );

    match outcome {
        Ok(content) => content,
        Err(err) => ProcessedContent::failed(path.display().to_string(), processor_type, err.to_string()),
    }
}

/// Extracts embedded media from an Office document to temp paths and
/// re-enters the router for each, appending the child output under
/// `--- Embedded Media N (<name>) ---` banners (spec §4.2).
fn extract_embedded_media(
    path: &Path,
    result: &mut ProcessedContent,
    limits: &PreprocessLimits,
    embed: &EmbedContext,
    sink: Option<&ferret_logging::Sink>,
) {
    if embed.depth() >= limits.max_embed_depth {
        tracing::warn!(
            path = %path.display(),
            depth = embed.depth(),
            max = limits.max_embed_depth,
            "embedded-media recursion depth limit reached, not descending further"
        );
        return;
    }

    let Ok(file) = std::fs::File::open(path) else { return };
    let Ok(mut archive) = zip::ZipArchive::new(file) else { return };

    let media_names: Vec<String> = archive
        .file_names()
        .filter(|n| n.contains("/media/"))
        .map(|n| n.to_string())
        .collect();

    if media_names.is_empty() {
        return;
    }

    let Ok(temp_dir) = tempfile::tempdir() else { return };
    let router = FileRouter::with_all_enabled();
    let child_embed = embed.descend(&path.display().to_string());

    for (index, name) in media_names.iter().enumerate() {
        let Ok(mut entry) = archive.by_name(name) else { continue };
        let file_name = std::path::Path::new(name)
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("media{index}"));
        let temp_path = temp_dir.path().join(&file_name);
        let Ok(mut out) = std::fs::File::create(&temp_path) else { continue };
        if std::io::copy(&mut entry, &mut out).is_err() {
            continue;
        }

        let decision = router.route(&temp_path);
        if matches!(decision, RouteDecision::Unsupported) {
            continue;
        }
        let child = process_path(&temp_path, decision, limits, &child_embed, sink);
        if child.success && !child.text.trim().is_empty() {
            result.text.push_str(&format!("\n--- Embedded Media {} ({file_name}) ---\n", index + 1));
            result.text.push_str(&child.text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn unsupported_route_never_panics_and_reports_failure() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "data").unwrap();
        let result = process_path(
            file.path(),
            RouteDecision::Unsupported,
            &PreprocessLimits::default(),
            &EmbedContext::root(),
            None,
        );
        assert!(!result.success);
    }

    #[test]
    fn oversized_plain_text_file_fails_before_reading() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&vec![b'a'; 100]).unwrap();
        let limits = PreprocessLimits { max_size_bytes: 10, ..PreprocessLimits::default() };
        let result = process_path(
            file.path(),
            RouteDecision::Processor(ProcessorType::PlainText),
            &limits,
            &EmbedContext::root(),
            None,
        );
        assert!(!result.success);
        assert!(result.error.unwrap().contains("size limit"));
    }

    #[test]
    fn embedded_media_recursion_stops_at_the_depth_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested.docx");
        {
            let file = std::fs::File::create(&path).unwrap();
            let mut writer = zip::ZipWriter::new(file);
            writer
                .start_file("word/media/image1.png", zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"fake-image-bytes").unwrap();
            writer.finish().unwrap();
        }

        let limits = PreprocessLimits::default();
        let mut embed = EmbedContext::root();
        for _ in 0..limits.max_embed_depth {
            embed = embed.descend("ancestor.docx");
        }

        let result =
            process_path(&path, RouteDecision::Processor(ProcessorType::OfficeMetadata), &limits, &embed, None);
        assert!(result.success);
        assert!(!result.text.contains("Embedded Media"));
    }
}
