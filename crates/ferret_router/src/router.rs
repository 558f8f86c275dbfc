//! File Router (spec §4.1): classifies a path and selects a preprocessor.
//! Routing itself never fails — an unroutable file is reported, not thrown
//! (spec §4.1 "routing itself never throws").

use crate::family::{self, MetadataFamily, PreprocessorCategory};
use ferret_protocol::ProcessorType;
use std::collections::HashSet;
use std::path::Path;

/// Outcome of routing one file (spec §4.1 rules 1-4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Processor(ProcessorType),
    /// No preprocessor claims this extension; the orchestrator skips the
    /// file without treating it as an error.
    Unsupported,
}

/// Given the set of enabled preprocessor categories, decides which
/// preprocessor (if any) handles a file.
#[derive(Debug, Clone)]
pub struct FileRouter {
    enabled: HashSet<PreprocessorCategory>,
}

impl FileRouter {
    pub fn new(enabled: HashSet<PreprocessorCategory>) -> Self {
        Self { enabled }
    }

    /// All preprocessor categories enabled — the router only refuses files
    /// that no preprocessor table recognizes at all.
    pub fn with_all_enabled() -> Self {
        Self::new(
            [
                PreprocessorCategory::PlainText,
                PreprocessorCategory::Pdf,
                PreprocessorCategory::Office,
                PreprocessorCategory::OpenDocument,
                PreprocessorCategory::Image,
                PreprocessorCategory::Audio,
                PreprocessorCategory::Video,
            ]
            .into_iter()
            .collect(),
        )
    }

    fn is_enabled(&self, category: PreprocessorCategory) -> bool {
        self.enabled.contains(&category)
    }

    /// Route by file path. See spec §4.1 for the rule ordering this
    /// implements; each rule is commented with its number below.
    pub fn route(&self, path: &Path) -> RouteDecision {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        self.route_extension(extension)
    }

    /// Same decision, addressed by bare extension — used by embedded-media
    /// recursion, which only has a synthetic temp filename to work with.
    pub fn route_extension(&self, extension: &str) -> RouteDecision {
        // Rule 1: metadata-capable family with its preprocessor enabled.
        if let Some(family) = family::metadata_family(extension) {
            if self.is_enabled(family.category()) {
                return RouteDecision::Processor(self.combined_processor(family));
            }
            // Rule 2: families with a text counterpart still degrade to the
            // plain extraction path when only their metadata mode is off.
            if family.has_text_counterpart() {
                return RouteDecision::Processor(self.text_only_processor(family));
            }
            // Pure metadata families (image/audio/video) have no text
            // fallback; fall through to rule 3/4.
        }

        // Rule 3: known textual source.
        if self.is_enabled(PreprocessorCategory::PlainText) && family::is_plain_text_extension(extension) {
            return RouteDecision::Processor(ProcessorType::PlainText);
        }

        // Rule 4: no match.
        RouteDecision::Unsupported
    }

    fn combined_processor(&self, family: MetadataFamily) -> ProcessorType {
        match family {
            MetadataFamily::Pdf => ProcessorType::PdfMetadata,
            MetadataFamily::Office => ProcessorType::OfficeMetadata,
            MetadataFamily::OpenDocument => ProcessorType::OpenDocumentText,
            MetadataFamily::Image => ProcessorType::ImageMetadata,
            MetadataFamily::Audio => ProcessorType::AudioMetadata,
            MetadataFamily::Video => ProcessorType::VideoMetadata,
        }
    }

    fn text_only_processor(&self, family: MetadataFamily) -> ProcessorType {
        match family {
            MetadataFamily::Pdf => ProcessorType::PdfText,
            MetadataFamily::Office => ProcessorType::OfficeText,
            MetadataFamily::OpenDocument => ProcessorType::OpenDocumentText,
            _ => unreachable!("pure metadata families have no text counterpart"),
        }
    }

    /// All extensions this router can ever claim, given its enabled
    /// categories — a pure query used by CLI help text and tests.
    pub fn supported_extensions(&self) -> Vec<&'static str> {
        const ALL: &[(&str, PreprocessorCategory)] = &[
            ("pdf", PreprocessorCategory::Pdf),
            ("docx", PreprocessorCategory::Office),
            ("xlsx", PreprocessorCategory::Office),
            ("pptx", PreprocessorCategory::Office),
            ("odt", PreprocessorCategory::OpenDocument),
            ("ods", PreprocessorCategory::OpenDocument),
            ("odp", PreprocessorCategory::OpenDocument),
            ("jpg", PreprocessorCategory::Image),
            ("jpeg", PreprocessorCategory::Image),
            ("png", PreprocessorCategory::Image),
            ("tif", PreprocessorCategory::Image),
            ("tiff", PreprocessorCategory::Image),
            ("heic", PreprocessorCategory::Image),
            ("webp", PreprocessorCategory::Image),
            ("mp3", PreprocessorCategory::Audio),
            ("wav", PreprocessorCategory::Audio),
            ("mp4", PreprocessorCategory::Video),
            ("mov", PreprocessorCategory::Video),
            ("mkv", PreprocessorCategory::Video),
            ("avi", PreprocessorCategory::Video),
            ("txt", PreprocessorCategory::PlainText),
            ("md", PreprocessorCategory::PlainText),
            ("json", PreprocessorCategory::PlainText),
            ("yaml", PreprocessorCategory::PlainText),
            ("yml", PreprocessorCategory::PlainText),
            ("rs", PreprocessorCategory::PlainText),
            ("py", PreprocessorCategory::PlainText),
        ];
        ALL.iter()
            .filter(|(_, category)| self.is_enabled(*category))
            .map(|(ext, _)| *ext)
            .collect()
    }

    /// Describe the routing decision for a bare extension without a real
    /// path — the pure query the content router and CLI `--describe` flag
    /// use.
    pub fn describe(&self, extension: &str) -> RouteDecision {
        self.route_extension(extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn pdf_with_metadata_enabled_routes_to_combined_processor() {
        let router = FileRouter::with_all_enabled();
        assert_eq!(
            router.route(&PathBuf::from("report.pdf")),
            RouteDecision::Processor(ProcessorType::PdfMetadata)
        );
    }

    #[test]
    fn pdf_with_metadata_disabled_falls_back_to_text_only() {
        let router = FileRouter::new(
            [PreprocessorCategory::PlainText].into_iter().collect(),
        );
        // Pdf category itself disabled entirely -> unsupported, since the
        // fallback requires *some* pdf-capable category to be on.
        assert_eq!(
            router.route(&PathBuf::from("report.pdf")),
            RouteDecision::Unsupported
        );
    }

    #[test]
    fn image_without_metadata_category_is_unsupported() {
        let router = FileRouter::new(
            [PreprocessorCategory::PlainText].into_iter().collect(),
        );
        assert_eq!(
            router.route(&PathBuf::from("photo.jpg")),
            RouteDecision::Unsupported
        );
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let router = FileRouter::with_all_enabled();
        assert_eq!(
            router.route(&PathBuf::from("binary.exe")),
            RouteDecision::Unsupported
        );
    }

    #[test]
    fn rust_source_routes_to_plain_text() {
        let router = FileRouter::with_all_enabled();
        assert_eq!(
            router.route(&PathBuf::from("main.rs")),
            RouteDecision::Processor(ProcessorType::PlainText)
        );
    }
}
