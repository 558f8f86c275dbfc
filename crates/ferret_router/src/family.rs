//! Extension classification tables (spec §4.1). Grounded on the
//! glob/extension tagging rules the teacher's tagger matched files against,
//! generalized here to a fixed built-in table rather than user rules.

/// A category of preprocessor that can be individually enabled/disabled
/// (spec §4.1, §6 `enable_preprocessors`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreprocessorCategory {
    PlainText,
    Pdf,
    Office,
    OpenDocument,
    Image,
    Audio,
    Video,
}

/// Which metadata-capable family (if any) an extension belongs to, used by
/// the content router's "can this extension contain metadata?" predicate
/// (spec §4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataFamily {
    Image,
    Pdf,
    Office,
    OpenDocument,
    Audio,
    Video,
}

const PDF_EXTS: &[&str] = &["pdf"];
const OFFICE_EXTS: &[&str] = &["docx", "xlsx", "pptx"];
const OPENDOCUMENT_EXTS: &[&str] = &["odt", "ods", "odp"];
const IMAGE_EXTS: &[&str] = &["jpg", "jpeg", "png", "tif", "tiff", "heic", "webp"];
const AUDIO_EXTS: &[&str] = &["mp3", "wav"];
const VIDEO_EXTS: &[&str] = &["mp4", "mov", "mkv", "avi"];

/// Source-code and plain-text extensions the plain-text preprocessor
/// accepts directly (spec §4.1 rule 3).
const PLAIN_TEXT_EXTS: &[&str] = &[
    "txt", "md", "json", "yaml", "yml", "ini", "conf", "env", "csv", "log", "py", "js", "ts",
    "go", "rs", "java", "c", "h", "cpp", "hpp", "rb", "php", "sh", "toml", "xml", "html", "css",
    "sql",
];

fn normalized_ext(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}

/// The metadata family an extension belongs to, if any.
pub fn metadata_family(extension: &str) -> Option<MetadataFamily> {
    let ext = normalized_ext(extension);
    if PDF_EXTS.contains(&ext.as_str()) {
        Some(MetadataFamily::Pdf)
    } else if OFFICE_EXTS.contains(&ext.as_str()) {
        Some(MetadataFamily::Office)
    } else if OPENDOCUMENT_EXTS.contains(&ext.as_str()) {
        Some(MetadataFamily::OpenDocument)
    } else if IMAGE_EXTS.contains(&ext.as_str()) {
        Some(MetadataFamily::Image)
    } else if AUDIO_EXTS.contains(&ext.as_str()) {
        Some(MetadataFamily::Audio)
    } else if VIDEO_EXTS.contains(&ext.as_str()) {
        Some(MetadataFamily::Video)
    } else {
        None
    }
}

/// `true` when this extension's content can ever carry a metadata stream.
pub fn is_metadata_capable(extension: &str) -> bool {
    metadata_family(extension).is_some()
}

/// `true` when the plain-text preprocessor accepts this extension directly
/// (spec §4.1 rule 3).
pub fn is_plain_text_extension(extension: &str) -> bool {
    PLAIN_TEXT_EXTS.contains(&normalized_ext(extension).as_str())
}

impl MetadataFamily {
    pub fn category(self) -> PreprocessorCategory {
        match self {
            MetadataFamily::Image => PreprocessorCategory::Image,
            MetadataFamily::Pdf => PreprocessorCategory::Pdf,
            MetadataFamily::Office => PreprocessorCategory::Office,
            MetadataFamily::OpenDocument => PreprocessorCategory::OpenDocument,
            MetadataFamily::Audio => PreprocessorCategory::Audio,
            MetadataFamily::Video => PreprocessorCategory::Video,
        }
    }

    /// Whether this family's preprocessor can also emit document body text,
    /// as opposed to metadata-only families (image/audio/video).
    pub fn has_text_counterpart(self) -> bool {
        matches!(
            self,
            MetadataFamily::Pdf | MetadataFamily::Office | MetadataFamily::OpenDocument
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_and_office_are_metadata_capable_with_text() {
        assert!(metadata_family("pdf").unwrap().has_text_counterpart());
        assert!(metadata_family(".docx").unwrap().has_text_counterpart());
    }

    #[test]
    fn image_is_metadata_capable_without_text() {
        assert!(!metadata_family("jpg").unwrap().has_text_counterpart());
    }

    #[test]
    fn unknown_extension_has_no_family() {
        assert!(metadata_family("xyz123").is_none());
    }

    #[test]
    fn rust_source_is_plain_text() {
        assert!(is_plain_text_extension("rs"));
        assert!(!is_plain_text_extension("pdf"));
    }
}
