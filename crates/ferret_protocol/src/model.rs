//! File identity and the two content envelopes (`ProcessedContent`,
//! `RoutedContent`) that move between the router, preprocessors, and
//! validator manager.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::SystemTime;

/// A file on disk as seen by the File Router, before any content has been
/// extracted from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePath {
    pub path: PathBuf,
    /// Lowercased extension without the leading dot, e.g. `"pdf"`.
    pub extension: Option<String>,
    pub size: u64,
    pub modified: Option<SystemTime>,
}

impl FilePath {
    pub fn from_path(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let meta = std::fs::metadata(&path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        Ok(Self {
            size: meta.len(),
            modified: meta.modified().ok(),
            extension,
            path,
        })
    }
}

/// Tags the preprocessor family that produced a [`ProcessedContent`]. Used
/// both for observability and to let the Content Router decide whether a
/// metadata blob must be populated even when the body is empty (spec
/// invariant 5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessorType {
    PlainText,
    PdfText,
    PdfMetadata,
    OfficeText,
    OfficeMetadata,
    OpenDocumentText,
    ImageMetadata,
    AudioMetadata,
    VideoMetadata,
}

impl ProcessorType {
    /// Whether this preprocessor family can carry a metadata blob.
    pub fn is_metadata_capable(self) -> bool {
        !matches!(self, ProcessorType::PlainText)
    }
}

/// A single `{key, value}` pair inside a `ProcessedContent`'s metadata
/// stream, before it has been serialized back to text for validator
/// consumption (spec §3: "ordered sequence of `{key, value}` pairs
/// serialized back to text").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataField {
    pub key: String,
    pub value: String,
}

/// Word/char/line/page counters attached to a `ProcessedContent`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentCounters {
    pub words: usize,
    pub chars: usize,
    pub lines: usize,
    pub pages: usize,
}

/// The output of exactly one preprocessor invocation on exactly one file
/// (spec invariant 4: a file produces at most one `ProcessedContent`, and a
/// failing preprocessor must still yield one with `success = false`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedContent {
    pub original_path: String,
    pub processor_type: ProcessorType,
    pub text: String,
    pub metadata: Vec<MetadataField>,
    pub counters: ContentCounters,
    pub success: bool,
    pub error: Option<String>,
}

impl ProcessedContent {
    /// Build a successful result. Counters are derived from `text`.
    pub fn ok(original_path: impl Into<String>, processor_type: ProcessorType, text: String) -> Self {
        let counters = ContentCounters {
            words: text.split_whitespace().count(),
            chars: text.chars().count(),
            lines: text.lines().count(),
            pages: 0,
        };
        Self {
            original_path: original_path.into(),
            processor_type,
            text,
            metadata: Vec::new(),
            counters,
            success: true,
            error: None,
        }
    }

    /// Build a failed result. Per spec invariant 4 this must still be
    /// returned rather than silently dropped.
    pub fn failed(
        original_path: impl Into<String>,
        processor_type: ProcessorType,
        error: impl Into<String>,
    ) -> Self {
        Self {
            original_path: original_path.into(),
            processor_type,
            text: String::new(),
            metadata: Vec::new(),
            counters: ContentCounters::default(),
            success: false,
            error: Some(error.into()),
        }
    }

    pub fn with_metadata(mut self, metadata: Vec<MetadataField>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_pages(mut self, pages: usize) -> Self {
        self.counters.pages = pages;
        self
    }

    /// Serializes `metadata` back to the `"Key: value"` line-per-field text
    /// the spec's metadata preprocessors describe (PDF metadata §4.2,
    /// Office metadata §4.2, image EXIF §4.2).
    pub fn metadata_text(&self) -> String {
        self.metadata
            .iter()
            .map(|f| format!("{}: {}", f.key, f.value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Which structured-metadata family a [`MetadataBlob`] came from. Distinct
/// blobs keep disjoint line-number origins (spec §4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataKind {
    Image,
    Pdf,
    Office,
    Audio,
    Video,
}

/// A text serialization of one file's structured attributes (EXIF, XMP,
/// ID3, Office core properties, container tags), kept separate from the
/// document body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataBlob {
    pub kind: MetadataKind,
    pub text: String,
}

impl MetadataBlob {
    pub fn new(kind: MetadataKind, text: String) -> Self {
        Self { kind, text }
    }
}

/// The output of the Content Router: the document body plus zero or more
/// metadata blobs, each validated with its own line-number origin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutedContent {
    pub document_body: String,
    pub metadata_blobs: Vec<MetadataBlob>,
}

impl RoutedContent {
    pub fn body_only(document_body: String) -> Self {
        Self {
            document_body,
            metadata_blobs: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_not_metadata_capable() {
        assert!(!ProcessorType::PlainText.is_metadata_capable());
        assert!(ProcessorType::ImageMetadata.is_metadata_capable());
    }

    #[test]
    fn failed_processed_content_carries_error_and_no_silent_drop() {
        let pc = ProcessedContent::failed("a.pdf", ProcessorType::PdfText, "corrupt xref table");
        assert!(!pc.success);
        assert_eq!(pc.error.as_deref(), Some("corrupt xref table"));
        assert!(pc.text.is_empty());
    }

    #[test]
    fn metadata_text_renders_key_value_lines() {
        let pc = ProcessedContent::ok("a.jpg", ProcessorType::ImageMetadata, String::new())
            .with_metadata(vec![
                MetadataField { key: "Make".into(), value: "Canon".into() },
                MetadataField { key: "Model".into(), value: "EOS 5D".into() },
            ]);
        assert_eq!(pc.metadata_text(), "Make: Canon\nModel: EOS 5D");
    }

    #[test]
    fn routed_content_body_only_has_no_blobs() {
        let rc = RoutedContent::body_only("hello".into());
        assert!(rc.metadata_blobs.is_empty());
    }
}
