//! Content Router (spec §4.3): splits a `ProcessedContent` into the body
//! and metadata streams validators actually consume, keeping them on
//! separate line-number origins.

use ferret_protocol::{MetadataBlob, MetadataKind, ProcessedContent, ProcessorType, RoutedContent};

fn metadata_kind_for(processor: ProcessorType) -> Option<MetadataKind> {
    match processor {
        ProcessorType::PdfMetadata => Some(MetadataKind::Pdf),
        ProcessorType::OfficeMetadata => Some(MetadataKind::Office),
        ProcessorType::OpenDocumentText => Some(MetadataKind::Office),
        ProcessorType::ImageMetadata => Some(MetadataKind::Image),
        ProcessorType::AudioMetadata => Some(MetadataKind::Audio),
        ProcessorType::VideoMetadata => Some(MetadataKind::Video),
        ProcessorType::PlainText | ProcessorType::PdfText | ProcessorType::OfficeText => None,
    }
}

/// Turn one preprocessor's output into the body/metadata split the
/// validator manager fans out over.
///
/// A purely textual source (spec §4.3: "the performance win") never gets a
/// `MetadataBlob` even if it happened to carry stray metadata fields, so
/// metadata-only validators can skip it without inspecting its content.
pub fn route_content(processed: &ProcessedContent) -> RoutedContent {
    if !processed.success {
        return RoutedContent::body_only(String::new());
    }

    match metadata_kind_for(processed.processor_type) {
        Some(kind) => {
            let mut content = RoutedContent::body_only(processed.text.clone());
            if !processed.metadata.is_empty() {
                content
                    .metadata_blobs
                    .push(MetadataBlob::new(kind, processed.metadata_text()));
            }
            content
        }
        None => RoutedContent::body_only(processed.text.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferret_protocol::MetadataField;

    #[test]
    fn plain_text_never_carries_a_metadata_blob() {
        let processed = ProcessedContent::ok(
            "notes.txt".into(),
            ProcessorType::PlainText,
            "hello world".into(),
        );
        let routed = route_content(&processed);
        assert!(routed.metadata_blobs.is_empty());
        assert_eq!(routed.document_body, "hello world");
    }

    #[test]
    fn pdf_metadata_is_split_into_its_own_blob() {
        let mut processed = ProcessedContent::ok(
            "report.pdf".into(),
            ProcessorType::PdfMetadata,
            "body text".into(),
        );
        processed.metadata.push(MetadataField {
            key: "Author".into(),
            value: "A. Writer".into(),
        });
        let routed = route_content(&processed);
        assert_eq!(routed.document_body, "body text");
        assert_eq!(routed.metadata_blobs.len(), 1);
        assert_eq!(routed.metadata_blobs[0].kind, MetadataKind::Pdf);
        assert!(routed.metadata_blobs[0].text.contains("Author: A. Writer"));
    }

    #[test]
    fn failed_processing_yields_empty_routed_content() {
        let processed = ProcessedContent::failed(
            "bad.pdf".into(),
            ProcessorType::PdfMetadata,
            "malformed".into(),
        );
        let routed = route_content(&processed);
        assert!(routed.document_body.is_empty());
        assert!(routed.metadata_blobs.is_empty());
    }
}
