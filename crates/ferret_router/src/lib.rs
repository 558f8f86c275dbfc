//! File Router and Content Router (spec §4.1, §4.3): classifies files by
//! extension, selects a preprocessor, and later splits that preprocessor's
//! output into the body/metadata streams the validator layer consumes.

mod content_router;
mod embed;
mod family;
mod router;

pub use content_router::route_content;
pub use embed::EmbedContext;
pub use family::{is_metadata_capable, is_plain_text_extension, metadata_family, MetadataFamily, PreprocessorCategory};
pub use router::{FileRouter, RouteDecision};
