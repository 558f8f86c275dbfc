//! Image metadata preprocessor (spec §4.2): EXIF keys emitted in sorted
//! order, GPS values preserved textually.

use ferret_protocol::{MetadataField, PreprocessError, ProcessedContent, ProcessorType};
use std::path::Path;

/// `exif::Tag`'s `Display` impl renders concatenated PascalCase (e.g.
/// `"GPSLatitude"`); the metadata validator's field vocabulary matches
/// lowercased, space-separated words (e.g. `"gps latitude"`). Split on
/// case transitions — including the acronym-then-word boundary inside a
/// run of capitals — so the emitted key lines up with that vocabulary.
fn split_tag_name(tag: &str) -> String {
    let chars: Vec<char> = tag.chars().collect();
    let mut out = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();
            let boundary =
                prev.is_lowercase() || (prev.is_uppercase() && next.is_some_and(|n| n.is_lowercase()));
            if boundary {
                out.push(' ');
            }
        }
        out.push(c);
    }
    out
}

pub struct ImagePreprocessor;

impl ImagePreprocessor {
    pub fn process(&self, path: &Path) -> Result<ProcessedContent, PreprocessError> {
        let display = path.display().to_string();
        let file = std::fs::File::open(path).map_err(|e| PreprocessError::Io(e.to_string()))?;
        let mut buf_reader = std::io::BufReader::new(file);

        let exif_reader = exif::Reader::new();
        let exif_data = match exif_reader.read_from_container(&mut buf_reader) {
            Ok(data) => data,
            Err(e) => {
                return Err(PreprocessError::Malformed { format: "image".into(), message: e.to_string() })
            }
        };

        let mut fields: Vec<MetadataField> = exif_data
            .fields()
            .map(|field| MetadataField {
                key: split_tag_name(&field.tag.to_string()),
                value: field.display_value().with_unit(&exif_data).to_string(),
            })
            .collect();
        fields.sort_by(|a, b| a.key.cmp(&b.key));

        let text = fields
            .iter()
            .map(|f| format!("{}: {}", f.key, f.value))
            .collect::<Vec<_>>()
            .join("\n");

        Ok(ProcessedContent::ok(display, ProcessorType::ImageMetadata, text).with_metadata(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gps_latitude_tag_gets_a_space_before_the_word_after_the_acronym() {
        assert_eq!(split_tag_name("GPSLatitude"), "GPS Latitude");
    }

    #[test]
    fn gps_longitude_tag_gets_a_space_before_the_word_after_the_acronym() {
        assert_eq!(split_tag_name("GPSLongitude"), "GPS Longitude");
    }

    #[test]
    fn single_word_tag_is_left_unchanged() {
        assert_eq!(split_tag_name("Artist"), "Artist");
    }

    #[test]
    fn regular_camel_boundary_gets_a_space() {
        assert_eq!(split_tag_name("DateTimeOriginal"), "Date Time Original");
    }
}
