//! Plain-text preprocessor (spec §4.2): UTF-8 (or best-effort) decode,
//! capped by a configurable size limit, no metadata.

use ferret_protocol::{PreprocessError, ProcessedContent, ProcessorType};
use std::path::Path;

pub const DEFAULT_MAX_SIZE_BYTES: u64 = 10 * 1024 * 1024;

pub struct PlainTextPreprocessor {
    pub max_size_bytes: u64,
}

impl Default for PlainTextPreprocessor {
    fn default() -> Self {
        Self { max_size_bytes: DEFAULT_MAX_SIZE_BYTES }
    }
}

impl PlainTextPreprocessor {
    pub fn process(&self, path: &Path) -> Result<ProcessedContent, PreprocessError> {
        let display = path.display().to_string();
        let size = std::fs::metadata(path)
            .map_err(|e| PreprocessError::Io(e.to_string()))?
            .len();
        if size > self.max_size_bytes {
            return Err(PreprocessError::SizeLimitExceeded { size, limit: self.max_size_bytes });
        }

        let bytes = std::fs::read(path).map_err(|e| PreprocessError::Io(e.to_string()))?;
        let text = String::from_utf8(bytes.clone())
            .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());

        Ok(ProcessedContent::ok(display, ProcessorType::PlainText, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn reads_valid_utf8_verbatim() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "hello world").unwrap();
        let result = PlainTextPreprocessor::default().process(file.path()).unwrap();
        assert_eq!(result.text, "hello world");
        assert!(result.metadata.is_empty());
    }

    #[test]
    fn rejects_files_over_the_size_limit() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&vec![b'a'; 100]).unwrap();
        let preprocessor = PlainTextPreprocessor { max_size_bytes: 10 };
        let err = preprocessor.process(file.path()).unwrap_err();
        assert!(matches!(err, PreprocessError::SizeLimitExceeded { size: 100, limit: 10 }));
    }

    #[test]
    fn decodes_invalid_utf8_best_effort_instead_of_failing() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0x68, 0x69, 0xff, 0xfe]).unwrap();
        let result = PlainTextPreprocessor::default().process(file.path()).unwrap();
        assert!(result.text.starts_with("hi"));
    }
}
