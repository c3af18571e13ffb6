pub mod archive;
pub mod html;
pub mod office;
pub mod pdf;
pub mod sheet;
pub mod text;

mod table;

use std::path::Path;
use thiserror::Error;

/// Result of converting one document.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub markdown: String,
}

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("no converter for .{extension} files")]
    UnsupportedFormat { extension: String },

    #[error("file has no extension")]
    MissingExtension,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse {context}: {message}")]
    Parse { context: String, message: String },
}

impl ConvertError {
    pub(crate) fn parse<P: AsRef<Path>, S: ToString>(path: P, message: S) -> Self {
        ConvertError::Parse {
            context: path.as_ref().display().to_string(),
            message: message.to_string(),
        }
    }
}

pub type ConvertResult<T> = std::result::Result<T, ConvertError>;

/// Converter capability: turn a document on disk into Markdown text.
///
/// The batch runner only depends on this trait, so tests can substitute a
/// canned converter for the real format backends.
pub trait Convert {
    fn convert(&self, path: &Path) -> ConvertResult<Conversion>;
}

/// The production converter, dispatching on file extension to the statically
/// linked format backends. Constructed once at startup and reused for every
/// file in the batch.
pub struct DocumentConverter {
    _private: (),
}

impl DocumentConverter {
    /// Backend availability is a startup concern: callers must treat a
    /// construction failure as fatal before any conversion begins.
    pub fn new() -> ConvertResult<Self> {
        Ok(Self { _private: () })
    }
}

impl Convert for DocumentConverter {
    fn convert(&self, path: &Path) -> ConvertResult<Conversion> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or(ConvertError::MissingExtension)?;

        let markdown = match extension.as_str() {
            "txt" | "md" | "markdown" | "json" | "xml" => text::read_text(path)?,
            "csv" => text::csv_to_table(path)?,
            "html" | "htm" => html::to_markdown(path)?,
            "xlsx" | "xls" => sheet::workbook_to_markdown(path)?,
            "docx" => office::docx_to_markdown(path)?,
            "pptx" => office::pptx_to_markdown(path)?,
            "pdf" => pdf::to_text(path)?,
            "zip" => archive::zip_to_listing(path)?,
            other => {
                return Err(ConvertError::UnsupportedFormat {
                    extension: other.to_string(),
                })
            }
        };

        Ok(Conversion { markdown })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_plain_text_passthrough() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("note.txt");
        fs::write(&path, "hello").unwrap();

        let converter = DocumentConverter::new().unwrap();
        let conversion = converter.convert(&path).unwrap();
        assert_eq!(conversion.markdown, "hello");
    }

    #[test]
    fn test_unsupported_extension_is_item_level() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("track.mp3");
        fs::write(&path, b"\xffnot audio").unwrap();

        let converter = DocumentConverter::new().unwrap();
        let err = converter.convert(&path).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedFormat { ref extension } if extension == "mp3"));
    }

    #[test]
    fn test_missing_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README");
        fs::write(&path, "readme").unwrap();

        let converter = DocumentConverter::new().unwrap();
        let err = converter.convert(&path).unwrap_err();
        assert!(matches!(err, ConvertError::MissingExtension));
    }

    #[test]
    fn test_extension_dispatch_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("NOTE.TXT");
        fs::write(&path, "shouting").unwrap();

        let converter = DocumentConverter::new().unwrap();
        let conversion = converter.convert(&path).unwrap();
        assert_eq!(conversion.markdown, "shouting");
    }
}
