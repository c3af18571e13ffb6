use super::{ConvertError, ConvertResult};
use std::path::Path;

/// Extract the text content of a PDF.
///
/// PDF is not part of the folder-traversal allow-list, but explicitly listed
/// files reach this backend unconditionally.
pub fn to_text(path: &Path) -> ConvertResult<String> {
    pdf_extract::extract_text(path).map_err(|e| ConvertError::parse(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_pdf_is_parse_error() {
        let err = to_text(Path::new("/nonexistent/file.pdf")).unwrap_err();
        assert!(matches!(err, ConvertError::Parse { .. }));
    }
}
