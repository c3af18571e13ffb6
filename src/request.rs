use crate::error::{BatchError, Result};
use std::path::{Path, PathBuf};

/// The two path lists supplied at startup, immutable for the run.
///
/// Each list arrives as a file containing a JSON array of absolute path
/// strings. Missing or malformed input fails the whole run before any
/// conversion is attempted.
#[derive(Debug, Clone, Default)]
pub struct ConversionRequest {
    pub files: Vec<PathBuf>,
    pub folders: Vec<PathBuf>,
}

impl ConversionRequest {
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(files_json: P, folders_json: Q) -> Result<Self> {
        let files = read_path_list(files_json.as_ref())?;
        let folders = read_path_list(folders_json.as_ref())?;

        Ok(Self { files, folders })
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.folders.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len() + self.folders.len()
    }
}

fn read_path_list(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        return Err(BatchError::InputNotFound {
            path: path.display().to_string(),
        });
    }

    let content = std::fs::read_to_string(path)?;

    let entries: Vec<String> =
        serde_json::from_str(&content).map_err(|e| BatchError::InvalidJson {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    Ok(entries.into_iter().map(PathBuf::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_list(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_valid_lists() {
        let dir = TempDir::new().unwrap();
        let files = write_list(&dir, "files.json", r#"["/tmp/a.txt", "/tmp/b.docx"]"#);
        let folders = write_list(&dir, "folders.json", r#"["/tmp/docs"]"#);

        let request = ConversionRequest::load(&files, &folders).unwrap();
        assert_eq!(request.files.len(), 2);
        assert_eq!(request.folders.len(), 1);
        assert_eq!(request.files[0], PathBuf::from("/tmp/a.txt"));
        assert_eq!(request.len(), 3);
    }

    #[test]
    fn test_load_empty_lists() {
        let dir = TempDir::new().unwrap();
        let files = write_list(&dir, "files.json", "[]");
        let folders = write_list(&dir, "folders.json", "[]");

        let request = ConversionRequest::load(&files, &folders).unwrap();
        assert!(request.is_empty());
    }

    #[test]
    fn test_missing_input_file() {
        let dir = TempDir::new().unwrap();
        let files = write_list(&dir, "files.json", "[]");

        let result = ConversionRequest::load(&files, dir.path().join("absent.json"));
        assert!(matches!(result, Err(BatchError::InputNotFound { .. })));
    }

    #[test]
    fn test_malformed_json() {
        let dir = TempDir::new().unwrap();
        let files = write_list(&dir, "files.json", "{not json");
        let folders = write_list(&dir, "folders.json", "[]");

        let result = ConversionRequest::load(&files, &folders);
        assert!(matches!(result, Err(BatchError::InvalidJson { .. })));
    }

    #[test]
    fn test_wrong_json_shape() {
        let dir = TempDir::new().unwrap();
        let files = write_list(&dir, "files.json", r#"{"paths": []}"#);
        let folders = write_list(&dir, "folders.json", "[]");

        let result = ConversionRequest::load(&files, &folders);
        assert!(matches!(result, Err(BatchError::InvalidJson { .. })));
    }
}
