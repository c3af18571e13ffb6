use crate::error::{BatchError, Result};
use crate::scanner::FileFilter;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub supported: bool,
}

/// Files discovered under one folder, in traversal order, plus any non-fatal
/// walk errors encountered along the way.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub files: Vec<ScannedFile>,
    pub errors: Vec<String>,
}

impl ScanResult {
    pub fn supported_count(&self) -> usize {
        self.files.iter().filter(|f| f.supported).count()
    }
}

pub struct FolderScanner {
    filter: FileFilter,
}

impl FolderScanner {
    pub fn new(filter: FileFilter) -> Self {
        Self { filter }
    }

    /// Walk a folder tree and classify every regular file against the
    /// extension allow-list. Entries that cannot be read deeper in the tree
    /// are collected as messages and do not abort the walk; an error on the
    /// folder itself is returned as the folder-level failure.
    pub fn scan(&self, root: &Path) -> Result<ScanResult> {
        if !root.is_dir() {
            return Err(BatchError::InvalidPath {
                path: format!("{} is not a directory", root.display()),
            });
        }

        let mut result = ScanResult::default();

        for entry in WalkDir::new(root).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    if err.depth() == 0 {
                        return Err(err.into());
                    }
                    result.errors.push(err.to_string());
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.into_path();
            let supported = self.filter.is_supported(&path);
            result.files.push(ScannedFile { path, supported });
        }

        Ok(result)
    }
}
