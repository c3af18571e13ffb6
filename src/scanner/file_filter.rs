use crate::config::FilterConfig;
use std::path::Path;

/// Case-insensitive extension allow-list used during folder traversal.
pub struct FileFilter {
    extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            extensions: config
                .extensions
                .iter()
                .map(|e| e.to_lowercase())
                .collect(),
        }
    }

    pub fn is_supported(&self, path: &Path) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(extension) => self.extensions.contains(&extension.to_lowercase()),
            None => false,
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::new(&FilterConfig::default())
    }
}
