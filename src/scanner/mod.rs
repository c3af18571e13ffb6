pub mod file_filter;
pub mod folder_scanner;

pub use file_filter::FileFilter;
pub use folder_scanner::{FolderScanner, ScanResult, ScannedFile};
