use super::{ConvertError, ConvertResult};
use std::fs::File;
use std::path::Path;
use zip::ZipArchive;

/// Render a ZIP archive as a Markdown listing of its file entries.
pub fn zip_to_listing(path: &Path) -> ConvertResult<String> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file).map_err(|e| ConvertError::parse(path, e))?;

    let archive_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let mut out = format!("# {}\n\n", archive_name);
    let mut entries = 0usize;

    for index in 0..archive.len() {
        let entry = archive
            .by_index(index)
            .map_err(|e| ConvertError::parse(path, e))?;

        if entry.is_dir() {
            continue;
        }

        out.push_str(&format!("- `{}` ({} bytes)\n", entry.name(), entry.size()));
        entries += 1;
    }

    out.push_str(&format!("\n{} files\n", entries));
    Ok(out)
}
