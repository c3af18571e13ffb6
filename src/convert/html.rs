use super::{text, ConvertResult};
use std::path::Path;

/// Convert an HTML document to Markdown.
pub fn to_markdown(path: &Path) -> ConvertResult<String> {
    let html = text::read_text(path)?;
    Ok(html2md::parse_html(&html))
}
