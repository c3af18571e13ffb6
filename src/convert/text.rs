use super::table;
use super::ConvertResult;
use std::path::Path;

/// Read a file as UTF-8 text, replacing invalid sequences.
pub fn read_text(path: &Path) -> ConvertResult<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Convert CSV to a Markdown pipe table; the first record is the header row.
pub fn csv_to_table(path: &Path) -> ConvertResult<String> {
    let content = read_text(path)?;

    let rows: Vec<Vec<String>> = content
        .lines()
        .filter(|line| !line.is_empty())
        .map(split_record)
        .collect();

    Ok(table::render(&rows))
}

// Minimal CSV record split: double-quoted fields may contain commas and
// doubled quotes, no multi-line fields.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(ch),
        }
    }

    fields.push(field);
    fields
}
