use super::{table, ConvertError, ConvertResult};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Convert a workbook to Markdown: one pipe table per sheet, each under a
/// `##` heading carrying the sheet name.
pub fn workbook_to_markdown(path: &Path) -> ConvertResult<String> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| ConvertError::parse(path, e))?;

    let sheet_names = workbook.sheet_names().to_owned();
    let mut out = String::new();

    for name in sheet_names {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| ConvertError::parse(path, e))?;

        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect();

        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("## {}\n\n", name));
        out.push_str(&table::render(&rows));
    }

    Ok(out)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("x".to_string())), "x");
        assert_eq!(cell_to_string(&Data::Int(7)), "7");
        assert_eq!(cell_to_string(&Data::Bool(true)), "true");
    }

    #[test]
    fn test_missing_workbook_is_parse_error() {
        let err = workbook_to_markdown(Path::new("/nonexistent/book.xlsx")).unwrap_err();
        assert!(matches!(err, ConvertError::Parse { .. }));
    }
}
