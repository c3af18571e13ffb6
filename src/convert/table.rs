/// Render rows as a Markdown pipe table. The first row becomes the header.
pub(crate) fn render(rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let columns = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    if columns == 0 {
        return String::new();
    }

    let mut out = String::new();

    for (index, row) in rows.iter().enumerate() {
        out.push('|');
        for col in 0..columns {
            let cell = row.get(col).map(String::as_str).unwrap_or("");
            out.push(' ');
            out.push_str(&escape_cell(cell));
            out.push_str(" |");
        }
        out.push('\n');

        if index == 0 {
            out.push('|');
            for _ in 0..columns {
                out.push_str(" --- |");
            }
            out.push('\n');
        }
    }

    out
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', r"\|").replace(['\r', '\n'], " ")
}
