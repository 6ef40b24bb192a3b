use std::fmt::Display;

use super::table::DerivationTable;

fn cell_text(table: &DerivationTable, span: usize, offset: usize) -> String {
    table.cell(span, offset).collect()
}

// Widest cell of each offset column, over every span it appears in
fn column_widths(table: &DerivationTable) -> Vec<usize> {
    let n = table.word_len();
    (0..n)
        .map(|offset| {
            (0..n - offset)
                .map(|span| table.cell(span, offset).count())
                .max()
                .unwrap_or(0)
        })
        .collect()
}

/// Renders one row per span length, shortest spans first. Every cell is
/// padded to its column width and followed by a single space.
pub fn format_table(table: &DerivationTable) -> String {
    let n = table.word_len();
    let widths = column_widths(table);

    let mut out = String::new();
    for span in 0..n {
        for offset in 0..n - span {
            let text = cell_text(table, span, offset);
            out.push_str(&format!("{:<width$} ", text, width = widths[offset]));
        }
        out.push('\n');
    }
    out
}

impl Display for DerivationTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_table(self))
    }
}
