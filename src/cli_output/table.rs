//! Column-aligned tables that stay aligned with CJK text.

use unicode_width::UnicodeWidthStr;

/// Longest cell before it is cut with `…`.
const MAX_CELL_WIDTH: usize = 40;

#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row; missing cells render empty, extra cells are dropped.
    pub fn row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) -> &mut Self {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn render(&self) -> String {
        let cells: Vec<Vec<String>> = std::iter::once(&self.headers)
            .chain(self.rows.iter())
            .map(|row| row.iter().map(|c| truncate(c, MAX_CELL_WIDTH)).collect())
            .collect();

        let mut widths = vec![0; self.headers.len()];
        for row in &cells {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.width());
            }
        }

        let mut out = String::new();
        for (index, row) in cells.iter().enumerate() {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, &w)| format!("{}{}", cell, " ".repeat(w - cell.width())))
                .collect();
            out.push_str(line.join("  ").trim_end());
            out.push('\n');
            if index == 0 {
                let rule: Vec<String> = widths.iter().map(|&w| "─".repeat(w)).collect();
                out.push_str(&rule.join("  "));
                out.push('\n');
            }
        }
        out
    }

    pub fn print(&self) {
        print!("{}", self.render());
    }
}

fn truncate(text: &str, max: usize) -> String {
    let text = text.replace('\n', " ");
    if text.width() <= max {
        return text;
    }
    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + w + 1 > max {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_with_wide_chars() {
        let mut table = Table::new(["主机名", "IP"]);
        table.row(["web", "10.0.0.1"]);
        table.row(["数据库", "10.0.0.2"]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "主机名  IP");
        assert_eq!(lines[2], "web     10.0.0.1");
        assert_eq!(lines[3], "数据库  10.0.0.2");
    }

    #[test]
    fn test_short_rows_are_padded() {
        let mut table = Table::new(["a", "b", "c"]);
        table.row(["1"]);
        assert_eq!(table.len(), 1);
        assert!(table.render().lines().nth(2).unwrap().starts_with('1'));
    }

    #[test]
    fn test_truncate_long_cells() {
        let long = "x".repeat(100);
        let cut = truncate(&long, 10);
        assert_eq!(cut.width(), 10);
        assert!(cut.ends_with('…'));
    }
}
