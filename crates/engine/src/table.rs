use serde::{Deserialize, Serialize};

/// One data row: cell text positionally aligned to the owning table's columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn get(&self, col: usize) -> Option<&str> {
        self.cells.get(col).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when every cell is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }

    fn resize(&mut self, width: usize) {
        self.cells.resize(width, String::new());
    }
}

impl From<Vec<String>> for Row {
    fn from(cells: Vec<String>) -> Self {
        Self::new(cells)
    }
}

/// Rectangular table with named columns.
///
/// Every row holds exactly `column_count()` cells. Width only grows, through
/// [`Table::ensure_width`], which pads existing rows with empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a header and data rows given as string slices.
    pub fn from_rows<S: AsRef<str>>(header: &[S], rows: &[Vec<S>]) -> Self {
        let mut table = Self::new();
        for (col, name) in header.iter().enumerate() {
            table.set_column_name(col, name.as_ref());
        }
        for row in rows {
            table.push_row(row.iter().map(|c| c.as_ref().to_string()).collect::<Vec<_>>());
        }
        table
    }

    /// Default name for a column that has no header text (1-based).
    pub fn default_column_name(col: usize) -> String {
        format!("Column{}", col + 1)
    }

    /// Grow the table to at least `width` columns.
    pub fn ensure_width(&mut self, width: usize) {
        if width <= self.columns.len() {
            return;
        }
        for col in self.columns.len()..width {
            self.columns.push(Self::default_column_name(col));
        }
        for row in &mut self.rows {
            row.resize(width);
        }
    }

    /// Name column `col`, growing the table if needed.
    pub fn set_column_name(&mut self, col: usize, name: &str) {
        self.ensure_width(col + 1);
        self.columns[col] = name.to_string();
    }

    /// Append a row. Short rows are padded; long rows widen the table.
    pub fn push_row(&mut self, row: impl Into<Row>) {
        let mut row = row.into();
        self.ensure_width(row.len());
        row.resize(self.columns.len());
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Empty table with this table's columns plus one extra trailing column.
    pub fn with_tag_column(&self, name: &str) -> Self {
        let mut columns = self.columns.clone();
        columns.push(name.to_string());
        Self { columns, rows: Vec::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_width_pads_rows() {
        let mut t = Table::from_rows(&["ID"], &[vec!["1"], vec!["2"]]);
        t.ensure_width(3);
        assert_eq!(t.columns(), &["ID", "Column2", "Column3"]);
        for row in t.rows() {
            assert_eq!(row.len(), 3);
            assert_eq!(row.get(2), Some(""));
        }
    }

    #[test]
    fn test_ensure_width_never_shrinks() {
        let mut t = Table::from_rows(&["A", "B"], &[]);
        t.ensure_width(1);
        assert_eq!(t.column_count(), 2);
    }

    #[test]
    fn test_push_row_keeps_rectangle() {
        let mut t = Table::from_rows(&["A", "B"], &[]);
        t.push_row(vec!["x".to_string()]);
        t.push_row(vec!["1".to_string(), "2".to_string(), "3".to_string()]);
        assert_eq!(t.column_count(), 3);
        assert!(t.rows().iter().all(|r| r.len() == 3));
        assert_eq!(t.rows()[0].cells(), &["x", "", ""]);
    }

    #[test]
    fn test_set_column_name_sparse() {
        let mut t = Table::new();
        t.set_column_name(2, "Amount");
        assert_eq!(t.columns(), &["Column1", "Column2", "Amount"]);
    }

    #[test]
    fn test_blank_row() {
        assert!(Row::new(vec!["".into(), "  \t".into()]).is_blank());
        assert!(!Row::new(vec!["".into(), "x".into()]).is_blank());
    }

    #[test]
    fn test_with_tag_column() {
        let t = Table::from_rows(&["ID", "Name"], &[vec!["1", "Alice"]]);
        let tagged = t.with_tag_column("missingIn");
        assert_eq!(tagged.columns(), &["ID", "Name", "missingIn"]);
        assert!(tagged.is_empty());
    }
}
