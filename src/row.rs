//! Read-only view over one decoded record.

use csv::StringRecord;

/// One record of a CSV document, addressable by position or by column name.
///
/// The column names are borrowed from the decoder and shared by every row of a decode pass.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    cells: &'a StringRecord,
    number: usize,
}

impl<'a> Row<'a> {
    /// Create a row view. `number` is the 1-based row number in the document (header is row 1).
    pub fn new(columns: &'a [String], cells: &'a StringRecord, number: usize) -> Self {
        Self {
            columns,
            cells,
            number,
        }
    }

    /// Cell text at column position `index`.
    pub fn at(&self, index: usize) -> Option<&'a str> {
        self.cells.get(index)
    }

    /// Cell text of the first column named `name`.
    pub fn named(&self, name: &str) -> Option<&'a str> {
        self.columns
            .iter()
            .position(|c| c == name)
            .and_then(|idx| self.at(idx))
    }

    /// Column names of the document, in header order.
    pub fn columns(&self) -> &'a [String] {
        self.columns
    }

    /// 1-based row number within the document.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Number of cells in this row.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate `(column name, cell)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        let columns = self.columns;
        let cells = self.cells;
        columns.iter().map(String::as_str).zip(cells.iter())
    }
}
