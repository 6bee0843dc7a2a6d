//! Document, table, row and cell entities.

use super::attributes::Attributes;

/// Behaviour shared by every attribute-carrying entity.
///
/// The composer resolves styles and dimensions through this trait, so a
/// table, a row and a cell are all handled by the same code path.
pub trait Element {
    /// The attribute store of this element.
    fn attributes(&self) -> &Attributes;

    /// Look up a single attribute.
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes().get(name)
    }

    /// Whether header-cell default styles apply to this element.
    fn is_header_cell(&self) -> bool {
        false
    }
}

/// Root of the model: all selected tables in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    tables: Vec<Table>,
}

impl Document {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Selected tables in document order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Whether no table was selected.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// A selected `<table>` node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    attributes: Attributes,
    rows: Vec<Row>,
}

impl Table {
    pub(crate) fn new(attributes: Attributes) -> Self {
        Self {
            attributes,
            rows: Vec::new(),
        }
    }

    pub(crate) fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Selected rows in document order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl Element for Table {
    fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

/// A selected `<tr>` node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    attributes: Attributes,
    cells: Vec<Cell>,
}

impl Row {
    pub(crate) fn new(attributes: Attributes) -> Self {
        Self {
            attributes,
            cells: Vec::new(),
        }
    }

    pub(crate) fn add_cell(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// Selected cells in document order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

impl Element for Row {
    fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

/// A selected `<td>` or `<th>` node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    attributes: Attributes,
    value: String,
    is_header: bool,
}

impl Cell {
    pub(crate) fn new(attributes: Attributes) -> Self {
        Self {
            attributes,
            value: String::new(),
            is_header: false,
        }
    }

    pub(crate) fn set_value(&mut self, value: String) {
        self.value = value;
    }

    pub(crate) fn set_is_header(&mut self, is_header: bool) {
        self.is_header = is_header;
    }

    /// Raw text content of the node, untrimmed.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the node was a `<th>`.
    pub fn is_header(&self) -> bool {
        self.is_header
    }
}

impl Element for Cell {
    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn is_header_cell(&self) -> bool {
        self.is_header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_keeps_insertion_order() {
        let mut row = Row::new(Attributes::new());
        for text in ["a", "b", "c"] {
            let mut cell = Cell::new(Attributes::new());
            cell.set_value(text.to_string());
            row.add_cell(cell);
        }
        let mut table = Table::new(Attributes::new());
        table.add_row(row);
        let mut doc = Document::new();
        doc.add_table(table);

        let values: Vec<_> = doc.tables()[0].rows()[0]
            .cells()
            .iter()
            .map(Cell::value)
            .collect();
        assert_eq!(values, ["a", "b", "c"]);
        assert_eq!(doc.table_count(), 1);
        assert!(!doc.is_empty());
    }

    #[test]
    fn test_header_flag_drives_element_trait() {
        let mut cell = Cell::new([("scope", "col")].into_iter().collect());
        assert!(!cell.is_header_cell());
        cell.set_is_header(true);
        assert!(cell.is_header_cell());
        assert_eq!(cell.attribute("scope"), Some("col"));

        let row = Row::new(Attributes::new());
        assert!(!row.is_header_cell());
    }
}
