//! Grid addresses and rectangular ranges.

use std::fmt;

/// Number of columns in a worksheet (A..XFD).
pub const MAX_COLUMNS: u32 = 16_384;

/// Number of rows in a worksheet.
pub const MAX_ROWS: u32 = 1_048_576;

/// A cell position on the grid, both coordinates 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridAddress {
    pub column: u32,
    pub row: u32,
}

impl GridAddress {
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Whether both coordinates fall inside worksheet limits.
    pub fn is_valid(&self) -> bool {
        (1..=MAX_COLUMNS).contains(&self.column) && (1..=MAX_ROWS).contains(&self.row)
    }

    /// Column letters for a 1-based column index (`1` → `A`, `27` → `AA`).
    ///
    /// Returns an empty string for column 0.
    pub fn column_letters(column: u32) -> String {
        let mut letters = Vec::with_capacity(3);
        let mut col = column;

        while col > 0 {
            col -= 1;
            letters.push((col % 26) as u8 + b'A');
            col /= 26;
        }

        letters.reverse();
        // Only ASCII uppercase letters were pushed
        String::from_utf8(letters).unwrap_or_default()
    }

    /// The `A1`-style reference of this address.
    pub fn to_a1(&self) -> String {
        let mut buf = itoa::Buffer::new();
        let mut s = Self::column_letters(self.column);
        s.push_str(buf.format(self.row));
        s
    }
}

impl fmt::Display for GridAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

/// A rectangular range of cells, corners inclusive.
///
/// The start corner is always the top-left one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    start: GridAddress,
    end: GridAddress,
}

impl CellRange {
    /// Build a range from two opposite corners in any order.
    pub fn new(a: GridAddress, b: GridAddress) -> Self {
        Self {
            start: GridAddress::new(a.column.min(b.column), a.row.min(b.row)),
            end: GridAddress::new(a.column.max(b.column), a.row.max(b.row)),
        }
    }

    /// A range covering a single cell.
    pub fn single(at: GridAddress) -> Self {
        Self { start: at, end: at }
    }

    pub fn start(&self) -> GridAddress {
        self.start
    }

    pub fn end(&self) -> GridAddress {
        self.end
    }

    pub fn is_single_cell(&self) -> bool {
        self.start == self.end
    }

    /// Whether `at` lies inside the range.
    pub fn contains(&self, at: GridAddress) -> bool {
        (self.start.column..=self.end.column).contains(&at.column)
            && (self.start.row..=self.end.row).contains(&at.row)
    }

    /// Whether the two ranges share at least one cell.
    pub fn overlaps(&self, other: &CellRange) -> bool {
        self.start.column <= other.end.column
            && other.start.column <= self.end.column
            && self.start.row <= other.end.row
            && other.start.row <= self.end.row
    }

    /// Every address of the range, row by row.
    pub fn addresses(&self) -> impl Iterator<Item = GridAddress> + '_ {
        (self.start.row..=self.end.row).flat_map(move |row| {
            (self.start.column..=self.end.column).map(move |column| GridAddress::new(column, row))
        })
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_cell() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}
