//! Table types.

use super::{BoundingBox, FragmentId, TextFragment};
use serde::{Deserialize, Serialize};

/// A table inferred from aligned lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Rows in the table, top to bottom
    pub rows: Vec<TableRow>,

    /// Maximum number of cells observed in any row
    pub column_count: usize,

    /// Union of the row boxes
    pub bounding_box: BoundingBox,
}

impl Table {
    /// Build a table from its rows.
    ///
    /// Returns `None` when there are no rows.
    pub fn from_rows(rows: Vec<TableRow>) -> Option<Self> {
        let bounding_box = BoundingBox::union_all(rows.iter().map(|r| &r.bounding_box))?;
        let column_count = rows.iter().map(|r| r.cells.len()).max().unwrap_or(0);

        Some(Self {
            rows,
            column_count,
            bounding_box,
        })
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the first row is flagged as header.
    pub fn has_header(&self) -> bool {
        self.rows.first().map(|r| r.is_header).unwrap_or(false)
    }

    /// Get the cell at the given position.
    pub fn cell(&self, row: usize, column: usize) -> Option<&TableCell> {
        self.rows.get(row)?.cells.iter().find(|c| c.column == column)
    }

    /// Iterate over every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = &TableCell> {
        self.rows.iter().flat_map(|r| r.cells.iter())
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// Cells in the row, left to right
    pub cells: Vec<TableCell>,

    /// Whether this is a header row
    pub is_header: bool,

    /// Union of the cell boxes
    pub bounding_box: BoundingBox,
}

impl TableRow {
    /// Build a row from one line of fragments.
    ///
    /// Cells are indexed by their position within the line.
    pub fn from_line(row: usize, fragments: &[&TextFragment]) -> Option<Self> {
        let bounding_box = BoundingBox::union_all(fragments.iter().map(|f| &f.bounding_box))?;
        let cells = fragments
            .iter()
            .enumerate()
            .map(|(column, fragment)| TableCell::from_fragment(row, column, fragment))
            .collect();

        Some(Self {
            cells,
            is_header: false,
            bounding_box,
        })
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    /// Row index (0-based)
    pub row: usize,

    /// Column index (0-based, position within the row)
    pub column: usize,

    /// Cell text
    pub text: String,

    /// Cell box
    pub bounding_box: BoundingBox,

    /// Backing fragments
    pub fragment_ids: Vec<FragmentId>,
}

impl TableCell {
    /// Create a cell backed by a single fragment.
    pub fn from_fragment(row: usize, column: usize, fragment: &TextFragment) -> Self {
        Self {
            row,
            column,
            text: fragment.text.trim().to_string(),
            bounding_box: fragment.bounding_box,
            fragment_ids: vec![fragment.id.clone()],
        }
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
