//! In-memory output grid, the destination sink for rendered reports.

use serde::Serialize;

use crate::errors::{ReportError, ReportResult};
use crate::models::CellValue;

/// Row capacity of the default destination medium.
pub const DEFAULT_MAX_GRID_ROWS: usize = 1_048_576;

/// One written cell and its emphasis flag.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Cell {
    pub value: CellValue,
    pub emphasized: bool,
}

/// A growable sparse grid addressed by zero-based (row, column).
///
/// Rows past `max_rows` are rejected; renderers bound their traversals so
/// they never run into the capacity.
#[derive(Clone, Debug, Serialize)]
pub struct Grid {
    max_rows: usize,
    rows: Vec<Vec<Option<Cell>>>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    pub fn new() -> Self {
        Self::with_max_rows(DEFAULT_MAX_GRID_ROWS)
    }

    pub fn with_max_rows(max_rows: usize) -> Self {
        Self {
            max_rows,
            rows: Vec::new(),
        }
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    /// Write a cell value, growing the grid as needed.
    pub fn set(
        &mut self,
        row: usize,
        column: usize,
        value: impl Into<CellValue>,
    ) -> ReportResult<()> {
        if row >= self.max_rows {
            return Err(ReportError::Grid(format!(
                "row {row} exceeds the sheet capacity of {} rows",
                self.max_rows
            )));
        }
        if self.rows.len() <= row {
            self.rows.resize(row + 1, Vec::new());
        }
        let cells = &mut self.rows[row];
        if cells.len() <= column {
            cells.resize(column + 1, None);
        }
        cells[column] = Some(Cell {
            value: value.into(),
            emphasized: false,
        });
        Ok(())
    }

    /// Mark an existing cell emphasized.
    pub fn emphasize(&mut self, row: usize, column: usize) -> ReportResult<()> {
        match self
            .rows
            .get_mut(row)
            .and_then(|cells| cells.get_mut(column))
            .and_then(Option::as_mut)
        {
            Some(cell) => {
                cell.emphasized = true;
                Ok(())
            }
            None => Err(ReportError::Grid(format!(
                "cannot emphasize empty cell at row {row}, column {column}"
            ))),
        }
    }

    pub fn value(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.rows
            .get(row)?
            .get(column)?
            .as_ref()
            .map(|cell| &cell.value)
    }

    pub fn is_emphasized(&self, row: usize, column: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .and_then(Option::as_ref)
            .map(|cell| cell.emphasized)
            .unwrap_or(false)
    }

    /// Number of rows actually written.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest written row.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn to_json(&self) -> ReportResult<String> {
        serde_json::to_string(self).map_err(Into::into)
    }
}
