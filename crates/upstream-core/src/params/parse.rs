//! Parsing of context-scoped parameter overrides from tabular input.
//!
//! Parsing is best-effort: a malformed or incomplete row is skipped with a
//! structured diagnostic and never aborts the batch.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::warn;

use crate::models::{column_label, CellValue, Diagnostic, SheetGrid};

pub const COLUMN_PARAMETER: &str = "Parameter";
pub const COLUMN_MODIFIED_VALUE: &str = "Modified value";
pub const COLUMN_CONTEXT: &str = "Context";

const REQUIRED_COLUMNS: &[&str] = &[COLUMN_PARAMETER, COLUMN_MODIFIED_VALUE, COLUMN_CONTEXT];

/// Override lookup key: (parameter name, context label).
pub type OverrideKey = (String, String);

/// The parsed override mapping plus everything that could not be parsed.
///
/// The mapping preserves first-insertion order; duplicate keys are
/// last-write-wins.
#[derive(Clone, Debug, Default)]
pub struct ParsedOverrides {
    pub overrides: IndexMap<OverrideKey, f64>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse the override sheet: a header row naming the required columns,
/// followed by one (name, value, context) triple per data row.
pub fn parse_overrides(sheet: &SheetGrid) -> ParsedOverrides {
    let mut parsed = ParsedOverrides::default();
    let columns = header_positions(sheet, &mut parsed.diagnostics);

    for row in 1..sheet.row_count() {
        parse_row(sheet, row, &columns, &mut parsed);
    }

    for diagnostic in &parsed.diagnostics {
        match diagnostic.cell_label() {
            Some(cell) => warn!(cell = %cell, "{}", diagnostic.message),
            None => warn!(row = diagnostic.row, "{}", diagnostic.message),
        }
    }
    parsed
}

/// Resolve header names to column positions from row 0.
///
/// An empty header cell and a required column missing from the header are
/// both reported; rows that need a missing column will fail individually.
fn header_positions(sheet: &SheetGrid, diagnostics: &mut Vec<Diagnostic>) -> HashMap<String, usize> {
    let mut positions = HashMap::new();
    for column in 0..sheet.row_width(0) {
        match sheet.cell(0, column).and_then(CellValue::as_text) {
            Some(name) => {
                positions.insert(name.to_string(), column);
            }
            None => diagnostics.push(Diagnostic {
                row: 0,
                column: Some(column),
                message: format!("header cell {}1 is empty", column_label(column)),
            }),
        }
    }
    for required in REQUIRED_COLUMNS {
        if !positions.contains_key(*required) {
            diagnostics.push(Diagnostic {
                row: 0,
                column: None,
                message: format!("required column '{required}' not found in header row"),
            });
        }
    }
    positions
}

/// Resolve one named column for a row, reporting an unresolved column.
fn resolve_column(
    row: usize,
    columns: &HashMap<String, usize>,
    name: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<usize> {
    match columns.get(name) {
        Some(&column) => Some(column),
        None => {
            diagnostics.push(Diagnostic {
                row,
                column: None,
                message: format!("row {} skipped: column '{name}' is unresolved", row + 1),
            });
            None
        }
    }
}

fn cell_failure(row: usize, column: usize, what: &str) -> Diagnostic {
    Diagnostic {
        row,
        column: Some(column),
        message: format!("cell {}{} {what}", column_label(column), row + 1),
    }
}

fn text_cell(
    cell: Option<&CellValue>,
    row: usize,
    column: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<String> {
    match cell {
        None => {
            diagnostics.push(cell_failure(row, column, "is empty"));
            None
        }
        Some(cell) => match cell.as_text() {
            Some(text) => Some(text.to_string()),
            None => {
                diagnostics.push(cell_failure(row, column, "is not text"));
                None
            }
        },
    }
}

fn numeric_cell(
    cell: Option<&CellValue>,
    row: usize,
    column: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<f64> {
    match cell {
        None => {
            diagnostics.push(cell_failure(row, column, "is empty"));
            None
        }
        Some(cell) => match cell.as_number() {
            Some(number) => Some(number),
            None => {
                diagnostics.push(cell_failure(row, column, "is not numeric"));
                None
            }
        },
    }
}

fn parse_row(
    sheet: &SheetGrid,
    row: usize,
    columns: &HashMap<String, usize>,
    parsed: &mut ParsedOverrides,
) {
    let diags = &mut parsed.diagnostics;
    let Some(name_col) = resolve_column(row, columns, COLUMN_PARAMETER, diags) else {
        return;
    };
    let Some(value_col) = resolve_column(row, columns, COLUMN_MODIFIED_VALUE, diags) else {
        return;
    };
    let Some(context_col) = resolve_column(row, columns, COLUMN_CONTEXT, diags) else {
        return;
    };

    let Some(name) = text_cell(sheet.cell(row, name_col), row, name_col, diags) else {
        return;
    };
    let Some(value) = numeric_cell(sheet.cell(row, value_col), row, value_col, diags) else {
        return;
    };
    let Some(context) = text_cell(sheet.cell(row, context_col), row, context_col, diags) else {
        return;
    };

    // IndexMap::insert keeps the original position on overwrite, so
    // duplicate keys are last-write-wins in value and first-seen in order.
    parsed.overrides.insert((name, context), value);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Option<CellValue> {
        Some(CellValue::from(s))
    }

    fn number(n: f64) -> Option<CellValue> {
        Some(CellValue::from(n))
    }

    fn header() -> Vec<Option<CellValue>> {
        vec![text("Parameter"), text("Modified value"), text("Context")]
    }

    #[test]
    fn test_parse_happy_path() {
        let sheet = SheetGrid::from_rows(vec![
            header(),
            vec![text("Density"), number(5.0), text("global")],
            vec![text("Density"), number(9.0), text("ProcessA")],
        ]);
        let parsed = parse_overrides(&sheet);
        assert!(parsed.diagnostics.is_empty());
        assert_eq!(parsed.overrides.len(), 2);
        assert_eq!(
            parsed
                .overrides
                .get(&("Density".to_string(), "global".to_string())),
            Some(&5.0)
        );
        assert_eq!(
            parsed
                .overrides
                .get(&("Density".to_string(), "ProcessA".to_string())),
            Some(&9.0)
        );
    }

    #[test]
    fn test_parse_shuffled_header() {
        let sheet = SheetGrid::from_rows(vec![
            vec![
                text("Context"),
                text("Comment"),
                text("Parameter"),
                text("Modified value"),
            ],
            vec![text("global"), text("ignored"), text("Lifetime"), number(25.0)],
        ]);
        let parsed = parse_overrides(&sheet);
        assert!(parsed.diagnostics.is_empty());
        assert_eq!(
            parsed
                .overrides
                .get(&("Lifetime".to_string(), "global".to_string())),
            Some(&25.0)
        );
    }

    #[test]
    fn test_last_write_wins() {
        let sheet = SheetGrid::from_rows(vec![
            header(),
            vec![text("Density"), number(1.0), text("global")],
            vec![text("Density"), number(2.0), text("global")],
        ]);
        let parsed = parse_overrides(&sheet);
        assert_eq!(parsed.overrides.len(), 1);
        assert_eq!(
            parsed
                .overrides
                .get(&("Density".to_string(), "global".to_string())),
            Some(&2.0)
        );
    }

    #[test]
    fn test_empty_cell_skips_row_with_diagnostic() {
        let sheet = SheetGrid::from_rows(vec![
            header(),
            vec![text("Density"), None, text("global")],
            vec![text("Lifetime"), number(25.0), text("global")],
        ]);
        let parsed = parse_overrides(&sheet);
        assert_eq!(parsed.overrides.len(), 1);
        assert_eq!(parsed.diagnostics.len(), 1);
        assert_eq!(parsed.diagnostics[0].row, 1);
        assert_eq!(parsed.diagnostics[0].cell_label().as_deref(), Some("B2"));
        assert!(parsed.diagnostics[0].message.contains("is empty"));
    }

    #[test]
    fn test_wrong_type_skips_row_with_diagnostic() {
        let sheet = SheetGrid::from_rows(vec![
            header(),
            // Value cell is text, name cell is a number.
            vec![text("Density"), text("fast"), text("global")],
            vec![number(7.0), number(1.0), text("global")],
        ]);
        let parsed = parse_overrides(&sheet);
        assert!(parsed.overrides.is_empty());
        assert_eq!(parsed.diagnostics.len(), 2);
        assert!(parsed.diagnostics[0].message.contains("is not numeric"));
        assert!(parsed.diagnostics[1].message.contains("is not text"));
    }

    #[test]
    fn test_missing_required_column_reported_once_then_per_row() {
        let sheet = SheetGrid::from_rows(vec![
            vec![text("Parameter"), text("Context")],
            vec![text("Density"), text("global")],
        ]);
        let parsed = parse_overrides(&sheet);
        assert!(parsed.overrides.is_empty());
        // One header diagnostic plus one per data row.
        assert_eq!(parsed.diagnostics.len(), 2);
        assert!(parsed.diagnostics[0]
            .message
            .contains("required column 'Modified value' not found"));
        assert!(parsed.diagnostics[1].message.contains("is unresolved"));
    }

    #[test]
    fn test_empty_header_cell_reported() {
        let sheet = SheetGrid::from_rows(vec![
            vec![
                text("Parameter"),
                None,
                text("Modified value"),
                text("Context"),
            ],
            vec![text("Density"), None, number(5.0), text("global")],
        ]);
        let parsed = parse_overrides(&sheet);
        assert_eq!(parsed.overrides.len(), 1);
        assert_eq!(parsed.diagnostics.len(), 1);
        assert_eq!(parsed.diagnostics[0].row, 0);
        assert!(parsed.diagnostics[0].message.contains("header cell B1 is empty"));
    }

    #[test]
    fn test_sheet_with_only_header() {
        let sheet = SheetGrid::from_rows(vec![header()]);
        let parsed = parse_overrides(&sheet);
        assert!(parsed.overrides.is_empty());
        assert!(parsed.diagnostics.is_empty());
    }
}
