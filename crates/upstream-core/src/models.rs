//! Shared typed models used across the traversal, rendering, and parameter
//! layers.

use serde::Serialize;

/// Context sentinel for parameters and overrides that are not scoped to any
/// specific process.
pub const GLOBAL_CONTEXT: &str = "global";

// ---------------------------------------------------------------------------
// Contribution graph
// ---------------------------------------------------------------------------

/// A named domain entity (typically a process).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EntityRef {
    pub id: String,
    pub name: String,
}

/// Identity of a contributing (provider process, product flow) pair.
///
/// `id` is the opaque comparable key used for recurrence counting along a
/// path; `process` is the entity whose name labels report rows.  Either level
/// of identity may be missing for root-adjacent nodes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Provider {
    pub id: String,
    pub process: Option<EntityRef>,
}

/// One contributor's share of a computed result.
///
/// Nodes are produced by the external calculation engine and are read-only to
/// this crate.  The same provider identity may appear at several positions in
/// the graph when the underlying model has feedback loops.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UpstreamNode {
    pub provider: Option<Provider>,
    pub result: f64,
    /// Portion of `result` attributable to the node itself, not its
    /// descendants.
    pub direct_contribution: f64,
}

impl UpstreamNode {
    /// The comparable provider key, if the node has one.
    pub fn provider_key(&self) -> Option<&str> {
        self.provider.as_ref().map(|p| p.id.as_str())
    }

    /// The human-readable process name used to label report rows.
    pub fn process_name(&self) -> Option<&str> {
        self.provider
            .as_ref()
            .and_then(|p| p.process.as_ref())
            .map(|e| e.name.as_str())
    }
}

/// Child lookup over the lazily walked contribution graph.
///
/// Implementations must be deterministic and yield children in the graph's
/// native order; this crate never reorders them.  Bounding total fan-out per
/// node is the provider's responsibility — the traversal only bounds path
/// length and per-provider recurrence.
pub trait ContributionGraph {
    fn children(&self, node: &UpstreamNode) -> Vec<UpstreamNode>;
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// A redefinable numeric parameter of the configured model.
///
/// `context` is the name of the scoping process, or `None` for a global
/// parameter.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub value: f64,
    pub context: Option<String>,
}

impl Parameter {
    /// The context label used for override matching: the scoping process
    /// name, or [`GLOBAL_CONTEXT`] when unscoped.
    pub fn context_label(&self) -> &str {
        self.context.as_deref().unwrap_or(GLOBAL_CONTEXT)
    }
}

/// A named set of parameters, owned by the externally configured model.
///
/// This crate only ever mutates the `value` fields of matched parameters.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParameterCollection {
    pub name: String,
    pub parameters: Vec<Parameter>,
}

// ---------------------------------------------------------------------------
// Tabular cells
// ---------------------------------------------------------------------------

/// A typed spreadsheet cell value, shared between input and output grids.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// Text content, or `None` for non-text cells.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Numeric content, or `None` for non-numeric cells.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

/// A rectangular, sparse input grid with a header row at row 0.
///
/// Absent cells are `None`; parsers treat "absent" and "wrong type"
/// identically as soft failures.
#[derive(Clone, Debug, Default)]
pub struct SheetGrid {
    rows: Vec<Vec<Option<CellValue>>>,
}

impl SheetGrid {
    pub fn from_rows(rows: Vec<Vec<Option<CellValue>>>) -> Self {
        Self { rows }
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.rows.get(row)?.get(column)?.as_ref()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row; rows may be ragged.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Width of one specific row, 0 when the row is absent.
    pub fn row_width(&self, row: usize) -> usize {
        self.rows.get(row).map(Vec::len).unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Spreadsheet-style column label: 0 → "A", 25 → "Z", 26 → "AA".
pub fn column_label(index: usize) -> String {
    let mut label = String::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        label.insert(0, (b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    label
}

/// A structured soft-failure record for input that could not be used.
///
/// Row and column are zero-based grid indices; `column` is `None` when the
/// failure concerns the whole row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Diagnostic {
    pub row: usize,
    pub column: Option<usize>,
    pub message: String,
}

impl Diagnostic {
    /// Spreadsheet-style cell reference, e.g. "C3", when a column is known.
    pub fn cell_label(&self) -> Option<String> {
        self.column
            .map(|col| format!("{}{}", column_label(col), self.row + 1))
    }
}
