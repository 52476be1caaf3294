//! Sheet renderers: the upstream tree layout, the category index, and the
//! placement-matrix writer.

use std::collections::HashMap;

use tracing::debug;

use crate::errors::ReportResult;
use crate::models::{ContributionGraph, UpstreamNode};
use crate::report::grid::Grid;
use crate::tree::aggregate::CategoryResult;
use crate::tree::traverse::{traverse, Traversal, TraversalPolicy};

/// Render one bounded walk into the upstream-tree sheet layout.
///
/// Row 0 carries the title, row 1 the column headers, and every visit one
/// data row from row 2 on.  The result and percentage columns sit
/// immediately right of the deepest label column actually used, so their
/// position is stable per sheet but varies across categories.
pub fn render_tree(walk: &Traversal, category: &str, unit: &str) -> ReportResult<Grid> {
    let mut grid = Grid::new();
    let max_column = walk.visits.iter().map(|v| v.column).max().unwrap_or(0);
    let result_column = max_column + 1;
    let percentage_column = max_column + 2;

    grid.set(0, 0, format!("Upstream contributions to: {category}"))?;
    grid.emphasize(0, 0)?;

    grid.set(1, 0, "Processes")?;
    grid.emphasize(1, 0)?;
    grid.set(1, result_column, format!("Result [{unit}]"))?;
    grid.emphasize(1, result_column)?;
    grid.set(1, percentage_column, "Percentage [%]")?;
    grid.emphasize(1, percentage_column)?;

    for visit in &walk.visits {
        let row = visit.row + 2;
        if let Some(label) = &visit.label {
            grid.set(row, visit.column, label.as_str())?;
        }
        grid.set(row, result_column, visit.result)?;
        let percentage = if walk.total_result != 0.0 {
            100.0 * visit.result / walk.total_result
        } else {
            0.0
        };
        grid.set(row, percentage_column, percentage)?;
    }

    debug!(
        category,
        rows = walk.visits.len(),
        max_column,
        "rendered upstream tree sheet"
    );
    Ok(grid)
}

/// Traverse and render in one call; one sheet per report category.
pub fn upstream_sheet<G: ContributionGraph>(
    graph: &G,
    root: &UpstreamNode,
    policy: &TraversalPolicy,
    category: &str,
    unit: &str,
) -> ReportResult<Grid> {
    let walk = traverse(graph, root, policy);
    render_tree(&walk, category, unit)
}

/// A two-column index mapping numbered tree sheets to category names.
///
/// Sheet names are numbered because the destination medium limits sheet-name
/// length; the index is how readers navigate them.
pub fn index_sheet(categories: &[String]) -> ReportResult<Grid> {
    let mut grid = Grid::new();
    grid.set(0, 0, "Sheet Name")?;
    grid.emphasize(0, 0)?;
    grid.set(0, 1, "Impact Category")?;
    grid.emphasize(0, 1)?;
    for (i, category) in categories.iter().enumerate() {
        grid.set(i + 1, 0, format!("Upstream tree {}", i + 1))?;
        grid.set(i + 1, 1, category.as_str())?;
    }
    Ok(grid)
}

/// Write category results into an existing grid using fixed placement maps:
/// category name → row, contributor name → column.
///
/// Entries without a mapped row or column are skipped.  Returns the number
/// of cells written.
pub fn render_matrix(
    results: &[CategoryResult],
    rows: &HashMap<String, usize>,
    columns: &HashMap<String, usize>,
    grid: &mut Grid,
) -> ReportResult<usize> {
    let mut written = 0;
    for entry in results {
        let (Some(&row), Some(&column)) = (rows.get(&entry.category), columns.get(&entry.name))
        else {
            continue;
        };
        grid.set(row, column, entry.result)?;
        written += 1;
    }
    Ok(written)
}
