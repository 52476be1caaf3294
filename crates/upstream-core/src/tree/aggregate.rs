//! Shallow aggregations over the first two levels of the contribution graph.
//!
//! These back the summary sections of a report workbook: per-stage results
//! for one category, and the named second-level component contributions.

use indexmap::IndexMap;
use serde::Serialize;

use crate::models::{ContributionGraph, UpstreamNode};

/// Template name suffixes that mark a floating variant of the same process.
const VARIANT_SUFFIXES: &[&str] = &[" (float)", " (floating)"];

/// Strip a trailing variant suffix so both variants key the same entry.
pub fn strip_variant_suffix(name: &str) -> &str {
    for suffix in VARIANT_SUFFIXES {
        if let Some(stripped) = name.strip_suffix(suffix) {
            return stripped;
        }
    }
    name
}

/// One first-level contribution of a category, ready for matrix placement.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryResult {
    pub category: String,
    pub name: String,
    pub result: f64,
    pub unit: String,
}

/// The direct children of the root (the life-cycle stages), labeled and
/// tagged with the category they belong to.
///
/// Children without an addressable process name are skipped; they cannot be
/// placed by name.
pub fn stage_results<G: ContributionGraph>(
    graph: &G,
    root: &UpstreamNode,
    category: &str,
    unit: &str,
) -> Vec<CategoryResult> {
    graph
        .children(root)
        .iter()
        .filter_map(|child| {
            child.process_name().map(|name| CategoryResult {
                category: category.to_string(),
                name: strip_variant_suffix(name).to_string(),
                result: child.result,
                unit: unit.to_string(),
            })
        })
        .collect()
}

/// Second-level contributions keyed by normalized process name.
///
/// Later grandchildren with the same normalized name overwrite earlier ones,
/// keeping the first insertion position.
pub fn component_results<G: ContributionGraph>(
    graph: &G,
    root: &UpstreamNode,
) -> IndexMap<String, f64> {
    let mut results = IndexMap::new();
    for child in graph.children(root) {
        for grandchild in graph.children(&child) {
            if let Some(name) = grandchild.process_name() {
                results.insert(strip_variant_suffix(name).to_string(), grandchild.result);
            }
        }
    }
    results
}
