//! Upstream-core library — bounded contribution-tree reporting and
//! parameter-override resolution.
//!
//! This crate turns the upstream contribution structure of a computed result
//! (a weighted, potentially cyclic graph of "contributor → result value"
//! relationships) into spreadsheet-style grids, and resolves context-scoped
//! parameter overrides supplied as tabular input before a downstream
//! calculation runs.  The calculation engine itself, entity storage, and
//! workbook file I/O are external collaborators consumed at trait seams.

pub mod errors;
pub mod models;
pub mod params;
pub mod report;
pub mod tree;

pub use errors::{ReportError, ReportResult};
pub use models::{ContributionGraph, UpstreamNode};
