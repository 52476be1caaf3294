//! Shared guardrails for traversal depth, recurrence, and sheet bounds.

/// Deepest path (edges from root) a traversal will visit by default.
pub const MAX_TREE_DEPTH: usize = 4;

/// How many times one provider identity may appear along a single path by
/// default.
pub const MAX_PROVIDER_RECURRENCE: usize = 1;

/// Default magnitude threshold; 0.0 disables pruning by contribution share.
pub const MIN_CONTRIBUTION_SHARE: f64 = 0.0;

/// Default ceiling on emitted rows.  Leaves room for the two header rows
/// within a 1,048,576-row sheet.
pub const DEFAULT_ROW_CEILING: usize = 1_048_574;

/// Clamp a contribution share into the meaningful [0, 1] range.
pub fn clamp_share(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
