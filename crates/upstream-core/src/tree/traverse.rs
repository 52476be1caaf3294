//! Bounded pre-order traversal of the upstream contribution graph.

use serde::Serialize;
use tracing::warn;

use crate::models::{ContributionGraph, UpstreamNode};
use crate::tree::limits::{
    clamp_share, DEFAULT_ROW_CEILING, MAX_PROVIDER_RECURRENCE, MAX_TREE_DEPTH,
    MIN_CONTRIBUTION_SHARE,
};
use crate::tree::path::PathTrail;

/// Pruning policy for one traversal.
#[derive(Clone, Debug)]
pub struct TraversalPolicy {
    /// Deepest path (edges from root) that will be visited.
    pub max_depth: usize,
    /// How many times one provider identity may appear along a single path.
    pub max_recurrence: usize,
    /// Minimum `|result / total|` share for a node to be visited; disabled
    /// when the root result is 0.
    pub min_contribution: f64,
    /// Hard ceiling on emitted visits; reaching it stops the traversal
    /// without error.
    pub row_ceiling: usize,
}

impl Default for TraversalPolicy {
    fn default() -> Self {
        Self {
            max_depth: MAX_TREE_DEPTH,
            max_recurrence: MAX_PROVIDER_RECURRENCE,
            min_contribution: MIN_CONTRIBUTION_SHARE,
            row_ceiling: DEFAULT_ROW_CEILING,
        }
    }
}

/// One emitted node of the walk, in discovery order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Visit {
    /// Zero-based discovery order; also the data-row slot in the rendered
    /// sheet.
    pub row: usize,
    /// Depth of the node, i.e. the label column.
    pub column: usize,
    pub result: f64,
    /// The provider's process name; `None` when the identity chain is too
    /// shallow to address, in which case the row is kept but left unlabeled.
    pub label: Option<String>,
}

/// The ordered outcome of one bounded walk.
#[derive(Clone, Debug, Serialize)]
pub struct Traversal {
    pub visits: Vec<Visit>,
    /// Root result captured once at the start; fixed for all percentage and
    /// threshold computations.
    pub total_result: f64,
    /// True when the row ceiling cut the walk short.
    pub truncated: bool,
}

/// Walk the contribution graph from `root`, depth-first and pre-order,
/// applying the pruning policy at every node.
///
/// Children are visited in the graph's native order.  Policy-driven skips
/// (depth, recurrence, magnitude, zero result) are not errors; graph
/// failures are the provider's own and are not handled here.
pub fn traverse<G: ContributionGraph>(
    graph: &G,
    root: &UpstreamNode,
    policy: &TraversalPolicy,
) -> Traversal {
    let total_result = root.result;
    let mut walker = Walker {
        graph,
        policy,
        min_contribution: clamp_share(policy.min_contribution),
        total_result,
        visits: Vec::new(),
        truncated: false,
    };
    let trail = PathTrail::root(root);
    walker.step(&trail);
    Traversal {
        visits: walker.visits,
        total_result,
        truncated: walker.truncated,
    }
}

struct Walker<'g, G> {
    graph: &'g G,
    policy: &'g TraversalPolicy,
    /// Policy share clamped into [0, 1].
    min_contribution: f64,
    total_result: f64,
    visits: Vec<Visit>,
    truncated: bool,
}

impl<G: ContributionGraph> Walker<'_, G> {
    fn step(&mut self, trail: &PathTrail<'_>) {
        if self.visits.len() >= self.policy.row_ceiling {
            if !self.truncated {
                warn!(
                    ceiling = self.policy.row_ceiling,
                    "row ceiling reached, truncating traversal"
                );
                self.truncated = true;
            }
            return;
        }

        let node = trail.node();
        if node.result == 0.0 {
            return;
        }
        if self.total_result != 0.0 {
            let share = (node.result / self.total_result).abs();
            if share < self.min_contribution {
                return;
            }
        }
        if trail.len() > self.policy.max_depth {
            return;
        }
        if let Some(key) = node.provider_key() {
            if trail.occurrences(key) > self.policy.max_recurrence {
                return;
            }
        }

        self.visits.push(Visit {
            row: self.visits.len(),
            column: trail.len(),
            result: node.result,
            label: node.process_name().map(str::to_string),
        });

        for child in self.graph.children(node) {
            let next = trail.append(&child);
            self.step(&next);
        }
    }
}
