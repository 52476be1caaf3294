//! Immutable root-to-node paths used to bound cyclic traversals.

use crate::models::UpstreamNode;

/// A singly linked ancestor chain from the traversal root to the current
/// node.
///
/// Appending never mutates an existing trail; child trails borrow their
/// prefix up the recursion stack, so a trail lives exactly as long as the
/// walk of its subtree.  `length` counts edges from the root and always
/// equals the number of prefix links.
#[derive(Debug)]
pub struct PathTrail<'a> {
    node: &'a UpstreamNode,
    prefix: Option<&'a PathTrail<'a>>,
    length: usize,
}

impl<'a> PathTrail<'a> {
    /// A trail of length 0 starting at the traversal root.
    pub fn root(node: &'a UpstreamNode) -> Self {
        Self {
            node,
            prefix: None,
            length: 0,
        }
    }

    /// A new trail one edge longer, ending at `node`.
    pub fn append<'b>(&'b self, node: &'b UpstreamNode) -> PathTrail<'b>
    where
        'a: 'b,
    {
        PathTrail {
            node,
            prefix: Some(self),
            length: self.length + 1,
        }
    }

    /// The terminal node of this path.
    pub fn node(&self) -> &UpstreamNode {
        self.node
    }

    /// Edges from the root; the root itself has length 0.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_root(&self) -> bool {
        self.prefix.is_none()
    }

    /// How many nodes along this path (itself included) carry the given
    /// provider key.
    pub fn occurrences(&self, provider_key: &str) -> usize {
        let mut count = 0;
        let mut current = Some(self);
        while let Some(trail) = current {
            if trail.node.provider_key() == Some(provider_key) {
                count += 1;
            }
            current = trail.prefix;
        }
        count
    }
}
