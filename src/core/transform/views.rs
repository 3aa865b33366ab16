//! View aggregation
//!
//! After the tree shape is final, every node that has children receives the
//! union of its children's views, bottom-up. Leaves keep exactly the views
//! they were given.

use crate::domain::{MediaUnitId, StructuralNode};
use std::collections::BTreeSet;

/// Merges the children's views into every inner node, post-order
///
/// Returns the node's views after aggregation.
pub fn aggregate_views(node: &mut StructuralNode) -> &BTreeSet<MediaUnitId> {
    if !node.children.is_empty() {
        let mut merged = BTreeSet::new();
        for child in &mut node.children {
            merged.extend(aggregate_views(child).iter().cloned());
        }
        node.views.extend(merged);
    }
    &node.views
}
