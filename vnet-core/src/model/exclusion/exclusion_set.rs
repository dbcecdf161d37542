use std::collections::HashMap;

use itertools::Itertools;

use crate::model::{Exclusion, GroupId, Means, Mode, NodeId};

/// the exclusion rules of a run, indexed by the real node they apply to.
/// rules with the node wildcard are kept apart and checked at every node.
/// read-only once loaded.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    by_node: HashMap<NodeId, Vec<Exclusion>>,
    any_node: Vec<Exclusion>,
}

impl ExclusionSet {
    pub fn new(exclusions: Vec<Exclusion>) -> ExclusionSet {
        let (any_node, per_node): (Vec<_>, Vec<_>) = exclusions
            .into_iter()
            .partition(|e| e.applies_to_all_nodes());
        let by_node = per_node.into_iter().into_group_map_by(|e| e.node);
        ExclusionSet { by_node, any_node }
    }

    pub fn is_empty(&self) -> bool {
        self.by_node.is_empty() && self.any_node.is_empty()
    }

    /// number of rules in this set.
    pub fn len(&self) -> usize {
        self.by_node.values().map(|v| v.len()).sum::<usize>() + self.any_node.len()
    }

    /// true if any rule at `node` forbids the transition for `group`.
    pub fn is_excluded(
        &self,
        group: GroupId,
        node: NodeId,
        mode1: Mode,
        means1: Means,
        mode2: Mode,
        means2: Means,
    ) -> bool {
        self.by_node
            .get(&node)
            .into_iter()
            .flatten()
            .chain(self.any_node.iter())
            .any(|r| r.is_excluded(group, node, mode1, means1, mode2, means2))
    }
}

impl FromIterator<Exclusion> for ExclusionSet {
    fn from_iter<T: IntoIterator<Item = Exclusion>>(iter: T) -> Self {
        ExclusionSet::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ANY;

    #[test]
    fn test_lookup_by_node() {
        let set: ExclusionSet = vec![
            Exclusion::new(0, NodeId(5), 1, 1, 2, 1),
            Exclusion::new(ANY, NodeId(7), ANY, ANY, 3, ANY),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
        assert!(set.is_excluded(GroupId(0), NodeId(5), 2, 1, 1, 1));
        assert!(!set.is_excluded(GroupId(0), NodeId(6), 2, 1, 1, 1));
        assert!(set.is_excluded(GroupId(9), NodeId(7), 3, 2, 1, 1));
        assert!(!set.is_excluded(GroupId(9), NodeId(7), 1, 2, 1, 1));
    }

    #[test]
    fn test_node_wildcard_rule_applies_everywhere() {
        let set = ExclusionSet::new(vec![
            Exclusion::new(0, NodeId(ANY as i64), 1, 1, 2, 1),
            Exclusion::new(1, NodeId(5), 3, 1, 4, 1),
        ]);
        assert!(!set.is_empty());
        assert_eq!(set.len(), 2);
        for node in [1, 5, 6] {
            assert!(set.is_excluded(GroupId(0), NodeId(node), 1, 1, 2, 1));
            assert!(!set.is_excluded(GroupId(1), NodeId(node), 1, 1, 2, 1));
        }
        assert!(set.is_excluded(GroupId(1), NodeId(5), 4, 1, 3, 1));
        assert!(!set.is_excluded(GroupId(1), NodeId(6), 4, 1, 3, 1));
    }

    #[test]
    fn test_empty_set_excludes_nothing() {
        let set = ExclusionSet::default();
        assert!(set.is_empty());
        assert!(!set.is_excluded(GroupId(0), NodeId(1), 1, 1, 2, 2));
    }
}
