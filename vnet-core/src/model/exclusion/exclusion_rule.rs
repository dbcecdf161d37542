use serde::{Deserialize, Serialize};

use crate::model::{GroupId, Means, Mode, NodeId, ANY};

/// a forbidden movement at a real node between two mode/means combinations.
///
/// every field may hold the wildcard [`ANY`] (-1), in which case the rule
/// applies to every value of that field. a rule forbids the
/// movement in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclusion {
    #[serde(rename = "grp")]
    pub group: i32,
    #[serde(rename = "num")]
    pub node: NodeId,
    pub mode1: Mode,
    pub means1: Means,
    pub mode2: Mode,
    pub means2: Means,
}

impl Exclusion {
    pub fn new(
        group: i32,
        node: NodeId,
        mode1: Mode,
        means1: Means,
        mode2: Mode,
        means2: Means,
    ) -> Exclusion {
        Exclusion {
            group,
            node,
            mode1,
            means1,
            mode2,
            means2,
        }
    }

    /// true if moving from (mode1, means1) to (mode2, means2) at `node` is not
    /// permitted for `group`. the transition is matched against the rule in
    /// both directions, every wildcard of the rule matching any queried value.
    pub fn is_excluded(
        &self,
        group: GroupId,
        node: NodeId,
        mode1: Mode,
        means1: Means,
        mode2: Mode,
        means2: Means,
    ) -> bool {
        if !self.applies_to_all_nodes() && node != self.node {
            return false;
        }
        if self.group != ANY && self.group != i32::from(group.0) {
            return false;
        }

        let forward = self.matches_origin(mode1, means1) && self.matches_destination(mode2, means2);
        let backward =
            self.matches_origin(mode2, means2) && self.matches_destination(mode1, means1);
        forward || backward
    }

    /// true if the rule carries the node wildcard.
    pub fn applies_to_all_nodes(&self) -> bool {
        self.node == NodeId(i64::from(ANY))
    }

    fn matches_origin(&self, mode: Mode, means: Means) -> bool {
        field_matches(self.mode1, mode) && field_matches(self.means1, means)
    }

    fn matches_destination(&self, mode: Mode, means: Means) -> bool {
        field_matches(self.mode2, mode) && field_matches(self.means2, means)
    }
}

fn field_matches(rule: i32, value: i32) -> bool {
    rule == ANY || rule == value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(group: i32, mode1: Mode, means1: Means, mode2: Mode, means2: Means) -> Exclusion {
        Exclusion::new(group, NodeId(5), mode1, means1, mode2, means2)
    }

    #[test]
    fn test_exact_match_both_directions() {
        let ex = rule(0, 1, 1, 2, 1);
        assert!(ex.is_excluded(GroupId(0), NodeId(5), 1, 1, 2, 1));
        assert!(ex.is_excluded(GroupId(0), NodeId(5), 2, 1, 1, 1));
        assert!(!ex.is_excluded(GroupId(0), NodeId(5), 1, 1, 2, 2));
    }

    #[test]
    fn test_other_node_or_group_not_excluded() {
        let ex = rule(0, 1, 1, 2, 1);
        assert!(!ex.is_excluded(GroupId(0), NodeId(6), 1, 1, 2, 1));
        assert!(!ex.is_excluded(GroupId(1), NodeId(5), 1, 1, 2, 1));
    }

    #[test]
    fn test_node_wildcard_matches_any_node() {
        let ex = Exclusion::new(0, NodeId(-1), 1, 1, 2, 1);
        assert!(ex.applies_to_all_nodes());
        for node in [1, 5, 42] {
            assert!(ex.is_excluded(GroupId(0), NodeId(node), 1, 1, 2, 1));
            assert!(ex.is_excluded(GroupId(0), NodeId(node), 2, 1, 1, 1));
        }
        assert!(!ex.is_excluded(GroupId(1), NodeId(5), 1, 1, 2, 1));
        assert!(!rule(0, 1, 1, 2, 1).applies_to_all_nodes());
    }

    #[test]
    fn test_symmetry() {
        let rules = [
            rule(0, 1, 1, 2, 1),
            rule(ANY, 1, ANY, 2, ANY),
            rule(3, ANY, ANY, 4, 2),
            rule(ANY, 0, 0, ANY, ANY),
            rule(2, 3, 3, 3, 3),
        ];
        for ex in rules.iter() {
            for g in 0..4 {
                for (m1, s1, m2, s2) in [
                    (1, 1, 2, 1),
                    (1, 7, 2, 9),
                    (4, 2, 3, 3),
                    (0, 0, 5, 1),
                    (3, 3, 3, 3),
                    (2, 1, 1, 1),
                ] {
                    let group = GroupId(g);
                    assert_eq!(
                        ex.is_excluded(group, NodeId(5), m1, s1, m2, s2),
                        ex.is_excluded(group, NodeId(5), m2, s2, m1, s1),
                        "asymmetric result for {:?} with ({},{})->({},{})",
                        ex,
                        m1,
                        s1,
                        m2,
                        s2
                    );
                }
            }
        }
    }

    #[test]
    fn test_wildcards_match_any_value() {
        let ex = rule(ANY, 1, ANY, ANY, 4);
        for group in 0..5 {
            for means1 in 0..6 {
                for mode2 in 0..6 {
                    assert!(ex.is_excluded(GroupId(group), NodeId(5), 1, means1, mode2, 4));
                    assert!(ex.is_excluded(GroupId(group), NodeId(5), mode2, 4, 1, means1));
                }
            }
        }
        assert!(!ex.is_excluded(GroupId(0), NodeId(5), 2, 1, 3, 4));
        assert!(!ex.is_excluded(GroupId(0), NodeId(5), 1, 1, 3, 3));
    }

    #[test]
    fn test_deserialize_row() {
        let json = r#"{"grp": -1, "num": 5, "mode1": 1, "means1": 1, "mode2": 2, "means2": -1}"#;
        let ex: Exclusion = serde_json::from_str(json).expect("valid exclusion");
        assert_eq!(ex, Exclusion::new(ANY, NodeId(5), 1, 1, 2, ANY));
    }
}
