use serde::{Deserialize, Serialize};
use vnet_core::model::{GroupId, Means, Mode};

use crate::{
    config::read_config_file,
    model::virtual_network::{VirtualLink, VirtualLinkKind, VirtualNode},
};

use super::{
    cost_rule::select_rule, CostError, HandlingCost, MovingCost, TranshipmentCost, VehicleLoad,
};

/// the cost functions of a run, read from a TOML or JSON file.
///
/// a link for which no rule applies is unusable for the group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostFunctionSet {
    #[serde(default)]
    pub moving: Vec<MovingCost>,
    #[serde(default)]
    pub loading: Vec<HandlingCost>,
    #[serde(default)]
    pub unloading: Vec<HandlingCost>,
    #[serde(default)]
    pub transit: Vec<HandlingCost>,
    #[serde(default)]
    pub transhipment: Vec<TranshipmentCost>,
    #[serde(default)]
    pub vehicles: Vec<VehicleLoad>,
}

impl TryFrom<&String> for CostFunctionSet {
    type Error = CostError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        let cost_functions: CostFunctionSet = read_config_file(f)?;
        cost_functions.validate()?;
        Ok(cost_functions)
    }
}

impl CostFunctionSet {
    /// checks rule parameters that would make every evaluation fail.
    pub fn validate(&self) -> Result<(), CostError> {
        for rule in self.moving.iter() {
            if let Some(c) = &rule.congestion {
                if !(c.capacity.is_finite() && c.capacity > 0.0) {
                    return Err(CostError::InvalidRule(format!(
                        "moving cost for mode {} means {} has capacity {}",
                        rule.mode, rule.means, c.capacity
                    )));
                }
            }
        }
        for rule in self.vehicles.iter() {
            if !(rule.average_load.is_finite() && rule.average_load > 0.0) {
                return Err(CostError::InvalidRule(format!(
                    "vehicles for mode {} means {} have average load {}",
                    rule.mode, rule.means, rule.average_load
                )));
            }
        }
        Ok(())
    }

    /// unit cost of a virtual link for a group, at the given total volume.
    /// returns infinity when no rule applies to the link.
    pub fn link_cost(
        &self,
        group: GroupId,
        link: &VirtualLink,
        begin: &VirtualNode,
        end: &VirtualNode,
        volume: f64,
    ) -> Result<f64, CostError> {
        let cost = match link.kind {
            VirtualLinkKind::Moving => {
                select_rule(&self.moving, group, |r| {
                    r.mode == begin.mode && r.means == begin.means
                })
                .map(|r| r.evaluate(link.length, volume))
            }
            VirtualLinkKind::Loading => handling(&self.loading, group, end.mode, end.means),
            VirtualLinkKind::Unloading => {
                handling(&self.unloading, group, begin.mode, begin.means)
            }
            VirtualLinkKind::Transit => handling(&self.transit, group, begin.mode, begin.means),
            VirtualLinkKind::Transhipment => select_rule(&self.transhipment, group, |r| {
                r.matches(begin.mode, begin.means, end.mode, end.means)
            })
            .map(|r| r.cost),
        };
        match cost {
            None => Ok(f64::INFINITY),
            Some(c) if c.is_nan() || c < 0.0 => Err(CostError::InvalidCost(
                group,
                format!("{:?} link {} -> {}", link.kind, begin.key(), end.key()),
                c,
            )),
            Some(c) => Ok(c),
        }
    }

    /// average load of a vehicle type for a group, if known.
    pub fn average_load(&self, group: GroupId, mode: Mode, means: Means) -> Option<f64> {
        select_rule(&self.vehicles, group, |r| r.mode == mode && r.means == means)
            .map(|r| r.average_load)
    }
}

fn handling(rules: &[HandlingCost], group: GroupId, mode: Mode, means: Means) -> Option<f64> {
    select_rule(rules, group, |r| r.mode == mode && r.means == means).map(|r| r.cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vnet_core::model::{LinkId, NodeId};

    const TOML: &str = r#"
        [[moving]]
        mode = 1
        means = 1
        per_length = 2.0

        [[moving]]
        group = 1
        mode = 1
        means = 1
        fixed = 5.0
        congestion = { capacity = 10.0, alpha = 1.0, beta = 1.0 }

        [[loading]]
        mode = 1
        means = 1
        cost = 0.5

        [[transhipment]]
        mode1 = 1
        means1 = -1
        mode2 = 2
        means2 = -1
        cost = 3.0

        [[vehicles]]
        mode = 1
        means = 1
        average_load = 20.0
    "#;

    fn nodes() -> (VirtualNode, VirtualNode, VirtualNode, VirtualNode) {
        (
            VirtualNode::origin(NodeId(1)),
            VirtualNode::endpoint(NodeId(1), LinkId(1), 1, 1, 0),
            VirtualNode::endpoint(NodeId(2), LinkId(1), 1, 1, 0),
            VirtualNode::endpoint(NodeId(2), LinkId(2), 2, 3, 0),
        )
    }

    fn link(kind: VirtualLinkKind, length: f64) -> VirtualLink {
        VirtualLink {
            kind,
            begin: 0,
            end: 1,
            length,
            carrier_mode: 1,
            carrier_means: 1,
        }
    }

    #[test]
    fn test_link_costs() {
        let costs: CostFunctionSet = toml::from_str(TOML).expect("valid toml");
        assert!(costs.validate().is_ok());
        let (origin, a, b, rail) = nodes();
        let moving = link(VirtualLinkKind::Moving, 3.0);
        assert_eq!(costs.link_cost(GroupId(0), &moving, &a, &b, 0.0).unwrap(), 6.0);
        assert_eq!(costs.link_cost(GroupId(1), &moving, &a, &b, 10.0).unwrap(), 10.0);
        let loading = link(VirtualLinkKind::Loading, 0.0);
        assert_eq!(costs.link_cost(GroupId(0), &loading, &origin, &a, 0.0).unwrap(), 0.5);
        let tranship = link(VirtualLinkKind::Transhipment, 0.0);
        assert_eq!(costs.link_cost(GroupId(0), &tranship, &b, &rail, 0.0).unwrap(), 3.0);
        assert!(costs
            .link_cost(GroupId(0), &tranship, &rail, &b, 0.0)
            .unwrap()
            .is_infinite());
        let unloading = link(VirtualLinkKind::Unloading, 0.0);
        assert!(costs
            .link_cost(GroupId(0), &unloading, &b, &origin, 0.0)
            .unwrap()
            .is_infinite());
    }

    #[test]
    fn test_negative_cost_fails() {
        let costs = CostFunctionSet {
            transit: vec![HandlingCost {
                group: None,
                mode: 1,
                means: 1,
                cost: -1.0,
            }],
            ..Default::default()
        };
        let (_, a, b, _) = nodes();
        let transit = link(VirtualLinkKind::Transit, 0.0);
        assert!(matches!(
            costs.link_cost(GroupId(0), &transit, &a, &b, 0.0),
            Err(CostError::InvalidCost(_, _, _))
        ));
    }

    #[test]
    fn test_average_load() {
        let costs: CostFunctionSet = toml::from_str(TOML).expect("valid toml");
        assert_eq!(costs.average_load(GroupId(3), 1, 1), Some(20.0));
        assert_eq!(costs.average_load(GroupId(3), 2, 1), None);
    }

    #[test]
    fn test_validate_rejects_zero_load() {
        let costs = CostFunctionSet {
            vehicles: vec![VehicleLoad {
                group: None,
                mode: 1,
                means: 1,
                average_load: 0.0,
            }],
            ..Default::default()
        };
        assert!(matches!(costs.validate(), Err(CostError::InvalidRule(_))));
    }
}
