use serde::{Deserialize, Serialize};
use vnet_core::model::{GroupId, Means, Mode, ANY};

/// cost of travelling along a real link: `fixed + per_length * length`,
/// scaled by `1 + alpha * (volume / capacity)^beta` when congestion is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingCost {
    #[serde(default)]
    pub group: Option<GroupId>,
    pub mode: Mode,
    pub means: Means,
    #[serde(default)]
    pub fixed: f64,
    #[serde(default)]
    pub per_length: f64,
    #[serde(default)]
    pub congestion: Option<Congestion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Congestion {
    pub capacity: f64,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default = "default_beta")]
    pub beta: f64,
}

fn default_alpha() -> f64 {
    0.15
}

fn default_beta() -> f64 {
    4.0
}

impl MovingCost {
    pub fn evaluate(&self, length: f64, volume: f64) -> f64 {
        let base = self.fixed + self.per_length * length;
        match &self.congestion {
            None => base,
            Some(c) => base * (1.0 + c.alpha * (volume / c.capacity).powf(c.beta)),
        }
    }
}

/// flat cost of a loading, unloading or transit operation for a vehicle type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlingCost {
    #[serde(default)]
    pub group: Option<GroupId>,
    pub mode: Mode,
    pub means: Means,
    pub cost: f64,
}

/// flat cost of moving goods from one vehicle type to another. mode and
/// means accept the -1 wildcard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranshipmentCost {
    #[serde(default)]
    pub group: Option<GroupId>,
    pub mode1: Mode,
    pub means1: Means,
    pub mode2: Mode,
    pub means2: Means,
    pub cost: f64,
}

impl TranshipmentCost {
    pub fn matches(&self, mode1: Mode, means1: Means, mode2: Mode, means2: Means) -> bool {
        [
            (self.mode1, mode1),
            (self.means1, means1),
            (self.mode2, mode2),
            (self.means2, means2),
        ]
        .iter()
        .all(|(rule, value)| *rule == ANY || rule == value)
    }
}

/// average quantity carried by one vehicle, used to turn flows in vehicles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleLoad {
    #[serde(default)]
    pub group: Option<GroupId>,
    pub mode: Mode,
    pub means: Means,
    pub average_load: f64,
}

/// rules that may be restricted to one commodity group.
pub trait GroupScoped {
    fn group(&self) -> Option<GroupId>;
}

macro_rules! group_scoped {
    ($($t:ty),*) => {
        $(impl GroupScoped for $t {
            fn group(&self) -> Option<GroupId> {
                self.group
            }
        })*
    };
}

group_scoped!(MovingCost, HandlingCost, TranshipmentCost, VehicleLoad);

/// the first rule satisfying `pred` that names `group`, else the first one
/// that applies to every group.
pub fn select_rule<'a, R, P>(rules: &'a [R], group: GroupId, pred: P) -> Option<&'a R>
where
    R: GroupScoped,
    P: Fn(&R) -> bool,
{
    rules
        .iter()
        .find(|r| r.group() == Some(group) && pred(r))
        .or_else(|| rules.iter().find(|r| r.group().is_none() && pred(r)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moving_cost_congestion() {
        let free = MovingCost {
            group: None,
            mode: 1,
            means: 1,
            fixed: 2.0,
            per_length: 0.5,
            congestion: None,
        };
        assert_eq!(free.evaluate(10.0, 1000.0), 7.0);
        let congested = MovingCost {
            congestion: Some(Congestion {
                capacity: 100.0,
                alpha: 1.0,
                beta: 2.0,
            }),
            ..free
        };
        assert_eq!(congested.evaluate(10.0, 0.0), 7.0);
        assert_eq!(congested.evaluate(10.0, 100.0), 14.0);
    }

    #[test]
    fn test_group_rule_takes_precedence() {
        let rules = vec![
            HandlingCost {
                group: None,
                mode: 1,
                means: 1,
                cost: 1.0,
            },
            HandlingCost {
                group: Some(GroupId(4)),
                mode: 1,
                means: 1,
                cost: 9.0,
            },
        ];
        let pred = |r: &HandlingCost| r.mode == 1 && r.means == 1;
        assert_eq!(select_rule(&rules, GroupId(4), pred).map(|r| r.cost), Some(9.0));
        assert_eq!(select_rule(&rules, GroupId(0), pred).map(|r| r.cost), Some(1.0));
        assert!(select_rule(&rules, GroupId(0), |r: &HandlingCost| r.mode == 2).is_none());
    }

    #[test]
    fn test_transhipment_wildcards() {
        let rule = TranshipmentCost {
            group: None,
            mode1: 1,
            means1: ANY,
            mode2: 2,
            means2: ANY,
            cost: 3.0,
        };
        assert!(rule.matches(1, 5, 2, 7));
        assert!(!rule.matches(2, 1, 1, 1));
    }
}
