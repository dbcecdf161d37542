use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// assignment algorithm used for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentMethod {
    /// several alternative routes per OD pair, computed with A* and a cost mark-up
    #[default]
    ExactMultiFlow,
    /// equilibrium assignment combining successive all-or-nothing flows
    FrankWolfe,
}

impl Display for AssignmentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentMethod::ExactMultiFlow => write!(f, "exact multi-flow"),
            AssignmentMethod::FrankWolfe => write!(f, "frank-wolfe"),
        }
    }
}
