use std::fmt::Display;

use vnet_core::model::OdClass;

/// progress of an assignment run. every failure leads to `Aborted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentState {
    Init,
    NetworkBuilt,
    DemandLoaded,
    PerClassAssignment { iteration: usize, od_class: OdClass },
    FlowsFinalized,
    Persisted,
    Aborted,
}

impl Display for AssignmentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentState::Init => write!(f, "init"),
            AssignmentState::NetworkBuilt => write!(f, "network built"),
            AssignmentState::DemandLoaded => write!(f, "demand loaded"),
            AssignmentState::PerClassAssignment {
                iteration,
                od_class,
            } => write!(f, "assigning OD class {od_class} (iteration {iteration})"),
            AssignmentState::FlowsFinalized => write!(f, "flows finalized"),
            AssignmentState::Persisted => write!(f, "persisted"),
            AssignmentState::Aborted => write!(f, "aborted"),
        }
    }
}
