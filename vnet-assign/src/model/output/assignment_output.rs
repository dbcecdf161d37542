use vnet_core::model::GroupId;

use super::{FlowRecord, OutputError, PathRecord};

/// destination of the results of a run. results are written once, after
/// the assignment succeeded.
pub trait AssignmentOutput: Send {
    /// fails when results already exist for the scenario and overwriting is not confirmed.
    fn accept_scenario(&self, scenario: u32, confirm_overwrite: bool) -> Result<(), OutputError>;

    fn save_paths(&mut self, scenario: u32, paths: &[PathRecord]) -> Result<(), OutputError>;

    /// `groups` gives the group of each entry of [`FlowRecord::groups`].
    fn save_flows(
        &mut self,
        scenario: u32,
        groups: &[GroupId],
        records: &[FlowRecord],
    ) -> Result<(), OutputError>;
}
