use std::collections::HashMap;

use vnet_core::model::GroupId;

use super::{AssignmentOutput, FlowRecord, OutputError, PathRecord};

/// keeps the results in memory, by scenario.
#[derive(Debug, Clone, Default)]
pub struct MemoryOutput {
    pub paths: HashMap<u32, Vec<PathRecord>>,
    pub groups: HashMap<u32, Vec<GroupId>>,
    pub flows: HashMap<u32, Vec<FlowRecord>>,
}

impl MemoryOutput {
    pub fn new() -> MemoryOutput {
        MemoryOutput::default()
    }
}

impl AssignmentOutput for MemoryOutput {
    fn accept_scenario(&self, scenario: u32, confirm_overwrite: bool) -> Result<(), OutputError> {
        if self.flows.contains_key(&scenario) && !confirm_overwrite {
            return Err(OutputError::ScenarioExists(scenario));
        }
        Ok(())
    }

    fn save_paths(&mut self, scenario: u32, paths: &[PathRecord]) -> Result<(), OutputError> {
        self.paths.insert(scenario, paths.to_vec());
        Ok(())
    }

    fn save_flows(
        &mut self,
        scenario: u32,
        groups: &[GroupId],
        records: &[FlowRecord],
    ) -> Result<(), OutputError> {
        self.groups.insert(scenario, groups.to_vec());
        self.flows.insert(scenario, records.to_vec());
        Ok(())
    }
}
