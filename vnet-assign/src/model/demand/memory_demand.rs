use crate::model::virtual_network::VirtualNetwork;

use super::{DemandCell, DemandError, DemandReader};

/// demand held in memory, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryDemand {
    pub cells: Vec<DemandCell>,
}

impl MemoryDemand {
    pub fn new(cells: Vec<DemandCell>) -> MemoryDemand {
        MemoryDemand { cells }
    }
}

impl DemandReader for MemoryDemand {
    fn load_demand(&self, vnet: &mut VirtualNetwork) -> Result<(), DemandError> {
        vnet.load_demand_cells(self.cells.clone())
    }
}
