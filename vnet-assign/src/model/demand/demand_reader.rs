use crate::model::virtual_network::VirtualNetwork;

use super::DemandError;

/// source of the OD matrix of a run.
pub trait DemandReader: Send {
    /// reads the demand and attaches it to the origin node lists of the virtual network.
    fn load_demand(&self, vnet: &mut VirtualNetwork) -> Result<(), DemandError>;
}
