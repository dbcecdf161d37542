use serde::{Deserialize, Serialize};
use vnet_core::model::{GroupId, NodeId, OdClass};

/// a quantity of one commodity group to carry from an origin to a destination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandCell {
    pub group: GroupId,
    pub od_class: OdClass,
    pub origin: NodeId,
    pub destination: NodeId,
    pub quantity: f64,
    /// departure time slice
    pub time_slice: usize,
}

impl DemandCell {
    pub fn new(group: u16, origin: i64, destination: i64, quantity: f64) -> DemandCell {
        DemandCell {
            group: GroupId(group),
            od_class: OdClass(0),
            origin: NodeId(origin),
            destination: NodeId(destination),
            quantity,
            time_slice: 0,
        }
    }

    pub fn with_od_class(mut self, od_class: u8) -> DemandCell {
        self.od_class = OdClass(od_class);
        self
    }

    pub fn with_time_slice(mut self, time_slice: usize) -> DemandCell {
        self.time_slice = time_slice;
        self
    }
}
