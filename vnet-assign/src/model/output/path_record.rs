use serde::{Deserialize, Serialize};
use vnet_core::model::{GroupId, LinkId, NodeId, OdClass};

use crate::model::virtual_network::{VirtualLinkIndex, VirtualLinkKind, VirtualNetwork};

/// a route found for one OD pair, with the quantity assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathRecord {
    pub iteration: usize,
    pub group: GroupId,
    pub od_class: OdClass,
    pub origin: NodeId,
    pub destination: NodeId,
    pub time_slice: usize,
    pub quantity: f64,
    /// cost of the route when it was found
    pub cost: f64,
    /// virtual links from the origin to the destination
    pub links: Vec<VirtualLinkIndex>,
}

impl PathRecord {
    /// the real links travelled along the route, in order.
    pub fn real_links(&self, vnet: &VirtualNetwork) -> Vec<LinkId> {
        self.links
            .iter()
            .map(|l| vnet.link(*l))
            .filter(|l| l.kind == VirtualLinkKind::Moving)
            .map(|l| vnet.node(l.begin).real_link)
            .collect()
    }
}

/// the paths collected during a run.
#[derive(Debug, Clone, Default)]
pub struct PathStore {
    records: Vec<PathRecord>,
}

impl PathStore {
    pub fn new() -> PathStore {
        PathStore::default()
    }

    pub fn extend(&mut self, records: Vec<PathRecord>) {
        self.records.extend(records);
    }

    pub fn records(&self) -> &[PathRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// rescales the path quantities like the flows are combined: paths found
    /// in `iteration` keep `lambda` of their quantity, older paths `1 - lambda`.
    pub fn split_paths(&mut self, iteration: usize, lambda: f64) {
        for record in self.records.iter_mut() {
            if record.iteration == iteration {
                record.quantity *= lambda;
            } else {
                record.quantity *= 1.0 - lambda;
            }
        }
    }

    /// keeps records in a stable order regardless of the worker that produced them.
    pub fn sort(&mut self) {
        self.records.sort_by(|a, b| {
            (a.iteration, a.group, a.od_class, a.origin, a.destination, a.time_slice).cmp(&(
                b.iteration,
                b.group,
                b.od_class,
                b.origin,
                b.destination,
                b.time_slice,
            ))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(iteration: usize, quantity: f64) -> PathRecord {
        PathRecord {
            iteration,
            group: GroupId(0),
            od_class: OdClass(0),
            origin: NodeId(1),
            destination: NodeId(2),
            time_slice: 0,
            quantity,
            cost: 1.0,
            links: vec![0, 1, 2],
        }
    }

    #[test]
    fn test_split_paths() {
        let mut store = PathStore::new();
        store.extend(vec![record(1, 100.0), record(2, 100.0)]);
        store.split_paths(2, 0.25);
        assert_eq!(store.records()[0].quantity, 75.0);
        assert_eq!(store.records()[1].quantity, 25.0);
        let total: f64 = store.records().iter().map(|r| r.quantity).sum();
        assert_eq!(total, 100.0);
    }
}
