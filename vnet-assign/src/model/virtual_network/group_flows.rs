use super::VirtualLinkIndex;

/// flow accumulators of one commodity group on every virtual link, per time slice.
///
/// the accumulators of a group are moved into the work item of the worker that
/// assigns the group, so they are written by a single thread during a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupFlows {
    group_index: usize,
    n_links: usize,
    n_slices: usize,
    current: Vec<f64>,
    previous: Vec<f64>,
    auxiliary: Vec<f64>,
    vehicles: Vec<u64>,
}

impl GroupFlows {
    pub fn new(group_index: usize, n_links: usize, n_slices: usize) -> GroupFlows {
        let size = n_links * n_slices;
        GroupFlows {
            group_index,
            n_links,
            n_slices,
            current: vec![0.0; size],
            previous: vec![0.0; size],
            auxiliary: vec![0.0; size],
            vehicles: vec![0; size],
        }
    }

    pub fn group_index(&self) -> usize {
        self.group_index
    }

    pub fn n_slices(&self) -> usize {
        self.n_slices
    }

    fn cell(&self, link: VirtualLinkIndex, slice: usize) -> usize {
        slice * self.n_links + link
    }

    pub fn current(&self, link: VirtualLinkIndex, slice: usize) -> f64 {
        self.current[self.cell(link, slice)]
    }

    pub fn previous(&self, link: VirtualLinkIndex, slice: usize) -> f64 {
        self.previous[self.cell(link, slice)]
    }

    pub fn auxiliary(&self, link: VirtualLinkIndex, slice: usize) -> f64 {
        self.auxiliary[self.cell(link, slice)]
    }

    pub fn vehicles(&self, link: VirtualLinkIndex, slice: usize) -> u64 {
        self.vehicles[self.cell(link, slice)]
    }

    /// current flow summed over the time slices.
    pub fn current_total(&self, link: VirtualLinkIndex) -> f64 {
        (0..self.n_slices).map(|s| self.current(link, s)).sum()
    }

    /// previous-iteration flow summed over the time slices.
    pub fn previous_total(&self, link: VirtualLinkIndex) -> f64 {
        (0..self.n_slices).map(|s| self.previous(link, s)).sum()
    }

    /// auxiliary flow summed over the time slices.
    pub fn auxiliary_total(&self, link: VirtualLinkIndex) -> f64 {
        (0..self.n_slices).map(|s| self.auxiliary(link, s)).sum()
    }

    pub fn add_current(&mut self, link: VirtualLinkIndex, slice: usize, quantity: f64) {
        let cell = self.cell(link, slice);
        self.current[cell] += quantity;
    }

    pub fn add_auxiliary(&mut self, link: VirtualLinkIndex, slice: usize, quantity: f64) {
        let cell = self.cell(link, slice);
        self.auxiliary[cell] += quantity;
    }

    /// new current flow = (1 - lambda) x current flow + lambda x auxiliary flow.
    ///
    /// the current flow is saved as previous flow before the update and the
    /// auxiliary accumulator is cleared for the next iteration.
    pub fn combine(&mut self, lambda: f64) {
        for cell in 0..self.current.len() {
            let current = self.current[cell];
            self.previous[cell] = current;
            self.current[cell] = (1.0 - lambda) * current + lambda * self.auxiliary[cell];
            self.auxiliary[cell] = 0.0;
        }
    }

    /// sets the vehicle count of every cell to the flow divided by the
    /// average load of the carrier, rounded up. `loads[link]` is `None` when
    /// no load is known for the carrier of the link.
    pub fn flows_to_vehicles(&mut self, loads: &[Option<f64>]) {
        for slice in 0..self.n_slices {
            for (link, load) in loads.iter().enumerate().take(self.n_links) {
                let cell = self.cell(link, slice);
                let flow = self.current[cell];
                self.vehicles[cell] = match load {
                    Some(load) if *load > 0.0 && flow > 0.0 => (flow / load).ceil() as u64,
                    _ => 0,
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_with_lambda_one_copies_auxiliary() {
        let mut flows = GroupFlows::new(0, 3, 2);
        flows.add_current(0, 0, 10.0);
        flows.add_current(2, 1, 4.0);
        flows.add_auxiliary(1, 0, 7.5);
        flows.add_auxiliary(2, 1, 1.25);
        flows.combine(1.0);
        for link in 0..3 {
            for slice in 0..2 {
                assert_eq!(flows.auxiliary(link, slice), 0.0);
            }
        }
        assert_eq!(flows.current(0, 0), 0.0);
        assert!((flows.current(1, 0) - 7.5).abs() < 1e-12);
        assert!((flows.current(2, 1) - 1.25).abs() < 1e-12);
        assert_eq!(flows.previous(0, 0), 10.0);
        assert_eq!(flows.previous(2, 1), 4.0);
    }

    #[test]
    fn test_combine_convex() {
        let mut flows = GroupFlows::new(0, 1, 1);
        flows.add_current(0, 0, 100.0);
        flows.add_auxiliary(0, 0, 50.0);
        flows.combine(0.25);
        assert!((flows.current(0, 0) - 87.5).abs() < 1e-12);
        assert_eq!(flows.previous_total(0), 100.0);
    }

    #[test]
    fn test_vehicles_rounded_up() {
        let mut flows = GroupFlows::new(0, 3, 1);
        flows.add_current(0, 0, 100.0);
        flows.add_current(1, 0, 101.0);
        flows.add_current(2, 0, 5.0);
        flows.flows_to_vehicles(&[Some(25.0), Some(25.0), None]);
        assert_eq!(flows.vehicles(0, 0), 4);
        assert_eq!(flows.vehicles(1, 0), 5);
        assert_eq!(flows.vehicles(2, 0), 0);
    }
}
