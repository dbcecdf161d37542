use rayon::prelude::*;
use vnet_core::model::OdClass;

use crate::model::cost::{CostError, CostFunctionSet};

use super::VirtualNetwork;

fn build_pool(threads: usize) -> Result<rayon::ThreadPool, CostError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| CostError::ThreadPool(e.to_string()))
}

impl VirtualNetwork {
    /// computes the unit cost of every link for every group, on a pool of
    /// `threads` threads. iteration 0 evaluates the costs at zero volume,
    /// later iterations at the current total volume of each link.
    pub fn compute_costs(
        &mut self,
        iteration: usize,
        od_class: OdClass,
        cost_functions: &CostFunctionSet,
        threads: usize,
    ) -> Result<(), CostError> {
        let pool = build_pool(threads)?;
        let n_links = self.nb_virtual_links();
        let volumes: Vec<f64> = if iteration == 0 {
            vec![0.0; n_links]
        } else {
            (0..n_links).map(|l| self.total_volume(l)).collect()
        };

        let costs = pool.install(|| {
            self.groups()
                .par_iter()
                .map(|group| {
                    self.links()
                        .iter()
                        .zip(volumes.iter())
                        .map(|(link, volume)| {
                            cost_functions.link_cost(
                                *group,
                                link,
                                self.node(link.begin),
                                self.node(link.end),
                                *volume,
                            )
                        })
                        .collect::<Result<Vec<f64>, CostError>>()
                })
                .collect::<Result<Vec<Vec<f64>>, CostError>>()
        })?;

        for (group, group_costs) in self.groups().iter().zip(costs.iter()) {
            let unusable = group_costs.iter().filter(|c| c.is_infinite()).count();
            if unusable > 0 && iteration == 0 {
                log::warn!("OD class {od_class}: {unusable} links have no cost rule for group {group}");
            } else if unusable > 0 {
                log::debug!(
                    "iteration {iteration}, OD class {od_class}: {unusable} links have no cost rule for group {group}"
                );
            }
        }
        self.costs = costs;
        Ok(())
    }

    /// first derivative of the Frank-Wolfe objective along the segment from the
    /// current flow to the auxiliary flow, at step size `lambda`:
    /// `sum over links and groups of (aux - cur) * cost(cur + lambda * (aux - cur))`.
    pub fn objective_function_first_derivative(
        &self,
        lambda: f64,
        cost_functions: &CostFunctionSet,
        threads: usize,
    ) -> Result<f64, CostError> {
        let pool = build_pool(threads)?;
        let flows = self.flows();
        let terms = pool.install(|| {
            (0..self.nb_virtual_links())
                .into_par_iter()
                .map(|l| -> Result<f64, CostError> {
                    let link = self.link(l);
                    let volume: f64 = flows
                        .iter()
                        .map(|f| {
                            let current = f.current_total(l);
                            current + lambda * (f.auxiliary_total(l) - current)
                        })
                        .sum();
                    let mut term = 0.0;
                    for f in flows.iter() {
                        let delta = f.auxiliary_total(l) - f.current_total(l);
                        if delta == 0.0 {
                            continue;
                        }
                        let cost = cost_functions.link_cost(
                            self.groups()[f.group_index()],
                            link,
                            self.node(link.begin),
                            self.node(link.end),
                            volume,
                        )?;
                        term += delta * cost;
                    }
                    Ok(term)
                })
                .collect::<Result<Vec<f64>, CostError>>()
        })?;
        // summed in link order so the result does not depend on the pool size
        Ok(terms.iter().sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::TimeSlices,
        model::{
            cost::{Congestion, MovingCost},
            demand::DemandCell,
            network::{BaseNetwork, RealLink, RealNode},
            virtual_network::VirtualLinkKind,
        },
    };

    fn network() -> VirtualNetwork {
        let base = BaseNetwork::new(
            vec![
                RealNode::new(1, 0.0, 0.0, false),
                RealNode::new(2, 1.0, 0.0, false),
            ],
            vec![RealLink::new(10, 1, 2, 1, 1, 2.0)],
        )
        .unwrap();
        let mut vnet = VirtualNetwork::generate(&base, TimeSlices::default()).unwrap();
        vnet.load_demand_cells(vec![DemandCell::new(0, 1, 2, 10.0)])
            .unwrap();
        vnet
    }

    fn congested() -> CostFunctionSet {
        CostFunctionSet {
            moving: vec![MovingCost {
                group: None,
                mode: 1,
                means: 1,
                fixed: 0.0,
                per_length: 1.0,
                congestion: Some(Congestion {
                    capacity: 10.0,
                    alpha: 1.0,
                    beta: 1.0,
                }),
            }],
            ..Default::default()
        }
    }

    fn first_moving(vnet: &VirtualNetwork) -> usize {
        vnet.links()
            .iter()
            .position(|l| l.kind == VirtualLinkKind::Moving)
            .unwrap()
    }

    #[test]
    fn test_compute_costs_uses_volume_after_first_iteration() {
        let mut vnet = network();
        let moving = first_moving(&vnet);
        let mut flows = vnet.take_flows();
        flows[0].add_current(moving, 0, 10.0);
        vnet.restore_flows(flows);

        vnet.compute_costs(0, OdClass(0), &congested(), 2).unwrap();
        assert_eq!(vnet.link_cost(0, moving), 2.0);
        vnet.compute_costs(1, OdClass(0), &congested(), 2).unwrap();
        assert_eq!(vnet.link_cost(0, moving), 4.0);
        // no loading rule
        let loading = vnet
            .links()
            .iter()
            .position(|l| l.kind == VirtualLinkKind::Loading)
            .unwrap();
        assert!(vnet.link_cost(0, loading).is_infinite());
    }

    #[test]
    fn test_derivative_sign() {
        let mut vnet = network();
        let moving = first_moving(&vnet);
        let mut flows = vnet.take_flows();
        flows[0].add_auxiliary(moving, 0, 10.0);
        vnet.restore_flows(flows);
        // moving all the flow on the link increases the cost: positive slope
        let d = vnet
            .objective_function_first_derivative(0.5, &congested(), 1)
            .unwrap();
        // 10 * 2 * (1 + 5 / 10)
        assert!((d - 30.0).abs() < 1e-9);
        let d_parallel = vnet
            .objective_function_first_derivative(0.5, &congested(), 4)
            .unwrap();
        assert_eq!(d, d_parallel);
    }
}
