mod cost_error;
mod cost_function_set;
mod cost_rule;

pub use cost_error::CostError;
pub use cost_function_set::CostFunctionSet;
pub use cost_rule::{Congestion, HandlingCost, MovingCost, TranshipmentCost, VehicleLoad};
