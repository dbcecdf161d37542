use thiserror::Error;
use vnet_core::model::GroupId;

use crate::config::ConfigurationError;

#[derive(Error, Debug)]
pub enum CostError {
    #[error("failure reading cost functions: {source}")]
    Configuration {
        #[from]
        source: ConfigurationError,
    },
    #[error("invalid cost rule: {0}")]
    InvalidRule(String),
    #[error("cost of {1} evaluates to {2} for group {0}")]
    InvalidCost(GroupId, String, f64),
    #[error("failure building cost computation thread pool: {0}")]
    ThreadPool(String),
}
