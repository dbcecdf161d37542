use thiserror::Error;

use crate::{algorithm::assignment::AssignmentError, config::ConfigurationError};

#[derive(Error, Debug)]
pub enum CliError {
    #[error("failure reading assignment parameters: {source}")]
    ConfigurationError {
        #[from]
        source: ConfigurationError,
    },
    #[error("assignment failed: {source}")]
    AssignmentError {
        #[from]
        source: AssignmentError,
    },
    #[error("failure encoding run summary: {source}")]
    SerdeJsonError {
        #[from]
        source: serde_json::Error,
    },
}
