use std::path::Path;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::{AssignmentMethod, ConfigurationError, TimeSlices};

/// immutable configuration of one assignment run, shared read-only by every worker.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct AssignmentParameters {
    /// scenario number, used to name the output tables
    pub scenario: u32,
    #[serde(default)]
    pub method: AssignmentMethod,
    /// number of worker threads per batch
    #[serde(default = "default_threads")]
    pub threads: usize,
    /// Frank-Wolfe iteration cap, or number of alternative routes per OD pair
    /// for the exact multi-flow assignment
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Frank-Wolfe convergence threshold on the relative flow gap
    #[serde(default = "default_precision")]
    pub precision: f64,
    /// relative cost increase of the links used by an alternative route
    #[serde(default = "default_cost_markup")]
    pub cost_markup: f64,
    /// an existing scenario output is overwritten only if this is set
    #[serde(default)]
    pub confirm_overwrite: bool,
    #[serde(default)]
    pub log_lost_paths: bool,
    /// fail the run when an OD pair cannot be routed
    #[serde(default)]
    pub abort_on_lost_path: bool,
    #[serde(default)]
    pub save_paths: bool,
    /// also write the virtual links that carry no flow
    #[serde(default)]
    pub save_complete_network: bool,
    #[serde(default)]
    pub time_slices: TimeSlices,
    pub nodes_file: String,
    pub links_file: String,
    pub demand_file: String,
    #[serde(default)]
    pub exclusions_file: Option<String>,
    pub cost_functions_file: String,
    pub output_directory: String,
}

fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn default_iterations() -> usize {
    1
}

fn default_precision() -> f64 {
    0.01
}

fn default_cost_markup() -> f64 {
    0.1
}

impl AssignmentParameters {
    /// parameters with default values for everything but the scenario number.
    /// file locations are left empty.
    pub fn new(scenario: u32, method: AssignmentMethod) -> AssignmentParameters {
        AssignmentParameters {
            scenario,
            method,
            threads: default_threads(),
            iterations: default_iterations(),
            precision: default_precision(),
            cost_markup: default_cost_markup(),
            confirm_overwrite: false,
            log_lost_paths: false,
            abort_on_lost_path: false,
            save_paths: false,
            save_complete_network: false,
            time_slices: TimeSlices::default(),
            nodes_file: String::new(),
            links_file: String::new(),
            demand_file: String::new(),
            exclusions_file: None,
            cost_functions_file: String::new(),
            output_directory: String::new(),
        }
    }

    /// checks the numeric parameters of the run.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.threads == 0 {
            return Err(invalid("threads", "must be at least 1"));
        }
        if self.iterations == 0 {
            return Err(invalid("iterations", "must be at least 1"));
        }
        if !self.precision.is_finite() || self.precision <= 0.0 {
            return Err(invalid(
                "precision",
                &format!("must be a positive number, found {}", self.precision),
            ));
        }
        if !self.cost_markup.is_finite() || self.cost_markup < 0.0 {
            return Err(invalid(
                "cost_markup",
                &format!("must be a non-negative number, found {}", self.cost_markup),
            ));
        }
        if self.time_slices.count == 0 {
            return Err(invalid("time_slices.count", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(name: &str, msg: &str) -> ConfigurationError {
    ConfigurationError::InvalidParameter(String::from(name), String::from(msg))
}

impl TryFrom<&String> for AssignmentParameters {
    type Error = ConfigurationError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        let params: AssignmentParameters = read_config_file(f)?;
        params.validate()?;
        Ok(params)
    }
}

/// reads a TOML or JSON file into a configuration value, based on the file extension.
pub fn read_config_file<T: DeserializeOwned>(f: &str) -> Result<T, ConfigurationError> {
    let extension = Path::new(f)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    match extension {
        "toml" => {
            let s = std::fs::read_to_string(f)
                .map_err(|e| ConfigurationError::ReadError(f.to_string(), e))?;
            toml::from_str(&s)
                .map_err(|e| ConfigurationError::DecodeError(f.to_string(), e.to_string()))
        }
        "json" => {
            let s = std::fs::read_to_string(f)
                .map_err(|e| ConfigurationError::ReadError(f.to_string(), e))?;
            serde_json::from_str(&s)
                .map_err(|e| ConfigurationError::DecodeError(f.to_string(), e.to_string()))
        }
        _ => Err(ConfigurationError::UnsupportedFileType(f.to_string())),
    }
}
