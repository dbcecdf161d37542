use chrono::Local;

use crate::{
    algorithm::assignment::{build_assignment, AssignmentContext, AssignmentSummary},
    config::AssignmentParameters,
};

use super::CliError;

/// reads the parameters file, runs the configured assignment and writes its
/// results. `output_directory` overrides the directory named in the file.
pub fn run_assignment(
    configuration_file: &String,
    output_directory: Option<&String>,
) -> Result<AssignmentSummary, CliError> {
    log::info!("reading assignment parameters from {configuration_file}");
    let mut parameters = AssignmentParameters::try_from(configuration_file)?;
    if let Some(dir) = output_directory {
        parameters.output_directory = dir.clone();
    }
    let start = Local::now();
    log::info!(
        "scenario {}: {} assignment on {} threads started at {}",
        parameters.scenario,
        parameters.method,
        parameters.threads,
        start.format("%Y-%m-%d %H:%M:%S")
    );
    let context = AssignmentContext::from_parameters(parameters)?;
    let mut assignment = build_assignment(context);
    let summary = assignment.assign()?;
    let elapsed = Local::now() - start;
    log::info!(
        "scenario {} finished in {}.{:03}s",
        summary.scenario,
        elapsed.num_seconds(),
        elapsed.num_milliseconds() % 1000
    );
    Ok(summary)
}
