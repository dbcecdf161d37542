mod cli_error;
mod run;

pub use cli_error::CliError;
pub use run::run_assignment;
