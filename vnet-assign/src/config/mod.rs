mod assignment_method;
mod assignment_parameters;
mod configuration_error;
mod time_slices;

pub use assignment_method::AssignmentMethod;
pub use assignment_parameters::{read_config_file, AssignmentParameters};
pub use configuration_error::ConfigurationError;
pub use time_slices::TimeSlices;
