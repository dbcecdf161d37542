mod assignment_output;
mod csv_output;
mod flow_record;
mod memory_output;
mod output_error;
mod path_record;

pub use assignment_output::AssignmentOutput;
pub use csv_output::CsvOutput;
pub use flow_record::{FlowRecord, GroupFlowValues};
pub use memory_output::MemoryOutput;
pub use output_error::OutputError;
pub use path_record::{PathRecord, PathStore};
