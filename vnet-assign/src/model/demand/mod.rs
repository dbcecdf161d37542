mod csv_demand_reader;
mod demand_cell;
mod demand_error;
mod demand_reader;
mod memory_demand;

pub use csv_demand_reader::CsvDemandReader;
pub use demand_cell::DemandCell;
pub use demand_error::DemandError;
pub use demand_reader::DemandReader;
pub use memory_demand::MemoryDemand;
