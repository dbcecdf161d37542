mod csv_exclusion_reader;
mod exclusion_error;
mod exclusion_reader;

pub use csv_exclusion_reader::CsvExclusionReader;
pub use exclusion_error::ExclusionError;
pub use exclusion_reader::{ExclusionReader, MemoryExclusions};
