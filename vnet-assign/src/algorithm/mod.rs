pub mod assignment;
pub mod search;
pub mod worker;
