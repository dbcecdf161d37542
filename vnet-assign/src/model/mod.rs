pub mod cost;
pub mod demand;
pub mod exclusion;
pub mod network;
pub mod output;
pub mod progress;
pub mod virtual_network;
