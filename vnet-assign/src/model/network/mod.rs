mod base_network;
mod network_error;
mod network_reader;
mod real_link;
mod real_node;

pub use base_network::BaseNetwork;
pub use network_error::NetworkError;
pub use network_reader::read_base_network;
pub use real_link::RealLink;
pub use real_node::RealNode;
