pub mod exclusion;
mod group_id;
mod link_id;
mod node_id;
mod od_class;
mod transport;

pub use exclusion::{Exclusion, ExclusionSet};
pub use group_id::GroupId;
pub use link_id::LinkId;
pub use node_id::NodeId;
pub use od_class::OdClass;
pub use transport::{Means, Mode, ServiceId, ANY, HANDLING};
