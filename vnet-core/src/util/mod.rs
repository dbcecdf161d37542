pub mod work_queue;

pub use work_queue::{WorkItem, WorkQueue};
