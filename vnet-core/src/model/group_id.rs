use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// a commodity group. groups are the unit of work partitioning: every
/// flow accumulator of a group is written by exactly one worker per batch.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
pub struct GroupId(pub u16);

impl Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
