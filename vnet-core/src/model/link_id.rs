use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// identifier of a link in the real (base) network. origin and destination
/// virtual nodes are not attached to a real link and report `LinkId(0)`.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
pub struct LinkId(pub i64);

impl Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
