use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// partition of the demand that is assigned independently from the other classes.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
pub struct OdClass(pub u8);

impl OdClass {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl Display for OdClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
