use vnet_core::model::{Exclusion, ExclusionSet};

use super::ExclusionError;

/// source of the exclusion rules of a run.
pub trait ExclusionReader: Send {
    /// false when the run has no exclusion rules, in which case they are not loaded.
    fn has_exclusions(&self) -> bool;

    fn load_exclusions(&self) -> Result<ExclusionSet, ExclusionError>;
}

/// exclusion rules held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryExclusions {
    pub rules: Vec<Exclusion>,
}

impl MemoryExclusions {
    pub fn new(rules: Vec<Exclusion>) -> MemoryExclusions {
        MemoryExclusions { rules }
    }
}

impl ExclusionReader for MemoryExclusions {
    fn has_exclusions(&self) -> bool {
        !self.rules.is_empty()
    }

    fn load_exclusions(&self) -> Result<ExclusionSet, ExclusionError> {
        Ok(ExclusionSet::new(self.rules.clone()))
    }
}
