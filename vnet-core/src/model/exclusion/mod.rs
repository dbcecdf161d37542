mod exclusion_rule;
mod exclusion_set;

pub use exclusion_rule::Exclusion;
pub use exclusion_set::ExclusionSet;
