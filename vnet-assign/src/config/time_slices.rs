use serde::{Deserialize, Serialize};

/// splits the assignment period in slices. demand is tagged with the slice
/// it departs in and flows are accumulated per slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlices {
    pub count: usize,
    /// duration of one slice, in minutes
    #[serde(default)]
    pub duration: u32,
    /// start of the first slice, in minutes
    #[serde(default)]
    pub start_time: u32,
}

impl Default for TimeSlices {
    fn default() -> Self {
        Self {
            count: 1,
            duration: 0,
            start_time: 0,
        }
    }
}

impl TimeSlices {
    /// start time of a slice, as written in the flow records.
    pub fn slice_start(&self, slice: usize) -> u32 {
        self.start_time + slice as u32 * self.duration
    }
}
