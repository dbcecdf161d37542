/// transportation mode code (road, rail, inland waterways...).
pub type Mode = i32;

/// transportation means code, a vehicle type within a mode.
pub type Means = i32;

/// service (line) code. `0` when a link is not part of a scheduled service.
pub type ServiceId = i32;

/// wildcard value accepted by exclusion rules for groups, modes and means.
pub const ANY: i32 = -1;

/// mode and means of the loading/unloading side of a transition.
pub const HANDLING: i32 = 0;
