mod cancellation_token;
mod kdam_progress;
mod progress_sink;

pub use cancellation_token::CancellationToken;
pub use kdam_progress::KdamProgress;
pub use progress_sink::{ProgressSink, SilentProgress};
