use std::sync::Mutex;

use kdam::{Bar, BarExt};

use super::ProgressSink;

/// progress bar on stderr. never requests an abort.
#[derive(Default)]
pub struct KdamProgress {
    desc: String,
    bar: Mutex<Option<Bar>>,
}

impl KdamProgress {
    pub fn new(desc: &str) -> KdamProgress {
        KdamProgress {
            desc: desc.to_string(),
            bar: Mutex::new(None),
        }
    }
}

impl ProgressSink for KdamProgress {
    fn start_progress(&self, total: usize) {
        let bar = Bar::builder().desc(self.desc.clone()).total(total).build();
        match (bar, self.bar.lock()) {
            (Ok(bar), Ok(mut current)) => *current = Some(bar),
            (Err(e), _) => log::warn!("error building progress bar: {e}"),
            (_, Err(e)) => log::warn!("progress bar lock poisoned: {e}"),
        }
    }

    fn update_progress(&self, message: &str) -> bool {
        if let Ok(mut current) = self.bar.lock() {
            if let Some(bar) = current.as_mut() {
                bar.set_postfix(message);
                let _ = bar.update(1);
            }
        }
        true
    }

    fn stop_progress(&self) {
        if let Ok(mut current) = self.bar.lock() {
            if current.take().is_some() {
                eprintln!();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_running(progress: &KdamProgress) -> bool {
        progress.bar.lock().unwrap().is_some()
    }

    #[test]
    fn test_bar_lifecycle() {
        let progress = KdamProgress::new("test");
        assert!(progress.update_progress("before start"));
        progress.start_progress(2);
        assert!(is_running(&progress));
        assert!(progress.update_progress("group 0"));
        assert!(progress.update_progress("group 1"));
        progress.stop_progress();
        assert!(!is_running(&progress));
        progress.stop_progress();
    }
}
