// Progress log adapter - Reports progress ticks through tracing

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

use crate::ports::*;

/// Progress adapter that counts ticks per video and logs them
#[derive(Default)]
pub struct TracingProgressAdapter {
    ticks: Mutex<HashMap<String, u64>>,
}

impl TracingProgressAdapter {
    /// Create new progress adapter
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks received for a video so far
    pub fn ticks_for(&self, video_key: &str) -> u64 {
        self.ticks
            .lock()
            .map(|ticks| ticks.get(video_key).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

impl ProgressPort for TracingProgressAdapter {
    fn tick(&self, video_key: &str) {
        if let Ok(mut ticks) = self.ticks.lock() {
            let count = ticks.entry(video_key.to_string()).or_insert(0);
            *count += 1;
            debug!(key = %video_key, ticks = *count, "Retrieving cutlist");
        }
    }
}
