//! Per-call-site sampling.
//!
//! Call sites are keyed by message text. Within each interval the first
//! `initial` records for a message are admitted, thereafter every
//! `thereafter`-th. Windows reset lazily on the next admit check.

use crate::config::SamplingConfig;
use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Upper bound on tracked call sites. Once reached, stale windows are
/// swept; messages that still don't fit are admitted untracked, so
/// dynamic message text cannot grow the table without bound.
const MAX_WINDOWS: usize = 4096;

pub struct Sampler {
    config: SamplingConfig,
    windows: DashMap<String, Window>,
}

struct Window {
    started: Instant,
    seen: u64,
}

impl Sampler {
    pub fn new(config: SamplingConfig) -> Self {
        Self {
            config,
            windows: DashMap::new(),
        }
    }

    /// Whether a record with this message should be emitted.
    pub fn admit(&self, msg: &str) -> bool {
        if !self.config.enabled {
            return true;
        }
        let interval = Duration::from_secs(self.config.interval_secs);
        if self.windows.len() >= MAX_WINDOWS && !self.windows.contains_key(msg) {
            self.windows
                .retain(|_, window| window.started.elapsed() < interval);
            if self.windows.len() >= MAX_WINDOWS {
                return true;
            }
        }
        let mut window = self.windows.entry(msg.to_string()).or_insert(Window {
            started: Instant::now(),
            seen: 0,
        });
        if window.started.elapsed() >= interval {
            window.started = Instant::now();
            window.seen = 0;
        }
        window.seen += 1;
        if window.seen <= self.config.initial {
            return true;
        }
        if self.config.thereafter == 0 {
            return false;
        }
        (window.seen - self.config.initial) % self.config.thereafter == 0
    }
}
