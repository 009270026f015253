//! Dashboard control models

use std::sync::Arc;
use tokio::sync::RwLock;

pub const LIMIT_MIN: u32 = 50;
pub const LIMIT_MAX: u32 = 1000;
pub const LIMIT_STEP: u32 = 50;

pub const REFRESH_MIN: u64 = 30;
pub const REFRESH_MAX: u64 = 300;
pub const REFRESH_STEP: u64 = 10;

/// Controls shared between the stdin reader and the poller
pub type SharedControls = Arc<RwLock<Controls>>;

/// User-adjustable inputs, read once at the start of every poll cycle
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub symbol: Option<String>,
    pub limit: u32,
    pub refresh_interval: u64,
}

impl Controls {
    pub fn new(symbol: Option<String>, limit: u32, refresh_interval: u64) -> Self {
        Self {
            symbol,
            limit: limit.clamp(LIMIT_MIN, LIMIT_MAX),
            refresh_interval: refresh_interval.clamp(REFRESH_MIN, REFRESH_MAX),
        }
    }

    pub fn shared(self) -> SharedControls {
        Arc::new(RwLock::new(self))
    }

    /// Set the history limit. Values outside 50..=1000 are rejected.
    pub fn set_limit(&mut self, limit: u32) -> Result<(), String> {
        if !(LIMIT_MIN..=LIMIT_MAX).contains(&limit) {
            return Err(format!(
                "❌ History limit must be between {} and {}",
                LIMIT_MIN, LIMIT_MAX
            ));
        }
        self.limit = limit;
        Ok(())
    }

    /// Move the limit one step up or down, staying in range
    pub fn step_limit(&mut self, up: bool) {
        self.limit = if up {
            self.limit.saturating_add(LIMIT_STEP).min(LIMIT_MAX)
        } else {
            self.limit.saturating_sub(LIMIT_STEP).max(LIMIT_MIN)
        };
    }

    /// Set the refresh interval in seconds. Values outside 30..=300 are rejected.
    pub fn set_refresh_interval(&mut self, secs: u64) -> Result<(), String> {
        if !(REFRESH_MIN..=REFRESH_MAX).contains(&secs) {
            return Err(format!(
                "❌ Refresh interval must be between {} and {} seconds",
                REFRESH_MIN, REFRESH_MAX
            ));
        }
        self.refresh_interval = secs;
        Ok(())
    }

    pub fn step_refresh_interval(&mut self, up: bool) {
        self.refresh_interval = if up {
            self.refresh_interval.saturating_add(REFRESH_STEP).min(REFRESH_MAX)
        } else {
            self.refresh_interval.saturating_sub(REFRESH_STEP).max(REFRESH_MIN)
        };
    }
}
