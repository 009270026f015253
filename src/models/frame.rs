//! Everything a single poll cycle displays

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::path::PathBuf;

use crate::api::backend::HistoryPoint;
use crate::models::Banner;

#[derive(Debug, Clone)]
pub struct DashboardFrame {
    pub started_at: DateTime<Utc>,
    pub symbol: Option<String>,
    pub limit: u32,
    pub refresh_interval: u64,
    /// `fetched_at` of the latest reading, if one was received
    pub last_update: Option<DateTime<Utc>>,
    pub payload: Option<Value>,
    /// Sorted ascending by `fetched_at`
    pub history: Vec<HistoryPoint>,
    pub chart_path: Option<PathBuf>,
    pub banners: Vec<Banner>,
}

impl DashboardFrame {
    pub fn new(started_at: DateTime<Utc>, symbol: Option<String>, limit: u32, refresh_interval: u64) -> Self {
        Self {
            started_at,
            symbol,
            limit,
            refresh_interval,
            last_update: None,
            payload: None,
            history: Vec::new(),
            chart_path: None,
            banners: Vec::new(),
        }
    }
}
