//! Chart models

use chrono::{DateTime, Utc};

/// One plotted sample of the last traded price
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub fetched_at: DateTime<Utc>,
    pub last_price: f64,
}
