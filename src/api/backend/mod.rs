pub mod client;
pub mod models;

pub use client::BackendClient;
pub use models::{ApiError, HistoryPoint, LatestReading};

use std::future::Future;

/// The two backend endpoints the dashboard reads.
///
/// Implemented by [`BackendClient`]; tests swap in canned responses.
pub trait Backend {
    fn latest(&self, symbol: &str) -> impl Future<Output = Result<LatestReading, ApiError>> + Send;

    fn history(
        &self,
        symbol: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<HistoryPoint>, ApiError>> + Send;
}
