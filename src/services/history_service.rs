use tracing::{debug, error};

use crate::api::backend::{ApiError, Backend, HistoryPoint};
use crate::models::{Banner, PricePoint};

/// Fetch up to `limit` history rows for `symbol`, oldest first.
///
/// Any failure yields an empty history. A non-200 status just means nothing is
/// stored yet; transport and parse failures also come back with an error banner.
pub async fn fetch_history<B: Backend>(
    backend: &B,
    symbol: &str,
    limit: u32,
) -> (Vec<HistoryPoint>, Option<Banner>) {
    match backend.history(symbol, limit).await {
        Ok(mut points) => {
            sort_history(&mut points);
            debug!("Fetched {} history points for {} (limit {})", points.len(), symbol, limit);
            (points, None)
        }
        Err(ApiError::NoData { status, .. }) => {
            debug!("No history for {} (status {})", symbol, status);
            (Vec::new(), None)
        }
        Err(e) => {
            error!("Error fetching history for {}: {}", symbol, e);
            (Vec::new(), Some(Banner::error(format!("Error fetching history: {}", e))))
        }
    }
}

/// Order by `fetched_at`, keeping the backend's order for equal timestamps
pub fn sort_history(points: &mut [HistoryPoint]) {
    points.sort_by_key(|p| p.fetched_at);
}

/// Rows that carry a price, in chart order
pub fn price_points(history: &[HistoryPoint]) -> Vec<PricePoint> {
    history
        .iter()
        .filter_map(|p| {
            p.last_price
                .filter(|price| price.is_finite())
                .map(|last_price| PricePoint { fetched_at: p.fetched_at, last_price })
        })
        .collect()
}
