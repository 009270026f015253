use tracing::{debug, error, info};

use crate::api::backend::{ApiError, Backend, LatestReading};
use crate::models::Banner;

/// Fetch the most recent reading for `symbol`.
///
/// Never fails the cycle: "no data yet" becomes a warning and transport or
/// parse failures become an error banner.
pub async fn fetch_latest<B: Backend>(backend: &B, symbol: &str) -> Result<LatestReading, Banner> {
    match backend.latest(symbol).await {
        Ok(reading) => {
            debug!("Latest reading for {} fetched at {}", symbol, reading.fetched_at);
            Ok(reading)
        }
        Err(ApiError::NoData { status, .. }) => {
            info!("No latest data for {} (status {})", symbol, status);
            Err(Banner::warning(format!("No data yet for {} (status {})", symbol, status)))
        }
        Err(e) => {
            error!("Error fetching latest data for {}: {}", symbol, e);
            Err(Banner::error(format!("Error fetching latest data: {}", e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::backend::testing::{reading, StubBackend};
    use crate::models::BannerLevel;

    #[tokio::test]
    async fn test_ok_reading_passes_through() {
        let backend = StubBackend::new(Ok(reading("2024-03-01T10:00:00")), Ok(vec![]));
        let latest = fetch_latest(&backend, "NIFTY").await.unwrap();
        assert_eq!(latest, reading("2024-03-01T10:00:00"));
        assert_eq!(backend.requests(), vec!["latest/NIFTY"]);
    }

    #[tokio::test]
    async fn test_non_200_is_a_warning() {
        let backend = StubBackend::new(
            Err(ApiError::NoData { status: 404, body: String::new() }),
            Ok(vec![]),
        );
        let banner = fetch_latest(&backend, "TCS").await.unwrap_err();
        assert_eq!(banner, Banner::warning("No data yet for TCS (status 404)"));
    }

    #[tokio::test]
    async fn test_network_failure_is_an_error() {
        let backend = StubBackend::new(Err(ApiError::Request("request timed out".into())), Ok(vec![]));
        let banner = fetch_latest(&backend, "TCS").await.unwrap_err();
        assert_eq!(banner.level, BannerLevel::Error);
        assert!(banner.message.starts_with("Error fetching latest data:"));
        assert!(banner.message.contains("request timed out"));
    }
}
