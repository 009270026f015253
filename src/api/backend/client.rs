use reqwest::Client as HttpClient;
use reqwest::{StatusCode, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::models::{ApiError, HistoryPoint, LatestReading};
use super::Backend;
use crate::utils::describe_request_error;

/// HTTP client for the option chain backend
pub struct BackendClient {
    http_client: HttpClient,
    base_url: Url,
}

impl BackendClient {
    /// Create a client whose requests all give up after `timeout`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(format!("{} cannot be a base URL", base_url)));
        }

        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Request(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http_client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/api/{endpoint}/{symbol}` with the symbol encoded as one path segment
    fn endpoint_url(&self, endpoint: &str, symbol: &str) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", endpoint, symbol]);
        Ok(url)
    }

    /// Turn a non-success response into an error, keeping the body for the logs
    async fn handle_error_response(status: StatusCode, response: reqwest::Response) -> ApiError {
        let body = response.text().await.unwrap_or_default();
        if status.is_server_error() {
            warn!("Backend server error {}: {}", status.as_u16(), body);
        } else {
            debug!("Backend returned {}: {}", status.as_u16(), body);
        }
        ApiError::NoData { status: status.as_u16(), body }
    }

    async fn get_json(&self, url: Url) -> Result<Value, ApiError> {
        debug!("GET {}", url);
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Request(describe_request_error(&e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::Deserialization(format!("Failed to parse response: {}", e)))
    }

    /// GET /api/latest/{symbol}
    ///
    /// Returns the most recent stored snapshot. Any status other than 200 means
    /// the backend has nothing for this symbol yet.
    pub async fn get_latest(&self, symbol: &str) -> Result<LatestReading, ApiError> {
        let url = self.endpoint_url("latest", symbol)?;
        let value = self.get_json(url).await?;
        LatestReading::from_value(value)
    }

    /// GET /api/history/{symbol}?limit={limit}
    pub async fn get_history(&self, symbol: &str, limit: u32) -> Result<Vec<HistoryPoint>, ApiError> {
        let mut url = self.endpoint_url("history", symbol)?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());

        let value = self.get_json(url).await?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        let rows = serde_json::from_value::<Vec<Value>>(value)
            .map_err(|e| ApiError::Deserialization(format!("Failed to parse history: {}", e)))?;

        // A bad row costs only that row
        let points = rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value::<HistoryPoint>(row) {
                Ok(point) => Some(point),
                Err(e) => {
                    warn!("Skipping history row for {}: {}", symbol, e);
                    None
                }
            })
            .collect();
        Ok(points)
    }
}

impl Backend for BackendClient {
    async fn latest(&self, symbol: &str) -> Result<LatestReading, ApiError> {
        self.get_latest(symbol).await
    }

    async fn history(&self, symbol: &str, limit: u32) -> Result<Vec<HistoryPoint>, ApiError> {
        self.get_history(symbol, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> BackendClient {
        BackendClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_get_latest_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/latest/NIFTY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "fetched_at": "2024-03-01T10:00:00",
                "raw_json": { "data": { "last_price": 22000.0 } }
            })))
            .mount(&server)
            .await;

        let reading = client_for(&server).get_latest("NIFTY").await.unwrap();
        assert_eq!(reading.fetched_at.to_rfc3339(), "2024-03-01T10:00:00+00:00");
        assert_eq!(reading.display_payload(), &json!({ "last_price": 22000.0 }));
    }

    #[tokio::test]
    async fn test_get_latest_not_found_is_no_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/latest/TCS"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let err = client_for(&server).get_latest("TCS").await.unwrap_err();
        assert_eq!(err, ApiError::NoData { status: 404, body: "not found".to_string() });
    }

    #[tokio::test]
    async fn test_non_200_success_status_is_no_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/latest/TCS"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let err = client_for(&server).get_latest("TCS").await.unwrap_err();
        assert!(matches!(err, ApiError::NoData { status: 204, .. }));
    }

    #[tokio::test]
    async fn test_get_history_sends_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/history/BANKNIFTY"))
            .and(query_param("limit", "250"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "fetched_at": "2024-03-01T10:05:00", "last_price": 47010.0 },
                { "fetched_at": "2024-03-01T10:00:00", "last_price": 47000.0, "pcr": 1.1 }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let points = client_for(&server).get_history("BANKNIFTY", 250).await.unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].extra.get("pcr"), Some(&json!(1.1)));
    }

    #[tokio::test]
    async fn test_symbol_is_percent_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/latest/NIFTY%2050"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "fetched_at": "2024-03-01T10:00:00Z"
            })))
            .mount(&server)
            .await;

        assert!(client_for(&server).get_latest("NIFTY 50").await.is_ok());
    }

    #[tokio::test]
    async fn test_malformed_history_is_deserialization_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/history/NIFTY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "detail": "oops" })))
            .mount(&server)
            .await;

        let err = client_for(&server).get_history("NIFTY", 200).await.unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[tokio::test]
    async fn test_bad_history_rows_are_skipped_individually() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/history/NIFTY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "fetched_at": "2024-03-01T10:00:00", "last_price": 22000 },
                { "fetched_at": "2024-03-01T10:01:00", "last_price": "22001.5" },
                { "fetched_at": "2024-03-01T10:02:00", "last_price": null },
                { "fetched_at": null, "last_price": 22003.0 },
                { "fetched_at": "not a time", "last_price": 22004.0 }
            ])))
            .mount(&server)
            .await;

        let points = client_for(&server).get_history("NIFTY", 200).await.unwrap();
        let prices: Vec<Option<f64>> = points.iter().map(|p| p.last_price).collect();
        assert_eq!(prices, vec![Some(22000.0), Some(22001.5), None]);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_request_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = BackendClient::new(&format!("http://127.0.0.1:{}", port), Duration::from_secs(2)).unwrap();
        let err = client.get_latest("NIFTY").await.unwrap_err();
        assert!(matches!(err, ApiError::Request(_)));
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(BackendClient::new("not a url", Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let client = BackendClient::new("http://localhost:8000/proxy/", Duration::from_secs(1)).unwrap();
        let url = client.endpoint_url("latest", "NIFTY").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/proxy/api/latest/NIFTY");
    }
}
