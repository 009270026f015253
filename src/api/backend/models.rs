use chrono::{DateTime, Utc};
use serde::de::{Deserialize, Deserializer, Error as _};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::utils::time::parse_timestamp;

/// Response from GET /api/latest/{symbol}
///
/// Only `fetched_at` is interpreted; the rest of the payload is shown as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestReading {
    pub fetched_at: DateTime<Utc>,
    pub raw: Value,
}

impl LatestReading {
    pub fn from_value(raw: Value) -> Result<Self, ApiError> {
        let fetched_at = raw
            .get("fetched_at")
            .and_then(Value::as_str)
            .ok_or_else(|| ApiError::Deserialization("missing 'fetched_at' field".to_string()))?;
        let fetched_at = parse_timestamp(fetched_at).map_err(ApiError::Deserialization)?;

        Ok(Self { fetched_at, raw })
    }

    /// The part of the reading worth showing.
    ///
    /// The backend sometimes nests the option chain under `raw_json.data` and
    /// sometimes not, so this falls back to `raw_json` and then the whole reading.
    pub fn display_payload(&self) -> &Value {
        match self.raw.get("raw_json") {
            Some(raw_json) => raw_json.get("data").unwrap_or(raw_json),
            None => &self.raw,
        }
    }
}

/// One row of GET /api/history/{symbol}
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryPoint {
    pub fetched_at: DateTime<Utc>,
    /// `None` when the backend sent nothing usable; such rows are not charted
    pub last_price: Option<f64>,
    /// Any other columns the backend sends, passed through untouched
    pub extra: Map<String, Value>,
}

impl<'de> Deserialize<'de> for HistoryPoint {
    /// Only a missing or unparseable `fetched_at` rejects a row.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut extra = Map::<String, Value>::deserialize(deserializer)?;

        let fetched_at = match extra.remove("fetched_at") {
            Some(Value::String(raw)) => parse_timestamp(&raw).map_err(D::Error::custom)?,
            Some(other) => {
                return Err(D::Error::custom(format!("invalid 'fetched_at': {}", other)));
            }
            None => return Err(D::Error::missing_field("fetched_at")),
        };
        let last_price = extra.remove("last_price").as_ref().and_then(price_from_value);

        Ok(Self { fetched_at, last_price, extra })
    }
}

/// Numbers and numeric strings; anything else (null, "-", NaN) has no price
fn price_from_value(value: &Value) -> Option<f64> {
    let price = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    price.filter(|p| p.is_finite())
}

/// Error type for backend requests
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// Any non-2xx status; the backend uses these for "nothing stored yet"
    #[error("No data (status {status})")]
    NoData { status: u16, body: String },
    /// Network, connect or timeout failure
    #[error("Request Error: {0}")]
    Request(String),
    #[error("Deserialization Error: {0}")]
    Deserialization(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
