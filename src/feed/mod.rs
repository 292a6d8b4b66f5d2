use crate::models::SensorReading;
use log::debug;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// JSON body returned by the sensor endpoint.
///
/// Humidity is not part of the wire contract everywhere, so it is optional
/// and defaults to absent.
#[derive(Debug, Deserialize, PartialEq)]
pub struct SensorPayload {
    pub temperature: f32,
    pub vibration: f32,
    pub pressure: f32,
    #[serde(default)]
    pub humidity: Option<f32>,
}

impl From<SensorPayload> for SensorReading {
    fn from(payload: SensorPayload) -> Self {
        SensorReading::new(
            payload.temperature,
            payload.vibration,
            payload.pressure,
            payload.humidity,
        )
    }
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("feed returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// HTTP client for the sensor feed endpoint.
pub struct SensorFeed {
    client: reqwest::Client,
    base_url: String,
}

impl SensorFeed {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the current reading for one machine.
    ///
    /// Performs `GET {base_url}/{machine}` and decodes the JSON body. The
    /// caller decides what to do on failure; this does no retrying.
    pub async fn fetch_reading(&self, machine: &str) -> Result<SensorReading, FeedError> {
        let url = format!("{}/{}", self.base_url, machine);
        debug!("Fetching {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                body: body.chars().take(120).collect(),
            });
        }

        let payload: SensorPayload = serde_json::from_str(&body)?;
        Ok(payload.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_payload() {
        let payload: SensorPayload =
            serde_json::from_str(r#"{"temperature":72,"vibration":1,"pressure":1}"#).unwrap();
        let reading: SensorReading = payload.into();
        assert_eq!(reading, SensorReading::new(72.0, 1.0, 1.0, None));
    }

    #[test]
    fn test_decode_payload_with_humidity() {
        let payload: SensorPayload = serde_json::from_str(
            r#"{"temperature":23.5,"vibration":0.05,"pressure":1.4,"humidity":45.0}"#,
        )
        .unwrap();
        assert_eq!(payload.humidity, Some(45.0));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(serde_json::from_str::<SensorPayload>("not json").is_err());
        assert!(serde_json::from_str::<SensorPayload>(r#"{"temperature":"hot"}"#).is_err());
    }

    #[test]
    fn test_decode_rejects_missing_fields() {
        let result = serde_json::from_str::<SensorPayload>(r#"{"temperature":72}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let feed = SensorFeed::new("http://localhost:8000/api/sensors/", Duration::from_secs(3))
            .unwrap();
        assert_eq!(feed.base_url, "http://localhost:8000/api/sensors");
    }
}
