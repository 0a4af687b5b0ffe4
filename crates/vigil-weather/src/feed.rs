//! The `WeatherFeed` trait and the OpenWeather One Call client.
//!
//! The reconciler depends on the trait, not the concrete client, so tests
//! can drive it with a canned feed.

use std::{future::Future, time::Duration};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

/// Endpoint for the One Call API; the advisory array rides along with the
/// forecast payload.
pub const DEFAULT_BASE_URL: &str =
  "https://api.openweathermap.org/data/3.0/onecall";

/// Bound on any single feed request. A fetch past this is a per-locality
/// failure, not a hang.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum FeedError {
  /// Network failure, timeout, non-2xx status, or a malformed body.
  #[error("request failed: {0}")]
  Http(#[from] reqwest::Error),

  /// The feed declined to answer for a reason of its own.
  #[error("feed unavailable: {0}")]
  Unavailable(String),
}

// ─── Advisory ────────────────────────────────────────────────────────────────

/// One hazard advisory as returned by the feed.
#[derive(Debug, Clone, Deserialize)]
pub struct Advisory {
  /// Free-text event name, e.g. "Flood Warning". Uncontrolled vocabulary.
  pub event:       String,
  /// Advisory start, unix seconds.
  pub start:       i64,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub tags:        Vec<String>,
}

impl Advisory {
  /// The advisory start as a UTC timestamp; an out-of-range value falls
  /// back to the current time.
  pub fn issued_on(&self) -> DateTime<Utc> {
    DateTime::from_timestamp(self.start, 0).unwrap_or_else(Utc::now)
  }
}

/// The slice of the One Call response we care about.
#[derive(Debug, Deserialize)]
struct OneCallResponse {
  #[serde(default)]
  alerts: Vec<Advisory>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the external weather-advisory feed.
pub trait WeatherFeed: Send + Sync {
  /// Fetch current advisories for a reference coordinate. An absent
  /// `alerts` array is an empty result, not an error.
  fn advisories(
    &self,
    lat: f64,
    lon: f64,
  ) -> impl Future<Output = Result<Vec<Advisory>, FeedError>> + Send + '_;
}

// ─── One Call client ─────────────────────────────────────────────────────────

/// A keyed client for the OpenWeather One Call API.
#[derive(Clone)]
pub struct OneCallClient {
  http:     reqwest::Client,
  api_key:  String,
  base_url: String,
}

impl OneCallClient {
  pub fn new(api_key: impl Into<String>) -> Result<Self, FeedError> {
    let http = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
    Ok(Self {
      http,
      api_key: api_key.into(),
      base_url: DEFAULT_BASE_URL.to_owned(),
    })
  }

  /// Point the client somewhere else — a proxy, or a local fixture server.
  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }
}

impl WeatherFeed for OneCallClient {
  async fn advisories(
    &self,
    lat: f64,
    lon: f64,
  ) -> Result<Vec<Advisory>, FeedError> {
    let response = self
      .http
      .get(&self.base_url)
      .query(&[
        ("lat", lat.to_string()),
        ("lon", lon.to_string()),
        ("appid", self.api_key.clone()),
        ("units", "metric".to_owned()),
      ])
      .send()
      .await?
      .error_for_status()?;

    let body: OneCallResponse = response.json().await?;
    Ok(body.alerts)
  }
}
