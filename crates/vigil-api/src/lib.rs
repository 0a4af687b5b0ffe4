//! JSON REST API for Vigil.
//!
//! Exposes an axum [`Router`] backed by any store implementing
//! [`vigil_core::store::AlertStore`] + [`vigil_core::store::SosStore`] and
//! any [`vigil_core::scan::RiskClassifier`]. Transport concerns (TLS,
//! CORS, tracing layers) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = vigil_api::api_router(store, Arc::new(RandomRisk));
//! axum::serve(listener, app).await?;
//! ```

pub mod alerts;
pub mod error;
pub mod scan;
pub mod sos;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use serde::Serialize;
use vigil_core::{
  scan::RiskClassifier,
  store::{AlertStore, SosStore},
};

pub use error::ApiError;

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S, C> {
  pub store:      Arc<S>,
  pub classifier: Arc<C>,
}

// Manual impl: a derive would demand `S: Clone` even though only the Arcs
// are cloned.
impl<S, C> Clone for AppState<S, C> {
  fn clone(&self) -> Self {
    Self {
      store:      self.store.clone(),
      classifier: self.classifier.clone(),
    }
  }
}

// ─── Response envelope ───────────────────────────────────────────────────────

/// Every success response: a human-readable message plus the payload.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
  pub message: String,
  pub data:    T,
}

impl<T> Envelope<T> {
  pub fn new(message: impl Into<String>, data: T) -> Self {
    Self { message: message.into(), data }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store` and `classifier`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<S, C>(store: Arc<S>, classifier: Arc<C>) -> Router<()>
where
  S: AlertStore + SosStore + 'static,
  C: RiskClassifier + 'static,
{
  Router::new()
    .route(
      "/alerts",
      get(alerts::list::<S, C>).post(alerts::create::<S, C>),
    )
    .route("/ai-scan", post(scan::handler::<S, C>))
    .route("/mesh/sos", get(sos::list::<S, C>).post(sos::create::<S, C>))
    .with_state(AppState { store, classifier })
}

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use chrono::{TimeZone, Utc};
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use vigil_core::{
    alert::{HazardKind, WeatherAlertUpsert},
    memory::MemoryStore,
    scan::{RiskAssessment, RiskClassifier, SeverityTier},
    store::AlertStore as _,
  };

  /// A classifier with a canned verdict, standing in for the random stub.
  #[derive(Clone, Copy)]
  struct FixedRisk(RiskAssessment);

  impl RiskClassifier for FixedRisk {
    async fn assess(&self, _image: &str) -> RiskAssessment { self.0 }
  }

  fn router_on(store: Arc<MemoryStore>) -> Router<()> {
    api_router(
      store,
      Arc::new(FixedRisk(RiskAssessment {
        severity: SeverityTier::High,
        kind:     HazardKind::Fire,
      })),
    )
  }

  async fn send(
    router: Router<()>,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let request = match body {
      Some(v) => Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(v.to_string()))
        .unwrap(),
      None => Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
      .await
      .unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
  }

  fn weather_at(
    headline: &str,
    lat: f64,
    lon: f64,
    issued_on: chrono::DateTime<Utc>,
  ) -> WeatherAlertUpsert {
    WeatherAlertUpsert {
      district: "Delhi".into(),
      headline: headline.into(),
      severity: "General".into(),
      description: "No description".into(),
      lat,
      lon,
      kind: HazardKind::Flood,
      issued_on,
    }
  }

  // ── POST /alerts ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn post_alert_applies_defaults() {
    let store = Arc::new(MemoryStore::new());
    let (status, body) = send(
      router_on(store.clone()),
      "POST",
      "/alerts",
      Some(json!({
        "district": "Delhi",
        "alert": "Heavy Rain",
        "severity": "High",
      })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["description"], "No description provided");
    assert_eq!(body["data"]["type"], "default");
    assert_eq!(body["data"]["source"], "manual");
    assert_eq!(store.list_alerts().await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn post_alert_missing_severity_is_rejected() {
    let store = Arc::new(MemoryStore::new());
    let (status, body) = send(
      router_on(store.clone()),
      "POST",
      "/alerts",
      Some(json!({ "district": "Delhi", "alert": "Heavy Rain" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "severity is required");
    assert!(store.list_alerts().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn post_alert_blank_district_is_rejected() {
    let store = Arc::new(MemoryStore::new());
    let (status, _) = send(
      router_on(store),
      "POST",
      "/alerts",
      Some(json!({
        "district": "  ",
        "alert": "Heavy Rain",
        "severity": "High",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn post_alert_accepts_an_unknown_type_as_default() {
    let store = Arc::new(MemoryStore::new());
    let (status, body) = send(
      router_on(store),
      "POST",
      "/alerts",
      Some(json!({
        "district": "Delhi",
        "alert": "Ground Shaking",
        "severity": "High",
        "type": "earthquake",
      })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["type"], "default");
  }

  // ── GET /alerts ───────────────────────────────────────────────────────────

  const DELHI: (f64, f64) = (28.7041, 77.1025);

  #[tokio::test]
  async fn get_alerts_filters_by_radius_and_sorts_newest_first() {
    let store = Arc::new(MemoryStore::new());
    let base = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();

    // Two near Delhi (older first), one in Mumbai, one without coords.
    store
      .upsert_weather_alert(weather_at("older", DELHI.0, DELHI.1, base))
      .await
      .unwrap();
    store
      .upsert_weather_alert(weather_at(
        "newer",
        DELHI.0,
        DELHI.1,
        base + chrono::Duration::hours(1),
      ))
      .await
      .unwrap();
    store
      .upsert_weather_alert(weather_at("far", 19.076, 72.8777, base))
      .await
      .unwrap();
    store
      .insert_alert(vigil_core::alert::NewAlert::manual(
        "Delhi".into(),
        "no coords".into(),
        "High".into(),
        None,
        None,
        None,
        None,
      ))
      .await
      .unwrap();

    let (status, body) = send(
      router_on(store),
      "GET",
      "/alerts?lat=28.7041&lon=77.1025&radius=5",
      None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["alert"], "newer");
    assert_eq!(data[1]["alert"], "older");
  }

  #[tokio::test]
  async fn get_alerts_without_params_returns_everything() {
    let store = Arc::new(MemoryStore::new());
    let base = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
    store
      .upsert_weather_alert(weather_at("a", DELHI.0, DELHI.1, base))
      .await
      .unwrap();
    store
      .upsert_weather_alert(weather_at("b", 19.076, 72.8777, base))
      .await
      .unwrap();

    let (status, body) = send(router_on(store), "GET", "/alerts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
  }

  #[tokio::test]
  async fn malformed_geo_params_mean_no_filter() {
    let store = Arc::new(MemoryStore::new());
    let base = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
    store
      .upsert_weather_alert(weather_at("far", 19.076, 72.8777, base))
      .await
      .unwrap();

    let (status, body) = send(
      router_on(store),
      "GET",
      "/alerts?lat=somewhere&lon=77.1025&radius=5",
      None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
  }

  // ── POST /ai-scan ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn ai_scan_without_image_stores_nothing() {
    let store = Arc::new(MemoryStore::new());
    let (status, body) = send(
      router_on(store.clone()),
      "POST",
      "/ai-scan",
      Some(json!({ "reporter": "warden-7" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "imageBase64 is required");
    assert!(store.list_alerts().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn ai_scan_records_the_classifier_verdict() {
    let store = Arc::new(MemoryStore::new());
    let (status, body) = send(
      router_on(store.clone()),
      "POST",
      "/ai-scan",
      Some(json!({
        "imageBase64": "aGVsbG8=",
        "lat": 28.7,
        "lon": 77.1,
        "reporter": "warden-7",
      })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["severity"], "High");
    assert_eq!(body["data"]["detectedType"], "fire");
    assert_eq!(body["data"]["alert"]["district"], "Unknown");
    assert_eq!(body["data"]["alert"]["source"], "ai-scan");
    assert_eq!(body["data"]["alert"]["alert"], "AI Scan: fire detected");

    let stored = store.list_alerts().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].description.contains("warden-7"));
  }

  // ── /mesh/sos ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn sos_missing_sender_is_rejected() {
    let store = Arc::new(MemoryStore::new());
    let (status, body) = send(
      router_on(store),
      "POST",
      "/mesh/sos",
      Some(json!({ "msg": "trapped on the roof" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "senderId is required");
  }

  #[tokio::test]
  async fn sos_round_trip_with_radius_filter() {
    let store = Arc::new(MemoryStore::new());

    let (status, body) = send(
      router_on(store.clone()),
      "POST",
      "/mesh/sos",
      Some(json!({
        "senderId": "relay-1",
        "msg": "trapped",
        "lat": DELHI.0,
        "lon": DELHI.1,
      })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["senderId"], "relay-1");

    // A second record with no coordinates.
    send(
      router_on(store.clone()),
      "POST",
      "/mesh/sos",
      Some(json!({ "senderId": "relay-2", "msg": "need water" })),
    )
    .await;

    let (_, unfiltered) =
      send(router_on(store.clone()), "GET", "/mesh/sos", None).await;
    let all = unfiltered["data"].as_array().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0]["senderId"], "relay-1");
    assert_eq!(all[1]["senderId"], "relay-2");

    let (_, filtered) = send(
      router_on(store),
      "GET",
      "/mesh/sos?lat=28.7041&lon=77.1025&radius=5",
      None,
    )
    .await;
    let nearby = filtered["data"].as_array().unwrap();
    assert_eq!(nearby.len(), 1);
    assert_eq!(nearby[0]["senderId"], "relay-1");
  }
}
