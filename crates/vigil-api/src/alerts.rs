//! Handlers for the `/alerts` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/alerts` | Optional `?lat&lon&radius`; newest first |
//! | `POST` | `/alerts` | Body: `{district, alert, severity, ...}` |

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;
use vigil_core::{
  alert::{self, Alert, HazardKind, NewAlert},
  geo::{RadiusFilter, within_radius},
  scan::RiskClassifier,
  store::{AlertStore, SosStore},
};

use crate::{
  AppState, Envelope,
  error::{ApiError, require},
};

// ─── Geo query ───────────────────────────────────────────────────────────────

/// Raw radius-query parameters, shared with the SOS listing.
///
/// Kept as strings on purpose: a malformed number means "no filter
/// requested", never a 400.
#[derive(Debug, Default, Deserialize)]
pub struct GeoParams {
  pub lat:    Option<String>,
  pub lon:    Option<String>,
  pub radius: Option<String>,
}

impl GeoParams {
  pub(crate) fn filter(&self) -> Option<RadiusFilter> {
    RadiusFilter::from_query(
      self.lat.as_deref(),
      self.lon.as_deref(),
      self.radius.as_deref(),
    )
  }
}

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /alerts[?lat=..&lon=..&radius=..]`
pub async fn list<S, C>(
  State(state): State<AppState<S, C>>,
  Query(params): Query<GeoParams>,
) -> Result<Json<Envelope<Vec<Alert>>>, ApiError>
where
  S: AlertStore + SosStore + 'static,
  C: RiskClassifier + 'static,
{
  let alerts = state.store.list_alerts().await.map_err(ApiError::store)?;
  let mut alerts = within_radius(params.filter().as_ref(), alerts);
  alert::newest_first(&mut alerts);
  Ok(Json(Envelope::new("alerts fetched", alerts)))
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateAlertBody {
  pub district:    Option<String>,
  /// Headline text.
  pub alert:       Option<String>,
  pub severity:    Option<String>,
  pub description: Option<String>,
  pub lat:         Option<f64>,
  pub lon:         Option<f64>,
  #[serde(rename = "type")]
  pub kind:        Option<HazardKind>,
}

/// `POST /alerts` — body: `{district, alert, severity, description?, lat?,
/// lon?, type?}`
pub async fn create<S, C>(
  State(state): State<AppState<S, C>>,
  Json(body): Json<CreateAlertBody>,
) -> Result<Json<Envelope<Alert>>, ApiError>
where
  S: AlertStore + SosStore + 'static,
  C: RiskClassifier + 'static,
{
  let district = require(body.district, "district")?;
  let headline = require(body.alert, "alert")?;
  let severity = require(body.severity, "severity")?;

  let new = NewAlert::manual(
    district,
    headline,
    severity,
    body.description.filter(|d| !d.trim().is_empty()),
    body.lat,
    body.lon,
    body.kind,
  );
  let stored =
    state.store.insert_alert(new).await.map_err(ApiError::store)?;
  Ok(Json(Envelope::new("alert added", stored)))
}
