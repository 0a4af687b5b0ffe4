//! Handler for `POST /ai-scan`.
//!
//! Validates the payload, hands it to whatever [`RiskClassifier`] the
//! router was built with, and records the resulting alert. Swapping the
//! placeholder classifier for a real model touches nothing here.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use vigil_core::{
  alert::{Alert, HazardKind, NewAlert},
  scan::RiskClassifier,
  store::{AlertStore, SosStore},
};

use crate::{
  AppState, Envelope,
  error::{ApiError, require},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanBody {
  /// Opaque image payload; never decoded here.
  pub image_base64: Option<String>,
  pub lat:          Option<f64>,
  pub lon:          Option<f64>,
  pub reporter:     Option<String>,
}

/// The classification result alongside the alert it produced.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOutcome {
  pub severity:      String,
  pub detected_type: HazardKind,
  pub alert:         Alert,
}

/// `POST /ai-scan` — body: `{imageBase64, lat?, lon?, reporter?}`
pub async fn handler<S, C>(
  State(state): State<AppState<S, C>>,
  Json(body): Json<ScanBody>,
) -> Result<Json<Envelope<ScanOutcome>>, ApiError>
where
  S: AlertStore + SosStore + 'static,
  C: RiskClassifier + 'static,
{
  let image = require(body.image_base64, "imageBase64")?;

  let assessment = state.classifier.assess(&image).await;
  let new = NewAlert::from_scan(
    &assessment,
    body.lat,
    body.lon,
    body.reporter.as_deref(),
  );
  let alert =
    state.store.insert_alert(new).await.map_err(ApiError::store)?;

  Ok(Json(Envelope::new(
    "AI analysis complete",
    ScanOutcome {
      severity: assessment.severity.as_str().to_owned(),
      detected_type: assessment.kind,
      alert,
    },
  )))
}
