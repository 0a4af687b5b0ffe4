//! Handlers for the `/mesh/sos` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/mesh/sos` | Optional `?lat&lon&radius`; natural order |
//! | `POST` | `/mesh/sos` | Body: `{senderId, msg, lat?, lon?}` |

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;
use vigil_core::{
  geo::within_radius,
  scan::RiskClassifier,
  sos::{NewSos, SosRecord},
  store::{AlertStore, SosStore},
};

use crate::{
  AppState, Envelope,
  alerts::GeoParams,
  error::{ApiError, require},
};

/// `GET /mesh/sos[?lat=..&lon=..&radius=..]` — filtered but never resorted;
/// records come back in the store's natural order.
pub async fn list<S, C>(
  State(state): State<AppState<S, C>>,
  Query(params): Query<GeoParams>,
) -> Result<Json<Envelope<Vec<SosRecord>>>, ApiError>
where
  S: AlertStore + SosStore + 'static,
  C: RiskClassifier + 'static,
{
  let records = state.store.list_sos().await.map_err(ApiError::store)?;
  let records = within_radius(params.filter().as_ref(), records);
  Ok(Json(Envelope::new("sos records fetched", records)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSosBody {
  pub sender_id: Option<String>,
  pub msg:       Option<String>,
  pub lat:       Option<f64>,
  pub lon:       Option<f64>,
}

/// `POST /mesh/sos` — body: `{senderId, msg, lat?, lon?}`
pub async fn create<S, C>(
  State(state): State<AppState<S, C>>,
  Json(body): Json<CreateSosBody>,
) -> Result<Json<Envelope<SosRecord>>, ApiError>
where
  S: AlertStore + SosStore + 'static,
  C: RiskClassifier + 'static,
{
  let sender_id = require(body.sender_id, "senderId")?;
  let msg = require(body.msg, "msg")?;

  let record = state
    .store
    .insert_sos(NewSos {
      sender_id,
      msg,
      lat: body.lat,
      lon: body.lon,
    })
    .await
    .map_err(ApiError::store)?;
  Ok(Json(Envelope::new("SOS stored for mesh sync", record)))
}
