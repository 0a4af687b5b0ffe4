//! SOS records — distress messages relayed from the offline mesh.
//!
//! A record is written once on relay ingestion and never updated or deleted
//! by this core. Retention is an external concern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored distress message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SosRecord {
  pub sos_id:    Uuid,
  pub sender_id: String,
  pub msg:       String,
  pub lat:       Option<f64>,
  pub lon:       Option<f64>,
  /// Store-assigned at ingestion; never changes.
  pub timestamp: DateTime<Utc>,
}

/// Input to [`crate::store::SosStore::insert_sos`].
/// `sos_id` and `timestamp` are always set by the store.
#[derive(Debug, Clone)]
pub struct NewSos {
  pub sender_id: String,
  pub msg:       String,
  pub lat:       Option<f64>,
  pub lon:       Option<f64>,
}
