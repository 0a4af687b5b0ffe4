//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, UUIDs as hyphenated lowercase
//! strings, and the two closed enums (`AlertSource`, `HazardKind`) as their
//! wire tags.

use chrono::{DateTime, Utc};
use uuid::Uuid;
use vigil_core::{
  alert::{Alert, AlertSource, HazardKind},
  sos::SosRecord,
};

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── AlertSource ─────────────────────────────────────────────────────────────

pub fn decode_source(s: &str) -> Result<AlertSource> {
  match s {
    "manual" => Ok(AlertSource::Manual),
    "ai-scan" => Ok(AlertSource::AiScan),
    "openweather" => Ok(AlertSource::Openweather),
    other => Err(Error::UnknownSource(other.to_owned())),
  }
}

// ─── Row carriers ────────────────────────────────────────────────────────────

/// An `alerts` row as read inside the connection closure; converted to the
/// domain type outside, where fallible parsing can use this crate's error.
pub struct RawAlert {
  pub alert_id:    String,
  pub district:    String,
  pub headline:    String,
  pub severity:    String,
  pub description: String,
  pub lat:         Option<f64>,
  pub lon:         Option<f64>,
  pub kind:        String,
  pub issued_on:   String,
  pub source:      String,
}

impl RawAlert {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      alert_id:    row.get(0)?,
      district:    row.get(1)?,
      headline:    row.get(2)?,
      severity:    row.get(3)?,
      description: row.get(4)?,
      lat:         row.get(5)?,
      lon:         row.get(6)?,
      kind:        row.get(7)?,
      issued_on:   row.get(8)?,
      source:      row.get(9)?,
    })
  }

  pub fn decode(self) -> Result<Alert> {
    Ok(Alert {
      alert_id:    decode_uuid(&self.alert_id)?,
      district:    self.district,
      headline:    self.headline,
      severity:    self.severity,
      description: self.description,
      lat:         self.lat,
      lon:         self.lon,
      kind:        HazardKind::parse(&self.kind),
      issued_on:   decode_dt(&self.issued_on)?,
      source:      decode_source(&self.source)?,
    })
  }
}

/// A `sos_records` row, same split as [`RawAlert`].
pub struct RawSos {
  pub sos_id:    String,
  pub sender_id: String,
  pub msg:       String,
  pub lat:       Option<f64>,
  pub lon:       Option<f64>,
  pub timestamp: String,
}

impl RawSos {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      sos_id:    row.get(0)?,
      sender_id: row.get(1)?,
      msg:       row.get(2)?,
      lat:       row.get(3)?,
      lon:       row.get(4)?,
      timestamp: row.get(5)?,
    })
  }

  pub fn decode(self) -> Result<SosRecord> {
    Ok(SosRecord {
      sos_id:    decode_uuid(&self.sos_id)?,
      sender_id: self.sender_id,
      msg:       self.msg,
      lat:       self.lat,
      lon:       self.lon,
      timestamp: decode_dt(&self.timestamp)?,
    })
  }
}
