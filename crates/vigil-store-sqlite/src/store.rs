//! [`SqliteStore`] — the SQLite implementation of [`AlertStore`] and
//! [`SosStore`].

use std::path::Path;

use chrono::Utc;
use uuid::Uuid;

use vigil_core::{
  alert::{Alert, AlertSource, NewAlert, WeatherAlertUpsert},
  sos::{NewSos, SosRecord},
  store::{AlertStore, SosStore},
};

use crate::{
  Error, Result,
  encode::{RawAlert, RawSos, decode_uuid, encode_dt, encode_uuid},
  schema::SCHEMA,
};

const ALERT_COLUMNS: &str = "alert_id, district, headline, severity, \
                             description, lat, lon, kind, issued_on, source";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Vigil store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── AlertStore impl ─────────────────────────────────────────────────────────

impl AlertStore for SqliteStore {
  type Error = Error;

  async fn insert_alert(&self, new: NewAlert) -> Result<Alert> {
    let alert = Alert {
      alert_id:    Uuid::new_v4(),
      district:    new.district,
      headline:    new.headline,
      severity:    new.severity,
      description: new.description,
      lat:         new.lat,
      lon:         new.lon,
      kind:        new.kind,
      issued_on:   Utc::now(),
      source:      new.source,
    };

    let row = (
      encode_uuid(alert.alert_id),
      alert.district.clone(),
      alert.headline.clone(),
      alert.severity.clone(),
      alert.description.clone(),
      alert.lat,
      alert.lon,
      alert.kind.as_str(),
      encode_dt(alert.issued_on),
      alert.source.as_str(),
    );

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO alerts (
             alert_id, district, headline, severity, description,
             lat, lon, kind, issued_on, source
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            row.0, row.1, row.2, row.3, row.4, row.5, row.6, row.7, row.8,
            row.9,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(alert)
  }

  async fn list_alerts(&self) -> Result<Vec<Alert>> {
    let raw: Vec<RawAlert> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ALERT_COLUMNS} FROM alerts ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map([], RawAlert::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raw.into_iter().map(RawAlert::decode).collect()
  }

  async fn upsert_weather_alert(
    &self,
    upsert: WeatherAlertUpsert,
  ) -> Result<Alert> {
    let candidate_id = encode_uuid(Uuid::new_v4());
    let row = (
      upsert.district.clone(),
      upsert.headline.clone(),
      upsert.severity.clone(),
      upsert.description.clone(),
      upsert.lat,
      upsert.lon,
      upsert.kind.as_str(),
      encode_dt(upsert.issued_on),
    );

    // One conditional write against the partial unique index — atomic, so
    // overlapping reconciliation passes converge. On conflict the existing
    // row keeps its alert_id and has every payload field overwritten.
    let stored_id: String = self
      .conn
      .call(move |conn| {
        let id = conn.query_row(
          "INSERT INTO alerts (
             alert_id, district, headline, severity, description,
             lat, lon, kind, issued_on, source
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 'openweather')
           ON CONFLICT(headline, district, source)
             WHERE source = 'openweather'
           DO UPDATE SET
             severity    = excluded.severity,
             description = excluded.description,
             lat         = excluded.lat,
             lon         = excluded.lon,
             kind        = excluded.kind,
             issued_on   = excluded.issued_on
           RETURNING alert_id",
          rusqlite::params![
            candidate_id,
            row.0,
            row.1,
            row.2,
            row.3,
            row.4,
            row.5,
            row.6,
            row.7,
          ],
          |r| r.get(0),
        )?;
        Ok(id)
      })
      .await?;

    Ok(Alert {
      alert_id:    decode_uuid(&stored_id)?,
      district:    upsert.district,
      headline:    upsert.headline,
      severity:    upsert.severity,
      description: upsert.description,
      lat:         Some(upsert.lat),
      lon:         Some(upsert.lon),
      kind:        upsert.kind,
      issued_on:   upsert.issued_on,
      source:      AlertSource::Openweather,
    })
  }
}

// ─── SosStore impl ───────────────────────────────────────────────────────────

impl SosStore for SqliteStore {
  type Error = Error;

  async fn insert_sos(&self, new: NewSos) -> Result<SosRecord> {
    let record = SosRecord {
      sos_id:    Uuid::new_v4(),
      sender_id: new.sender_id,
      msg:       new.msg,
      lat:       new.lat,
      lon:       new.lon,
      timestamp: Utc::now(),
    };

    let row = (
      encode_uuid(record.sos_id),
      record.sender_id.clone(),
      record.msg.clone(),
      record.lat,
      record.lon,
      encode_dt(record.timestamp),
    );

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO sos_records (
             sos_id, sender_id, msg, lat, lon, timestamp
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![row.0, row.1, row.2, row.3, row.4, row.5],
        )?;
        Ok(())
      })
      .await?;

    Ok(record)
  }

  async fn list_sos(&self) -> Result<Vec<SosRecord>> {
    let raw: Vec<RawSos> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT sos_id, sender_id, msg, lat, lon, timestamp
           FROM sos_records ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map([], RawSos::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raw.into_iter().map(RawSos::decode).collect()
  }
}
