//! In-memory store — the reference implementation both traits are tested
//! against, and the backend reconciler/API tests run on.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use crate::{
  Error, Result,
  alert::{Alert, AlertSource, NewAlert, WeatherAlertUpsert},
  sos::{NewSos, SosRecord},
  store::{AlertStore, SosStore},
};

/// A mutex-guarded in-memory store. Cloning is cheap; clones share state.
#[derive(Clone, Default)]
pub struct MemoryStore {
  inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
  alerts: Mutex<Vec<Alert>>,
  sos:    Mutex<Vec<SosRecord>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }
}

impl AlertStore for MemoryStore {
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

    let mut alerts =
      self.inner.alerts.lock().map_err(|_| Error::LockPoisoned)?;
    alerts.push(alert.clone());
    Ok(alert)
  }

  async fn list_alerts(&self) -> Result<Vec<Alert>> {
    let alerts =
      self.inner.alerts.lock().map_err(|_| Error::LockPoisoned)?;
    Ok(alerts.clone())
  }

  async fn upsert_weather_alert(
    &self,
    upsert: WeatherAlertUpsert,
  ) -> Result<Alert> {
    // The mutex makes the find-and-write a single atomic step, matching
    // the conditional-write guarantee of the SQLite backend.
    let mut alerts =
      self.inner.alerts.lock().map_err(|_| Error::LockPoisoned)?;

    let existing = alerts.iter_mut().find(|a| {
      a.source == AlertSource::Openweather
        && a.headline == upsert.headline
        && a.district == upsert.district
    });

    match existing {
      Some(alert) => {
        alert.severity = upsert.severity;
        alert.description = upsert.description;
        alert.lat = Some(upsert.lat);
        alert.lon = Some(upsert.lon);
        alert.kind = upsert.kind;
        alert.issued_on = upsert.issued_on;
        Ok(alert.clone())
      }
      None => {
        let alert = Alert {
          alert_id:    Uuid::new_v4(),
          district:    upsert.district,
          headline:    upsert.headline,
          severity:    upsert.severity,
          description: upsert.description,
          lat:         Some(upsert.lat),
          lon:         Some(upsert.lon),
          kind:        upsert.kind,
          issued_on:   upsert.issued_on,
          source:      AlertSource::Openweather,
        };
        alerts.push(alert.clone());
        Ok(alert)
      }
    }
  }
}

impl SosStore for MemoryStore {
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

    let mut sos = self.inner.sos.lock().map_err(|_| Error::LockPoisoned)?;
    sos.push(record.clone());
    Ok(record)
  }

  async fn list_sos(&self) -> Result<Vec<SosRecord>> {
    let sos = self.inner.sos.lock().map_err(|_| Error::LockPoisoned)?;
    Ok(sos.clone())
  }
}
