//! The reconciler: classify feed advisories and upsert them into the alert
//! store, one monitored locality at a time.

use std::{sync::Arc, time::Duration};

use tokio::time::interval;
use tracing::{error, info};

use vigil_core::{
  alert::{HazardKind, WeatherAlertUpsert},
  locality::MonitoredLocality,
  store::AlertStore,
};

use crate::feed::{Advisory, WeatherFeed};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Classify an advisory's free-text event into a coarse hazard kind by
/// case-insensitive substring match.
///
/// Intentionally coarse: an advisory that is severe but matches neither
/// substring lands in `default`.
pub fn classify(event: &str) -> HazardKind {
  let event = event.to_lowercase();
  if event.contains("flood") {
    HazardKind::Flood
  } else if event.contains("storm") {
    HazardKind::Cyclone
  } else {
    HazardKind::Default
  }
}

// ─── Reconciler ──────────────────────────────────────────────────────────────

/// Pulls advisories per monitored locality and merges them into the store.
///
/// Each locality's fetch-and-upsert is isolated: a failure is logged and
/// the pass moves on. Overlapping passes are tolerated — every upsert is
/// an independently atomic conditional write, so concurrent runs converge.
pub struct Reconciler<S, F> {
  store:         Arc<S>,
  feed:          F,
  localities:    Vec<MonitoredLocality>,
  poll_interval: Duration,
}

impl<S, F> Reconciler<S, F>
where
  S: AlertStore,
  F: WeatherFeed,
{
  pub fn new(
    store: Arc<S>,
    feed: F,
    localities: Vec<MonitoredLocality>,
  ) -> Self {
    Self {
      store,
      feed,
      localities,
      poll_interval: DEFAULT_POLL_INTERVAL,
    }
  }

  /// Set the poll interval.
  pub fn with_poll_interval(mut self, interval: Duration) -> Self {
    self.poll_interval = interval;
    self
  }

  /// One full pass over the monitored localities.
  pub async fn reconcile_once(&self) {
    for locality in &self.localities {
      let advisories =
        match self.feed.advisories(locality.lat, locality.lon).await {
          Ok(advisories) => advisories,
          Err(e) => {
            error!(
              district = %locality.name,
              error = %e,
              "weather feed fetch failed"
            );
            continue;
          }
        };

      for advisory in advisories {
        let upsert = advisory_upsert(locality, &advisory);
        if let Err(e) = self.store.upsert_weather_alert(upsert).await {
          error!(
            district = %locality.name,
            event = %advisory.event,
            error = %e,
            "failed to store weather alert"
          );
        }
      }
    }
  }

  /// Run forever: one pass immediately, then one per poll interval.
  pub async fn run(self) {
    let mut tick = interval(self.poll_interval);
    info!(
      localities = self.localities.len(),
      poll_interval = ?self.poll_interval,
      "starting weather reconciler"
    );
    loop {
      tick.tick().await;
      self.reconcile_once().await;
    }
  }
}

fn advisory_upsert(
  locality: &MonitoredLocality,
  advisory: &Advisory,
) -> WeatherAlertUpsert {
  let severity = if advisory.tags.is_empty() {
    "General".to_owned()
  } else {
    advisory.tags.join(", ")
  };

  WeatherAlertUpsert {
    district: locality.name.clone(),
    headline: advisory.event.clone(),
    severity,
    description: advisory
      .description
      .clone()
      .unwrap_or_else(|| "No description".to_owned()),
    lat: locality.lat,
    lon: locality.lon,
    kind: classify(&advisory.event),
    issued_on: advisory.issued_on(),
  }
}
