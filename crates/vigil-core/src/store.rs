//! The `AlertStore` and `SosStore` traits.
//!
//! The traits are implemented by storage backends (`vigil-store-sqlite` for
//! durability, [`crate::memory::MemoryStore`] for tests). Higher layers —
//! the API router and the weather reconciler — depend on these
//! abstractions, not on any concrete backend.
//!
//! All methods return `Send` futures so the traits can be used in
//! multi-threaded async runtimes (tokio with `axum`).

use std::future::Future;

use crate::{
  alert::{Alert, NewAlert, WeatherAlertUpsert},
  sos::{NewSos, SosRecord},
};

/// Abstraction over the durable alert collection.
pub trait AlertStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new alert. The store assigns `alert_id` and sets
  /// `issued_on` to the current time.
  fn insert_alert(
    &self,
    new: NewAlert,
  ) -> impl Future<Output = Result<Alert, Self::Error>> + Send + '_;

  /// All stored alerts, in insertion order. Geo filtering and recency
  /// sorting happen in the caller.
  fn list_alerts(
    &self,
  ) -> impl Future<Output = Result<Vec<Alert>, Self::Error>> + Send + '_;

  /// Insert-or-overwrite a weather alert keyed on
  /// (`headline`, `district`, `source = openweather`).
  ///
  /// Must be a single atomic conditional write — never read-then-write —
  /// so overlapping reconciliation passes converge instead of duplicating.
  /// An existing record keeps its `alert_id`; every payload field is
  /// overwritten. Re-running with identical input changes nothing.
  ///
  /// The key deliberately carries no upstream advisory id: a feed that
  /// rephrases an advisory mid-lifecycle produces a second record, not an
  /// update.
  fn upsert_weather_alert(
    &self,
    upsert: WeatherAlertUpsert,
  ) -> impl Future<Output = Result<Alert, Self::Error>> + Send + '_;
}

/// Abstraction over the durable SOS collection.
pub trait SosStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a relayed distress message. The store assigns `sos_id` and
  /// the ingestion `timestamp`. Records are immutable afterwards.
  fn insert_sos(
    &self,
    new: NewSos,
  ) -> impl Future<Output = Result<SosRecord, Self::Error>> + Send + '_;

  /// All stored records in natural (insertion) order — SOS queries are
  /// never resorted.
  fn list_sos(
    &self,
  ) -> impl Future<Output = Result<Vec<SosRecord>, Self::Error>> + Send + '_;
}
