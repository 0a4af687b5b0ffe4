//! Alert types — hazard notices aggregated from manual reports, image risk
//! scans, and the weather feed.
//!
//! An alert is written once by its source. Manual and scan alerts are never
//! mutated afterwards; weather alerts are overwritten in place by the
//! reconciler, keyed on (`headline`, `district`, `source = openweather`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scan::RiskAssessment;

/// Default description stored when a submitter provides none.
pub const NO_DESCRIPTION: &str = "No description provided";

// ─── HazardKind ──────────────────────────────────────────────────────────────

/// Coarse hazard classification.
///
/// This is an open set: upstream feed vocabulary is uncontrolled, so any
/// unrecognised wire value deserialises to [`HazardKind::Default`] rather
/// than failing.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum HazardKind {
  Structural,
  Fire,
  Flood,
  Landslide,
  Cyclone,
  Other,
  #[default]
  Default,
}

impl From<String> for HazardKind {
  fn from(s: String) -> Self { Self::parse(&s) }
}

impl HazardKind {
  /// The wire/database string for this kind.
  /// Must match the `rename_all = "lowercase"` serde tags above.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Structural => "structural",
      Self::Fire => "fire",
      Self::Flood => "flood",
      Self::Landslide => "landslide",
      Self::Cyclone => "cyclone",
      Self::Other => "other",
      Self::Default => "default",
    }
  }

  /// Parse a stored string, falling back to [`HazardKind::Default`] for
  /// anything unrecognised.
  pub fn parse(s: &str) -> Self {
    match s {
      "structural" => Self::Structural,
      "fire" => Self::Fire,
      "flood" => Self::Flood,
      "landslide" => Self::Landslide,
      "cyclone" => Self::Cyclone,
      "other" => Self::Other,
      _ => Self::Default,
    }
  }
}

impl std::fmt::Display for HazardKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── AlertSource ─────────────────────────────────────────────────────────────

/// How an alert entered the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertSource {
  /// Submitted directly through `POST /alerts`.
  Manual,
  /// Produced by the image risk classifier.
  AiScan,
  /// Reconciled from the OpenWeather feed.
  Openweather,
}

impl AlertSource {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Manual => "manual",
      Self::AiScan => "ai-scan",
      Self::Openweather => "openweather",
    }
  }
}

// ─── Alert ───────────────────────────────────────────────────────────────────

/// A stored hazard notice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
  pub alert_id:    Uuid,
  pub district:    String,
  /// Headline text; wire name `alert`. Part of the reconciliation key for
  /// weather alerts.
  #[serde(rename = "alert")]
  pub headline:    String,
  /// Free-form severity: submitter-chosen for manual alerts, a tier name
  /// for scan alerts, joined feed tags for weather alerts.
  pub severity:    String,
  pub description: String,
  pub lat:         Option<f64>,
  pub lon:         Option<f64>,
  #[serde(rename = "type")]
  pub kind:        HazardKind,
  /// Store-assigned at insert, except for weather alerts, which carry the
  /// advisory's own start time.
  pub issued_on:   DateTime<Utc>,
  pub source:      AlertSource,
}

/// Stable sort, most recent `issued_on` first. Ties keep stored order.
pub fn newest_first(alerts: &mut [Alert]) {
  alerts.sort_by(|a, b| b.issued_on.cmp(&a.issued_on));
}

// ─── NewAlert ────────────────────────────────────────────────────────────────

/// Input to [`crate::store::AlertStore::insert_alert`].
/// `alert_id` and `issued_on` are always set by the store.
#[derive(Debug, Clone)]
pub struct NewAlert {
  pub district:    String,
  pub headline:    String,
  pub severity:    String,
  pub description: String,
  pub lat:         Option<f64>,
  pub lon:         Option<f64>,
  pub kind:        HazardKind,
  pub source:      AlertSource,
}

impl NewAlert {
  /// A manually submitted alert, with defaults applied for the optional
  /// fields.
  pub fn manual(
    district: String,
    headline: String,
    severity: String,
    description: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    kind: Option<HazardKind>,
  ) -> Self {
    Self {
      district,
      headline,
      severity,
      description: description.unwrap_or_else(|| NO_DESCRIPTION.to_owned()),
      lat,
      lon,
      kind: kind.unwrap_or_default(),
      source: AlertSource::Manual,
    }
  }

  /// An alert synthesised from a risk-classifier assessment. The scan has
  /// no notion of district, so it is recorded as `"Unknown"`.
  pub fn from_scan(
    assessment: &RiskAssessment,
    lat: Option<f64>,
    lon: Option<f64>,
    reporter: Option<&str>,
  ) -> Self {
    let kind = assessment.kind;
    Self {
      district: "Unknown".to_owned(),
      headline: format!("AI Scan: {kind} detected"),
      severity: assessment.severity.as_str().to_owned(),
      description: format!(
        "AI-scanned image suggests {kind}. Reporter: {}",
        reporter.unwrap_or("anonymous"),
      ),
      lat,
      lon,
      kind,
      source: AlertSource::AiScan,
    }
  }
}

// ─── WeatherAlertUpsert ──────────────────────────────────────────────────────

/// Input to [`crate::store::AlertStore::upsert_weather_alert`].
///
/// Unlike [`NewAlert`] this carries its own `issued_on` (the advisory start
/// time) and mandatory coordinates (the monitored locality's reference
/// point). `source` is implied: always [`AlertSource::Openweather`].
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherAlertUpsert {
  pub district:    String,
  pub headline:    String,
  pub severity:    String,
  pub description: String,
  pub lat:         f64,
  pub lon:         f64,
  pub kind:        HazardKind,
  pub issued_on:   DateTime<Utc>,
}
