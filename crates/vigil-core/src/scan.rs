//! The risk-classifier boundary and its placeholder implementation.
//!
//! The classifier takes an opaque image payload and returns a severity/kind
//! pair; callers build and store the resulting alert themselves. Swapping
//! [`RandomRisk`] for a real model is a matter of implementing
//! [`RiskClassifier`] — no caller changes.

use std::future::Future;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::alert::HazardKind;

// ─── Severity tiers ──────────────────────────────────────────────────────────

/// Severity tier assigned by a classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeverityTier {
  Low,
  Medium,
  High,
  Critical,
}

impl SeverityTier {
  /// The capitalised wire form stored in an alert's `severity` field.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Low => "Low",
      Self::Medium => "Medium",
      Self::High => "High",
      Self::Critical => "Critical",
    }
  }
}

/// The outcome of assessing one image payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
  pub severity: SeverityTier,
  pub kind:     HazardKind,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over an image risk classifier.
///
/// The payload is opaque to the classifier contract — base64 today, but
/// nothing here decodes it. Payload presence is validated at the API
/// boundary, not here.
pub trait RiskClassifier: Send + Sync {
  fn assess<'a>(
    &'a self,
    image: &'a str,
  ) -> impl Future<Output = RiskAssessment> + Send + 'a;
}

// ─── Placeholder implementation ──────────────────────────────────────────────

/// The placeholder classifier. Draws a severity tier from a fixed partition
/// of a uniform [0,1) roll and a hazard kind uniformly from the kinds an
/// image could plausibly show. The image content is never inspected.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRisk;

const SCANNABLE_KINDS: [HazardKind; 5] = [
  HazardKind::Structural,
  HazardKind::Fire,
  HazardKind::Flood,
  HazardKind::Landslide,
  HazardKind::Other,
];

impl RiskClassifier for RandomRisk {
  async fn assess(&self, _image: &str) -> RiskAssessment {
    let mut rng = rand::thread_rng();
    let roll: f64 = rng.r#gen();

    let severity = if roll < 0.45 {
      SeverityTier::Low
    } else if roll < 0.75 {
      SeverityTier::Medium
    } else if roll < 0.92 {
      SeverityTier::High
    } else {
      SeverityTier::Critical
    };

    RiskAssessment {
      severity,
      kind: SCANNABLE_KINDS[rng.gen_range(0..SCANNABLE_KINDS.len())],
    }
  }
}
