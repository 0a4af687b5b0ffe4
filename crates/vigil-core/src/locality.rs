//! Monitored localities — the fixed reference points the weather reconciler
//! polls advisories for. Static configuration, not persisted state.

use serde::{Deserialize, Serialize};

/// A locality name and its reference coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoredLocality {
  pub name: String,
  pub lat:  f64,
  pub lon:  f64,
}

impl MonitoredLocality {
  pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
    Self { name: name.into(), lat, lon }
  }
}

/// The default monitored table: major Indian metros.
pub fn default_localities() -> Vec<MonitoredLocality> {
  vec![
    MonitoredLocality::new("Delhi", 28.7041, 77.1025),
    MonitoredLocality::new("Mumbai", 19.076, 72.8777),
    MonitoredLocality::new("Chennai", 13.0827, 80.2707),
    MonitoredLocality::new("Kolkata", 22.5726, 88.3639),
    MonitoredLocality::new("Bengaluru", 12.9716, 77.5946),
    MonitoredLocality::new("Hyderabad", 17.385, 78.4867),
    MonitoredLocality::new("Ahmedabad", 23.0225, 72.5714),
    MonitoredLocality::new("Pune", 18.5204, 73.8567),
    MonitoredLocality::new("Jaipur", 26.9124, 75.7873),
    MonitoredLocality::new("Lucknow", 26.8467, 80.9462),
  ]
}
