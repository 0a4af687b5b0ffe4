//! Great-circle distance and the radius filter applied to alert and SOS
//! queries.
//!
//! Filtering is strictly opt-in: a query activates it only when origin
//! latitude, longitude, and radius are all present and parse as finite
//! numbers. Malformed numeric input means "no filter requested", not an
//! error.

use crate::{alert::Alert, sos::SosRecord};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine great-circle distance in kilometres between two points given
/// in degrees. Symmetric; zero for identical points.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
  let d_lat = (lat2 - lat1).to_radians();
  let d_lon = (lon2 - lon1).to_radians();

  let a = (d_lat / 2.0).sin().powi(2)
    + lat1.to_radians().cos()
      * lat2.to_radians().cos()
      * (d_lon / 2.0).sin().powi(2);

  2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

// ─── Geotagged ───────────────────────────────────────────────────────────────

/// A record that optionally carries a coordinate pair.
pub trait Geotagged {
  /// `(lat, lon)` when both components are present.
  fn coords(&self) -> Option<(f64, f64)>;
}

impl Geotagged for Alert {
  fn coords(&self) -> Option<(f64, f64)> { self.lat.zip(self.lon) }
}

impl Geotagged for SosRecord {
  fn coords(&self) -> Option<(f64, f64)> { self.lat.zip(self.lon) }
}

// ─── RadiusFilter ────────────────────────────────────────────────────────────

/// An origin point and an inclusive radius in kilometres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusFilter {
  pub lat:       f64,
  pub lon:       f64,
  pub radius_km: f64,
}

impl RadiusFilter {
  /// Build a filter from raw query parameters.
  ///
  /// Returns `None` unless all three parameters are present and parse as
  /// finite floats — in which case the caller applies no filtering at all.
  pub fn from_query(
    lat: Option<&str>,
    lon: Option<&str>,
    radius: Option<&str>,
  ) -> Option<Self> {
    Some(Self {
      lat:       parse_finite(lat?)?,
      lon:       parse_finite(lon?)?,
      radius_km: parse_finite(radius?)?,
    })
  }

  /// Whether a record passes: it must carry both coordinates and lie within
  /// `radius_km` (inclusive) of the origin. Records without coordinates
  /// never pass an active filter.
  pub fn contains(&self, record: &impl Geotagged) -> bool {
    match record.coords() {
      Some((lat, lon)) => {
        haversine_km(self.lat, self.lon, lat, lon) <= self.radius_km
      }
      None => false,
    }
  }
}

/// Apply an optional filter. `None` returns the records untouched.
pub fn within_radius<T: Geotagged>(
  filter: Option<&RadiusFilter>,
  records: Vec<T>,
) -> Vec<T> {
  match filter {
    Some(f) => records.into_iter().filter(|r| f.contains(r)).collect(),
    None => records,
  }
}

fn parse_finite(s: &str) -> Option<f64> {
  s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
