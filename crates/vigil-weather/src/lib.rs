//! Weather-feed reconciliation for Vigil.
//!
//! Periodically pulls hazard advisories for each monitored locality from
//! the OpenWeather One Call feed and merges them into the alert store
//! without duplication. A failing locality never aborts the pass; failures
//! are logged and retried at the next scheduled tick.

pub mod feed;

mod reconcile;

pub use feed::{Advisory, FeedError, OneCallClient, WeatherFeed};
pub use reconcile::{DEFAULT_POLL_INTERVAL, Reconciler, classify};
