//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{TimeZone, Utc};
use vigil_core::{
  alert::{AlertSource, HazardKind, NO_DESCRIPTION, NewAlert, WeatherAlertUpsert},
  sos::NewSos,
  store::{AlertStore, SosStore},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn manual(district: &str, headline: &str) -> NewAlert {
  NewAlert::manual(
    district.into(),
    headline.into(),
    "High".into(),
    None,
    None,
    None,
    None,
  )
}

fn weather(headline: &str, district: &str) -> WeatherAlertUpsert {
  WeatherAlertUpsert {
    district:    district.into(),
    headline:    headline.into(),
    severity:    "General".into(),
    description: "No description".into(),
    lat:         28.7041,
    lon:         77.1025,
    kind:        HazardKind::Flood,
    issued_on:   Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap(),
  }
}

// ─── Alerts ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_list_alert() {
  let s = store().await;

  let inserted = s.insert_alert(manual("Delhi", "Heavy Rain")).await.unwrap();
  assert_eq!(inserted.source, AlertSource::Manual);
  assert_eq!(inserted.description, NO_DESCRIPTION);
  assert_eq!(inserted.kind, HazardKind::Default);

  let all = s.list_alerts().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].alert_id, inserted.alert_id);
  assert_eq!(all[0].headline, "Heavy Rain");
  assert_eq!(all[0].issued_on, inserted.issued_on);
}

#[tokio::test]
async fn list_alerts_keeps_insertion_order() {
  let s = store().await;
  s.insert_alert(manual("Delhi", "first")).await.unwrap();
  s.insert_alert(manual("Mumbai", "second")).await.unwrap();
  s.insert_alert(manual("Pune", "third")).await.unwrap();

  let headlines: Vec<String> = s
    .list_alerts()
    .await
    .unwrap()
    .into_iter()
    .map(|a| a.headline)
    .collect();
  assert_eq!(headlines, ["first", "second", "third"]);
}

#[tokio::test]
async fn alert_coordinates_survive_a_round_trip() {
  let s = store().await;
  let new = NewAlert::manual(
    "Delhi".into(),
    "Heavy Rain".into(),
    "High".into(),
    Some("waterlogging near the station".into()),
    Some(28.7041),
    Some(77.1025),
    Some(HazardKind::Flood),
  );
  s.insert_alert(new).await.unwrap();

  let stored = &s.list_alerts().await.unwrap()[0];
  assert_eq!(stored.lat, Some(28.7041));
  assert_eq!(stored.lon, Some(77.1025));
  assert_eq!(stored.kind, HazardKind::Flood);
  assert_eq!(stored.description, "waterlogging near the station");
}

// ─── Weather upsert ──────────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_twice_with_identical_input_stores_one_row() {
  let s = store().await;

  let first = s
    .upsert_weather_alert(weather("Flood Warning", "Delhi"))
    .await
    .unwrap();
  let second = s
    .upsert_weather_alert(weather("Flood Warning", "Delhi"))
    .await
    .unwrap();

  assert_eq!(first.alert_id, second.alert_id);

  let all = s.list_alerts().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].source, AlertSource::Openweather);
}

#[tokio::test]
async fn upsert_overwrites_payload_in_place() {
  let s = store().await;
  let first = s
    .upsert_weather_alert(weather("Flood Warning", "Delhi"))
    .await
    .unwrap();

  let mut renewed = weather("Flood Warning", "Delhi");
  renewed.severity = "Warning, Urgent".into();
  renewed.issued_on = Utc.with_ymd_and_hms(2024, 7, 2, 6, 0, 0).unwrap();
  s.upsert_weather_alert(renewed.clone()).await.unwrap();

  let all = s.list_alerts().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].alert_id, first.alert_id);
  assert_eq!(all[0].severity, "Warning, Urgent");
  assert_eq!(all[0].issued_on, renewed.issued_on);
}

#[tokio::test]
async fn upsert_treats_distinct_events_and_districts_as_separate() {
  let s = store().await;
  s.upsert_weather_alert(weather("Flood Warning", "Delhi"))
    .await
    .unwrap();
  s.upsert_weather_alert(weather("Flood Warning", "Mumbai"))
    .await
    .unwrap();
  s.upsert_weather_alert(weather("Severe Storm", "Delhi"))
    .await
    .unwrap();

  assert_eq!(s.list_alerts().await.unwrap().len(), 3);
}

#[tokio::test]
async fn upsert_never_collides_with_manual_rows() {
  let s = store().await;
  s.insert_alert(manual("Delhi", "Flood Warning")).await.unwrap();
  s.upsert_weather_alert(weather("Flood Warning", "Delhi"))
    .await
    .unwrap();
  // Re-run: still exactly one weather row next to the manual one.
  s.upsert_weather_alert(weather("Flood Warning", "Delhi"))
    .await
    .unwrap();

  let all = s.list_alerts().await.unwrap();
  assert_eq!(all.len(), 2);
  let weather_rows = all
    .iter()
    .filter(|a| a.source == AlertSource::Openweather)
    .count();
  assert_eq!(weather_rows, 1);
}

// ─── SOS ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_list_sos_in_natural_order() {
  let s = store().await;

  for (id, msg) in [("relay-1", "trapped"), ("relay-2", "need water")] {
    s.insert_sos(NewSos {
      sender_id: id.into(),
      msg:       msg.into(),
      lat:       Some(19.076),
      lon:       Some(72.8777),
    })
    .await
    .unwrap();
  }

  let all = s.list_sos().await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[0].sender_id, "relay-1");
  assert_eq!(all[1].sender_id, "relay-2");
  assert_eq!(all[0].lat, Some(19.076));
}

#[tokio::test]
async fn sos_without_coordinates_round_trips_as_none() {
  let s = store().await;
  s.insert_sos(NewSos {
    sender_id: "relay-3".into(),
    msg:       "low battery".into(),
    lat:       None,
    lon:       None,
  })
  .await
  .unwrap();

  let all = s.list_sos().await.unwrap();
  assert_eq!(all[0].lat, None);
  assert_eq!(all[0].lon, None);
}
