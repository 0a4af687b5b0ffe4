//! SQL schema for the Vigil SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS alerts (
    alert_id    TEXT PRIMARY KEY,
    district    TEXT NOT NULL,
    headline    TEXT NOT NULL,   -- wire name: 'alert'
    severity    TEXT NOT NULL,
    description TEXT NOT NULL,
    lat         REAL,
    lon         REAL,
    kind        TEXT NOT NULL DEFAULT 'default',
    issued_on   TEXT NOT NULL,   -- ISO 8601 UTC
    source      TEXT NOT NULL    -- 'manual' | 'ai-scan' | 'openweather'
);

-- Natural key for feed reconciliation: at most one openweather row per
-- (headline, district). Partial, so manual and ai-scan rows may repeat
-- the same headline/district freely.
CREATE UNIQUE INDEX IF NOT EXISTS alerts_weather_key
    ON alerts(headline, district, source) WHERE source = 'openweather';

CREATE INDEX IF NOT EXISTS alerts_issued_idx ON alerts(issued_on);

-- SOS records are written once on relay ingestion, never updated.
CREATE TABLE IF NOT EXISTS sos_records (
    sos_id    TEXT PRIMARY KEY,
    sender_id TEXT NOT NULL,
    msg       TEXT NOT NULL,
    lat       REAL,
    lon       REAL,
    timestamp TEXT NOT NULL      -- ISO 8601 UTC; server-assigned
);

PRAGMA user_version = 1;
";
