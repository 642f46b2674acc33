//! # models::trade
//!
//! [`TradeRecord`] — one executed order from `GET /api/trade/history`.
//!
//! The history endpoint is loose about types: timestamps come either as epoch
//! milliseconds or as ISO-8601 strings, and prices are sometimes quoted as
//! strings.  Both are normalised while deserialising so the rest of the
//! dashboard only ever sees `DateTime<Utc>` and `f64`.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

// ─── TradeAction ──────────────────────────────────────────────────────────────

/// Order side as reported by the backend.  Values other than `BUY` / `SELL`
/// are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TradeAction {
    Buy,
    Sell,
    Other(String),
}

impl TradeAction {
    pub fn as_str(&self) -> &str {
        match self {
            TradeAction::Buy => "BUY",
            TradeAction::Sell => "SELL",
            TradeAction::Other(raw) => raw,
        }
    }

    /// Only an exact `BUY` is a buy.
    pub fn is_buy(&self) -> bool {
        matches!(self, TradeAction::Buy)
    }
}

impl From<String> for TradeAction {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "BUY" => TradeAction::Buy,
            "SELL" => TradeAction::Sell,
            _ => TradeAction::Other(raw),
        }
    }
}

impl From<TradeAction> for String {
    fn from(action: TradeAction) -> Self {
        match action {
            TradeAction::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for TradeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

// ─── TradeRecord ──────────────────────────────────────────────────────────────

/// Historical executed-order entry.  Read-only from the dashboard's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    #[serde(deserialize_with = "de_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub action: TradeAction,
    pub symbol: String,
    #[serde(deserialize_with = "de_decimal")]
    pub quantity: f64,
    #[serde(deserialize_with = "de_decimal")]
    pub price: f64,
}

/// Decode a history payload entry by entry.  Entries that do not form a
/// record are skipped so one bad row never hides the rest.
pub fn decode_history(entries: Vec<Value>) -> Vec<TradeRecord> {
    let total = entries.len();
    let records: Vec<TradeRecord> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(index, error = %e, "Skipping unreadable trade history entry");
                None
            }
        })
        .collect();
    if records.len() < total {
        warn!(kept = records.len(), total, "Trade history partially decoded");
    }
    records
}

// ─── Lenient decoders ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDecimal {
    Number(f64),
    Text(String),
}

fn de_decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawDecimal::deserialize(deserializer)? {
        RawDecimal::Number(n) => Ok(n),
        RawDecimal::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("not a decimal: '{s}'"))),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    FractionalMillis(f64),
    Text(String),
}

fn de_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Millis(ms) => Utc.timestamp_millis_opt(ms).single(),
        RawTimestamp::FractionalMillis(ms) => Utc.timestamp_millis_opt(ms as i64).single(),
        RawTimestamp::Text(s) => parse_timestamp_text(&s),
    };
    parsed.ok_or_else(|| serde::de::Error::custom("unrecognised trade timestamp"))
}

/// RFC 3339 first; an offset-less date-time is read as viewer-local time,
/// the same way a browser `Date` reads it.
fn parse_timestamp_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_timestamp_and_numeric_price() {
        let rec: TradeRecord = serde_json::from_str(
            r#"{"timestamp":"2025-03-01T10:15:00Z","action":"BUY","symbol":"BTC","quantity":0.5,"price":67000}"#,
        )
        .unwrap();
        assert_eq!(rec.timestamp, Utc.with_ymd_and_hms(2025, 3, 1, 10, 15, 0).unwrap());
        assert_eq!(rec.action, TradeAction::Buy);
        assert_eq!(rec.price, 67000.0);
    }

    #[test]
    fn test_epoch_millis_and_string_price() {
        let rec: TradeRecord = serde_json::from_str(
            r#"{"timestamp":1740823200000,"action":"SELL","symbol":"ETH","quantity":"2","price":"3150.25"}"#,
        )
        .unwrap();
        assert_eq!(rec.timestamp.timestamp_millis(), 1_740_823_200_000);
        assert_eq!(rec.action, TradeAction::Sell);
        assert_eq!(rec.quantity, 2.0);
        assert_eq!(rec.price, 3150.25);
    }

    #[test]
    fn test_offset_timestamp_is_normalised_to_utc() {
        let rec: TradeRecord = serde_json::from_str(
            r#"{"timestamp":"2025-03-01T17:15:00+07:00","action":"BUY","symbol":"SOL","quantity":1,"price":140}"#,
        )
        .unwrap();
        assert_eq!(rec.timestamp, Utc.with_ymd_and_hms(2025, 3, 1, 10, 15, 0).unwrap());
    }

    #[test]
    fn test_garbage_price_is_rejected() {
        let res: Result<TradeRecord, _> = serde_json::from_str(
            r#"{"timestamp":0,"action":"BUY","symbol":"X","quantity":1,"price":"cheap"}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_unknown_action_is_kept_verbatim() {
        let rec: TradeRecord = serde_json::from_str(
            r#"{"timestamp":0,"action":"buy","symbol":"BTC","quantity":1,"price":1}"#,
        )
        .unwrap();
        assert_eq!(rec.action, TradeAction::Other("buy".into()));
        assert!(!rec.action.is_buy());
        assert_eq!(rec.action.to_string(), "buy");
    }

    #[test]
    fn test_mixed_history_keeps_every_readable_row() {
        let entries: Vec<Value> = serde_json::from_str(
            r#"[
                {"timestamp":"2025-03-01T10:15:00Z","action":"BUY","symbol":"BTC","quantity":0.5,"price":67000},
                {"timestamp":"2025-03-01T11:00:00Z","action":"buy","symbol":"ETH","quantity":1,"price":"3150"},
                {"timestamp":"2025-03-01T12:00:00Z","action":"SELL","symbol":"SOL","quantity":3},
                {"timestamp":1740823200000,"action":"CLOSE","symbol":"ADA","quantity":10,"price":0.7}
            ]"#,
        )
        .unwrap();
        let records = decode_history(entries);
        let symbols: Vec<_> = records.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, ["BTC", "ETH", "ADA"]);
        assert_eq!(records[0].action, TradeAction::Buy);
        assert_eq!(records[2].action, TradeAction::Other("CLOSE".into()));
    }
}
