//! # models::token
//!
//! [`TokenSignal`] — one card in the manual-mode grid, as served by
//! `GET /api/tokens/manual`.

use serde::{Deserialize, Serialize};

/// A per-asset recommendation with pricing context.
///
/// The signal is kept as the raw string the backend sent so that values the
/// dashboard does not know about survive untouched; see [`Signal`] for the
/// interpreted form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSignal {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub symbol: String,

    /// Last known price.  `None` when the backend has no quote.
    #[serde(default)]
    pub current_price: Option<f64>,

    /// `"BUY"`, `"SELL"`, `"HOLD"` — or anything else, or nothing.
    #[serde(default)]
    pub signal: Option<String>,
}

impl TokenSignal {
    #[inline]
    pub fn signal(&self) -> Signal {
        Signal::from_raw(self.signal.as_deref())
    }

    /// Text shown in the card; an absent signal reads as `HOLD`.
    pub fn signal_label(&self) -> &str {
        match self.signal.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => "HOLD",
        }
    }
}

/// Interpreted trading signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
    /// Anything the backend sent that is not one of the three above.
    Unrecognized(String),
}

impl Signal {
    /// Exact-match interpretation; a missing value is [`Signal::Hold`].
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => Signal::Hold,
            Some("BUY") => Signal::Buy,
            Some("SELL") => Signal::Sell,
            Some("HOLD") => Signal::Hold,
            Some(other) => Signal::Unrecognized(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let token: TokenSignal = serde_json::from_str(r#"{"name":"Bitcoin","symbol":"btc"}"#).unwrap();
        assert_eq!(token.current_price, None);
        assert_eq!(token.signal(), Signal::Hold);
        assert_eq!(token.signal_label(), "HOLD");
    }

    #[test]
    fn test_unknown_signal_is_preserved() {
        let token: TokenSignal = serde_json::from_str(
            r#"{"name":"Pepe","symbol":"pepe","current_price":0.0000012,"signal":"STRONG_BUY"}"#,
        )
        .unwrap();
        assert_eq!(token.signal(), Signal::Unrecognized("STRONG_BUY".into()));
        assert_eq!(token.signal_label(), "STRONG_BUY");
    }

    #[test]
    fn test_signal_match_is_case_sensitive() {
        assert_eq!(Signal::from_raw(Some("BUY")), Signal::Buy);
        assert_eq!(Signal::from_raw(Some("buy")), Signal::Unrecognized("buy".into()));
        assert_eq!(Signal::from_raw(None), Signal::Hold);
    }
}
