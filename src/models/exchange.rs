//! # models::exchange
//!
//! Exchange identifiers, the in-memory [`CredentialDraft`] and the wire types
//! of `POST /api/exchange/connect`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FormError;

// ─── Exchange ─────────────────────────────────────────────────────────────────

/// Exchanges the connect form offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exchange {
    Binance,
    Mexc,
    Kucoin,
    Bybit,
    Gateio,
}

impl Exchange {
    pub const ALL: [Exchange; 5] = [
        Exchange::Binance,
        Exchange::Mexc,
        Exchange::Kucoin,
        Exchange::Bybit,
        Exchange::Gateio,
    ];

    /// Form value, as sent to the backend.
    pub fn id(&self) -> &'static str {
        match self {
            Exchange::Binance => "binance",
            Exchange::Mexc => "mexc",
            Exchange::Kucoin => "kucoin",
            Exchange::Bybit => "bybit",
            Exchange::Gateio => "gateio",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Exchange::Binance => "Binance",
            Exchange::Mexc => "MeXC",
            Exchange::Kucoin => "KuCoin",
            Exchange::Bybit => "Bybit",
            Exchange::Gateio => "Gate.io",
        }
    }
}

impl std::str::FromStr for Exchange {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Exchange::ALL
            .into_iter()
            .find(|e| e.id() == s)
            .ok_or_else(|| FormError::UnsupportedExchange(s.to_string()))
    }
}

// ─── Draft fields ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Exchange,
    ApiKey,
    SecretKey,
}

impl std::str::FromStr for DraftField {
    type Err = FormError;

    /// Accepts the form's input names and their snake_case spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exchange" => Ok(DraftField::Exchange),
            "apiKey" | "api_key" => Ok(DraftField::ApiKey),
            "secretKey" | "secret_key" => Ok(DraftField::SecretKey),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

// ─── CredentialDraft ──────────────────────────────────────────────────────────

/// Unsaved exchange credentials as typed by the user.
///
/// Values are stored verbatim; nothing is checked until
/// [`CredentialDraft::validate`].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialDraft {
    /// Raw `<select>` value; empty means "Pilih Exchange" is still selected.
    pub exchange: String,
    pub api_key: String,
    pub secret_key: String,
}

impl CredentialDraft {
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Exchange => self.exchange = value,
            DraftField::ApiKey => self.api_key = value,
            DraftField::SecretKey => self.secret_key = value,
        }
    }

    /// Required-field check.  No key format or strength rules apply.
    pub fn validate(&self) -> Result<ConnectRequest, FormError> {
        if self.exchange.is_empty() {
            return Err(FormError::ExchangeNotSelected);
        }
        let exchange: Exchange = self.exchange.parse()?;
        if self.api_key.trim().is_empty() {
            return Err(FormError::MissingApiKey);
        }
        if self.secret_key.trim().is_empty() {
            return Err(FormError::MissingSecretKey);
        }
        Ok(ConnectRequest {
            exchange,
            api_key: self.api_key.clone(),
            secret_key: self.secret_key.clone(),
        })
    }
}

// Keys must never reach a log line.
impl std::fmt::Debug for CredentialDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialDraft")
            .field("exchange", &self.exchange)
            .field("api_key", &redact(&self.api_key))
            .field("secret_key", &redact(&self.secret_key))
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() { "<empty>" } else { "<redacted>" }
}

// ─── Wire types ───────────────────────────────────────────────────────────────

/// Body of `POST /api/exchange/connect`.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectRequest {
    pub exchange: Exchange,
    pub api_key: String,
    pub secret_key: String,
}

impl std::fmt::Debug for ConnectRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectRequest")
            .field("exchange", &self.exchange)
            .finish_non_exhaustive()
    }
}

/// Reply of the connect endpoint.  Only `status` is consulted, and it may be
/// any JSON value: only the string `"success"` counts.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConnectResponse {
    #[serde(default)]
    pub status: Option<Value>,
}

impl ConnectResponse {
    /// Any JSON body is a reply.  Non-objects simply carry no status.
    pub fn from_body(body: &Value) -> Self {
        Self {
            status: body.get("status").filter(|v| !v.is_null()).cloned(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.as_ref().and_then(Value::as_str) == Some("success")
    }

    /// Status as text, for logs and the rejected outcome.
    pub fn status_text(&self) -> Option<String> {
        self.status.as_ref().map(|v| match v.as_str() {
            Some(s) => s.to_string(),
            None => v.to_string(),
        })
    }
}
