//! # api — Backend endpoints
//!
//! [`DashboardApi`] is the seam between the controllers and the backend.
//!
//! ## Implementations
//! 1. [`HttpDashboardApi`] — real backend over HTTP (reqwest), used when
//!    `ARESA_API_URL` is set
//! 2. [`DemoApi`] — canned data for running the dashboard without a backend

use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tracing::debug;

use crate::error::ApiError;
use crate::models::{decode_history, ConnectRequest, ConnectResponse, TokenSignal, TradeAction, TradeRecord};

pub const TOKENS_PATH: &str = "/api/tokens/manual";
pub const HISTORY_PATH: &str = "/api/trade/history";
pub const CONNECT_PATH: &str = "/api/exchange/connect";

/// The three endpoints the dashboard consumes.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// `GET /api/tokens/manual`
    async fn fetch_tokens(&self) -> Result<Vec<TokenSignal>, ApiError>;

    /// `GET /api/trade/history`
    async fn fetch_trade_history(&self) -> Result<Vec<TradeRecord>, ApiError>;

    /// `POST /api/exchange/connect`
    async fn connect_exchange(&self, request: &ConnectRequest) -> Result<ConnectResponse, ApiError>;
}

// ─── HTTP ─────────────────────────────────────────────────────────────────────

pub struct HttpDashboardApi {
    client:   reqwest::Client,
    base_url: String,
    timeout:  Duration,
}

impl HttpDashboardApi {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn fetch_tokens(&self) -> Result<Vec<TokenSignal>, ApiError> {
        let url = self.url(TOKENS_PATH);
        debug!(url = %url, "Fetching manual token signals");

        let tokens = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?
            .json::<Vec<TokenSignal>>()
            .await?;

        Ok(tokens)
    }

    async fn fetch_trade_history(&self) -> Result<Vec<TradeRecord>, ApiError> {
        let url = self.url(HISTORY_PATH);
        debug!(url = %url, "Fetching trade history");

        let entries = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?
            .json::<Vec<serde_json::Value>>()
            .await?;

        Ok(decode_history(entries))
    }

    async fn connect_exchange(&self, request: &ConnectRequest) -> Result<ConnectResponse, ApiError> {
        let url = self.url(CONNECT_PATH);
        debug!(url = %url, exchange = request.exchange.id(), "Posting exchange connect");

        // The HTTP status is not consulted: the body's `status` field decides.
        // Any JSON body is a reply; only a non-JSON body is a failure.
        let resp = self
            .client
            .post(&url)
            .json(request)
            .timeout(self.timeout)
            .send()
            .await?;

        debug!(http_status = %resp.status(), "Connect endpoint replied");

        let body = resp.json::<serde_json::Value>().await?;
        Ok(ConnectResponse::from_body(&body))
    }
}

// ─── Demo ─────────────────────────────────────────────────────────────────────

/// Offline backend with fixed data (for dev without a server).
pub struct DemoApi {
    latency: Duration,
}

impl DemoApi {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for DemoApi {
    fn default() -> Self {
        Self::new(Duration::from_millis(200))
    }
}

#[async_trait]
impl DashboardApi for DemoApi {
    async fn fetch_tokens(&self) -> Result<Vec<TokenSignal>, ApiError> {
        tokio::time::sleep(self.latency).await;
        Ok(demo_tokens())
    }

    async fn fetch_trade_history(&self) -> Result<Vec<TradeRecord>, ApiError> {
        tokio::time::sleep(self.latency).await;
        Ok(demo_history())
    }

    async fn connect_exchange(&self, _request: &ConnectRequest) -> Result<ConnectResponse, ApiError> {
        tokio::time::sleep(self.latency).await;
        Ok(ConnectResponse { status: Some("success".into()) })
    }
}

fn token(name: &str, symbol: &str, price: Option<f64>, signal: Option<&str>) -> TokenSignal {
    TokenSignal {
        name:          name.to_string(),
        symbol:        symbol.to_string(),
        current_price: price,
        signal:        signal.map(str::to_string),
    }
}

fn demo_tokens() -> Vec<TokenSignal> {
    vec![
        token("Bitcoin", "btc", Some(67_012.5), Some("BUY")),
        token("Ethereum", "eth", Some(3_150.25), Some("HOLD")),
        token("Solana", "sol", Some(142.8), Some("SELL")),
        token("BNB", "bnb", Some(590.0), None),
        token("Dogecoin", "doge", Some(0.1523), Some("BUY")),
        token("Cardano", "ada", None, Some("HOLD")),
        token("Ripple", "xrp", Some(0.52), Some("SELL")),
    ]
}

fn demo_history() -> Vec<TradeRecord> {
    let at = |h, m| Utc.with_ymd_and_hms(2025, 3, 1, h, m, 0).single().unwrap_or_default();
    vec![
        TradeRecord {
            timestamp: at(9, 30),
            action:    TradeAction::Buy,
            symbol:    "BTC".into(),
            quantity:  0.05,
            price:     66_850.0,
        },
        TradeRecord {
            timestamp: at(13, 5),
            action:    TradeAction::Sell,
            symbol:    "SOL".into(),
            quantity:  12.0,
            price:     145.1,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use crate::controllers::{ConnectFormController, ConnectOutcome};

    /// What the one-shot server saw.
    struct Received {
        head: String,
        body: String,
    }

    /// Serve a single HTTP exchange on a random local port.  Returns the base
    /// URL and a handle yielding the request that came in.
    async fn serve_once(status_line: &'static str, reply: &'static str) -> (String, JoinHandle<Received>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];

            let header_end = loop {
                let n = stream.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before headers");
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };
            let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
            let content_length = head
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            while buf.len() < header_end + content_length {
                let n = stream.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed mid-body");
                buf.extend_from_slice(&chunk[..n]);
            }
            let body = String::from_utf8_lossy(&buf[header_end..header_end + content_length]).to_string();

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{reply}",
                reply.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;

            Received { head, body }
        });

        (base_url, handle)
    }

    fn http(base_url: &str) -> HttpDashboardApi {
        HttpDashboardApi::new(reqwest::Client::new(), base_url, Duration::from_secs(5))
    }

    fn request() -> ConnectRequest {
        ConnectRequest {
            exchange:   crate::models::Exchange::Mexc,
            api_key:    "ak-123".into(),
            secret_key: "sk-456".into(),
        }
    }

    #[tokio::test]
    async fn test_connect_posts_camel_case_body_and_ignores_http_status() {
        let (base_url, server) = serve_once("500 Internal Server Error", r#"{"status":"success"}"#).await;

        let resp = http(&base_url).connect_exchange(&request()).await.unwrap();
        assert!(resp.is_success());

        let received = server.await.unwrap();
        assert!(received.head.starts_with("POST /api/exchange/connect "), "{}", received.head);
        let sent: serde_json::Value = serde_json::from_str(&received.body).unwrap();
        assert_eq!(
            sent,
            serde_json::json!({ "exchange": "mexc", "apiKey": "ak-123", "secretKey": "sk-456" })
        );
    }

    #[tokio::test]
    async fn test_connect_non_string_status_is_a_rejection() {
        let (base_url, server) = serve_once("200 OK", r#"{"status":false}"#).await;

        let result = http(&base_url).connect_exchange(&request()).await;
        server.await.unwrap();

        let mut form = ConnectFormController::new(false);
        assert!(matches!(form.finish(result), ConnectOutcome::Rejected { .. }));
    }

    #[tokio::test]
    async fn test_connect_non_json_body_is_unreachable() {
        let (base_url, server) = serve_once("502 Bad Gateway", "<html>bad gateway</html>").await;

        let result = http(&base_url).connect_exchange(&request()).await;
        server.await.unwrap();
        assert!(matches!(result, Err(ApiError::Decode(_))), "{result:?}");

        let mut form = ConnectFormController::new(false);
        assert!(matches!(form.finish(result), ConnectOutcome::Unreachable(_)));
    }

    #[tokio::test]
    async fn test_non_json_token_body_is_a_decode_error() {
        let (base_url, server) = serve_once("200 OK", "not json").await;

        let result = http(&base_url).fetch_tokens().await;
        let received = server.await.unwrap();
        assert!(received.head.starts_with("GET /api/tokens/manual "), "{}", received.head);
        assert!(matches!(result, Err(ApiError::Decode(_))), "{result:?}");
    }

    #[tokio::test]
    async fn test_history_skips_unreadable_entries() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"[{"timestamp":0,"action":"BUY","symbol":"BTC","quantity":1,"price":2},{"action":"SELL"},{"timestamp":0,"action":"buy","symbol":"ETH","quantity":1,"price":"3"}]"#,
        )
        .await;

        let history = http(&base_url).fetch_trade_history().await.unwrap();
        server.await.unwrap();
        let symbols: Vec<_> = history.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(symbols, ["BTC", "ETH"]);
    }

    #[tokio::test]
    async fn test_history_body_that_is_not_a_list_is_a_decode_error() {
        let (base_url, server) = serve_once("200 OK", r#"{"error":"db down"}"#).await;

        let result = http(&base_url).fetch_trade_history().await;
        server.await.unwrap();
        assert!(matches!(result, Err(ApiError::Decode(_))), "{result:?}");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let api = HttpDashboardApi::new(reqwest::Client::new(), "http://localhost:5000/", Duration::from_secs(1));
        assert_eq!(api.url(TOKENS_PATH), "http://localhost:5000/api/tokens/manual");
    }

    #[tokio::test(start_paused = true)]
    async fn test_demo_backend_serves_more_than_one_page_of_tokens() {
        let api = DemoApi::default();
        assert!(api.fetch_tokens().await.unwrap().len() > 5);
        assert!(!api.fetch_trade_history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_transport_error() {
        // Port 9 (discard) on localhost is closed in any sane test environment.
        let api = HttpDashboardApi::new(reqwest::Client::new(), "http://127.0.0.1:9", Duration::from_secs(2));
        match api.fetch_tokens().await {
            Err(ApiError::Transport(_)) => {}
            other => panic!("expected transport error, got {other:?}"),
        }
    }
}
