//! # controllers::data
//!
//! **Data Fetch Controller** — the token list and the trade history.
//!
//! Each list lives in its own [`FetchSlot`] so the two startup requests never
//! touch each other's state.  A slot keeps "never loaded" apart from "loaded
//! and empty", and a failed fetch leaves whatever was there before.

use tracing::{info, warn};

use crate::error::ApiError;
use crate::models::{TokenSignal, TradeRecord};

// ─── FetchSlot ────────────────────────────────────────────────────────────────

/// What the view sees of one slot.
#[derive(Debug, PartialEq)]
pub enum LoadState<'a, T> {
    /// No request issued yet.
    NotLoaded,
    /// Request in flight, nothing loaded before.
    Loading,
    /// Request failed and nothing was loaded before.
    Failed(&'a ApiError),
    Loaded(&'a [T]),
}

#[derive(Debug, Clone)]
pub struct FetchSlot<T> {
    data:       Option<Vec<T>>,
    pending:    bool,
    last_error: Option<ApiError>,
}

impl<T> FetchSlot<T> {
    pub fn new() -> Self {
        Self {
            data:       None,
            pending:    false,
            last_error: None,
        }
    }

    fn begin(&mut self) {
        self.pending = true;
    }

    /// Success replaces the sequence wholesale; failure keeps the old one.
    fn resolve(&mut self, result: Result<Vec<T>, ApiError>) {
        self.pending = false;
        match result {
            Ok(items) => {
                self.data = Some(items);
                self.last_error = None;
            }
            Err(err) => self.last_error = Some(err),
        }
    }

    pub fn state(&self) -> LoadState<'_, T> {
        match (&self.data, self.pending, &self.last_error) {
            (Some(items), _, _) => LoadState::Loaded(items.as_slice()),
            (None, true, _) => LoadState::Loading,
            (None, false, Some(err)) => LoadState::Failed(err),
            (None, false, None) => LoadState::NotLoaded,
        }
    }

    /// Full stored sequence (never truncated).
    pub fn items(&self) -> Option<&[T]> {
        self.data.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }
}

impl<T> Default for FetchSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ─── DataFetchController ──────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct DataFetchController {
    tokens:      FetchSlot<TokenSignal>,
    trades:      FetchSlot<TradeRecord>,
    initialized: bool,
}

impl DataFetchController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark both slots pending.  Returns `false` (and changes nothing) if the
    /// session was already initialised — the startup fetch runs once.
    pub fn begin_initialize(&mut self) -> bool {
        if self.initialized {
            warn!("Dashboard data already initialised — ignoring repeat request");
            return false;
        }
        self.initialized = true;
        self.tokens.begin();
        self.trades.begin();
        true
    }

    /// Apply the token fetch result.  Returns the error, if any, so the
    /// caller can decide whether to surface it.
    pub fn apply_tokens(&mut self, result: Result<Vec<TokenSignal>, ApiError>) -> Option<ApiError> {
        let err = result.as_ref().err().cloned();
        match &result {
            Ok(tokens) => info!(count = tokens.len(), "📈 Token signals loaded"),
            Err(e) => warn!(error = %e, "Failed to fetch token signals"),
        }
        self.tokens.resolve(result);
        err
    }

    pub fn apply_trades(&mut self, result: Result<Vec<TradeRecord>, ApiError>) -> Option<ApiError> {
        let err = result.as_ref().err().cloned();
        match &result {
            Ok(trades) => info!(count = trades.len(), "📜 Trade history loaded"),
            Err(e) => warn!(error = %e, "Failed to fetch trade history"),
        }
        self.trades.resolve(result);
        err
    }

    pub fn tokens(&self) -> &FetchSlot<TokenSignal> {
        &self.tokens
    }

    pub fn trades(&self) -> &FetchSlot<TradeRecord> {
        &self.trades
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(symbol: &str) -> TokenSignal {
        TokenSignal {
            name:          symbol.to_uppercase(),
            symbol:        symbol.to_string(),
            current_price: Some(1.0),
            signal:        None,
        }
    }

    #[test]
    fn test_lifecycle_not_loaded_loading_loaded() {
        let mut ctl = DataFetchController::new();
        assert_eq!(ctl.tokens().state(), LoadState::NotLoaded);

        assert!(ctl.begin_initialize());
        assert_eq!(ctl.tokens().state(), LoadState::Loading);
        assert_eq!(ctl.trades().state(), LoadState::Loading);

        let tokens: Vec<_> = ["btc", "eth", "sol", "bnb", "ada", "xrp", "dot"].iter().map(|s| token(s)).collect();
        assert!(ctl.apply_tokens(Ok(tokens)).is_none());

        // Storage keeps everything; truncation is the view's job.
        assert_eq!(ctl.tokens().items().unwrap().len(), 7);
        // Trades are independent of tokens.
        assert_eq!(ctl.trades().state(), LoadState::Loading);
    }

    #[test]
    fn test_empty_is_loaded_not_loading() {
        let mut ctl = DataFetchController::new();
        ctl.begin_initialize();
        ctl.apply_trades(Ok(vec![]));
        assert!(matches!(ctl.trades().state(), LoadState::Loaded([])));
    }

    #[test]
    fn test_failure_keeps_prior_state() {
        let mut ctl = DataFetchController::new();
        ctl.begin_initialize();
        let err = ApiError::Transport("connection refused".into());
        assert_eq!(ctl.apply_tokens(Err(err.clone())), Some(err.clone()));
        assert_eq!(ctl.tokens().items(), None);
        assert_eq!(ctl.tokens().state(), LoadState::Failed(&err));
    }

    #[test]
    fn test_initialize_runs_once() {
        let mut ctl = DataFetchController::new();
        assert!(ctl.begin_initialize());
        ctl.apply_tokens(Ok(vec![token("btc")]));
        assert!(!ctl.begin_initialize());
        // A refused second start must not flip the slot back to pending.
        assert!(!ctl.tokens().is_pending());
    }
}
