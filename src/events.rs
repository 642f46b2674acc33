//! # events
//!
//! [`DashboardEvent`] — every asynchronous completion that flows back into
//! the dashboard.  Spawned fetch / connect / timer tasks never touch
//! controller state themselves; they send one of these over the dashboard's
//! channel and the single owner applies it.

use crate::error::ApiError;
use crate::models::{ConnectResponse, TokenSignal, TradeRecord};

#[derive(Debug)]
pub enum DashboardEvent {
    /// `GET /api/tokens/manual` finished.
    TokensFetched(Result<Vec<TokenSignal>, ApiError>),

    /// `GET /api/trade/history` finished.
    HistoryFetched(Result<Vec<TradeRecord>, ApiError>),

    /// `POST /api/exchange/connect` finished.
    ConnectFinished(Result<ConnectResponse, ApiError>),

    /// Dismiss timer for the toast of `generation` fired.
    NotificationExpired { generation: u64 },
}

impl DashboardEvent {
    /// Short tag for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            DashboardEvent::TokensFetched(_) => "TOKENS_FETCHED",
            DashboardEvent::HistoryFetched(_) => "HISTORY_FETCHED",
            DashboardEvent::ConnectFinished(_) => "CONNECT_FINISHED",
            DashboardEvent::NotificationExpired { .. } => "NOTIFICATION_EXPIRED",
        }
    }
}
