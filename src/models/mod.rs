//! Domain models consumed by the dashboard controllers.

pub mod exchange;
pub mod token;
pub mod trade;

pub use exchange::{ConnectRequest, ConnectResponse, CredentialDraft, DraftField, Exchange};
pub use token::{Signal, TokenSignal};
pub use trade::{decode_history, TradeAction, TradeRecord};
