//! Controllers, one per slice of dashboard state.  Each owns its state
//! exclusively; the [`crate::dashboard::Dashboard`] composes them.

pub mod connect;
pub mod data;
pub mod notification;

pub use connect::{ConnectFormController, ConnectOutcome};
pub use data::{DataFetchController, FetchSlot, LoadState};
pub use notification::{Notification, NotificationController, NotificationState, Severity, NOTIFICATION_TTL};
