//! # Aresa Dashboard — manual trading dashboard controller
//!
//! Client-side state for the Aresa manual trading page: token signals, trade
//! history, the exchange connect form, toast notifications and the EN/ID
//! label table.
//!
//! ```text
//!  user action ──▶ Dashboard ──spawn──▶ DashboardApi (HTTP / demo)
//!                    │   ▲                    │
//!                    │   └── DashboardEvent ◀─┘   (fetch / connect / toast timer)
//!                    ▼
//!               view::compose ──▶ DashboardView ──▶ render_text
//! ```

pub mod api;
pub mod config;
pub mod console;
pub mod controllers;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod i18n;
pub mod models;
pub mod view;

pub use config::Config;
pub use dashboard::Dashboard;
