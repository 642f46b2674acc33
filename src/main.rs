//! # Aresa Dashboard — console host
//!
//! ## Environment Variables
//!
//! | Variable                       | Default        | Description                          |
//! |--------------------------------|----------------|--------------------------------------|
//! | `ARESA_API_URL`                | *(demo data)*  | Backend base URL                     |
//! | `ARESA_LANG`                   | `en`           | Initial language (`en` / `id`)       |
//! | `ARESA_HTTP_TIMEOUT_SECS`      | `10`           | Per-request timeout                  |
//! | `ARESA_NOTIFY_FETCH_ERRORS`    | `true`         | Toast when a startup fetch fails     |
//! | `ARESA_CLEAR_DRAFT_ON_SUCCESS` | `false`        | Reset the form after a good connect  |
//! | `RUST_LOG`                     | —              | Tracing filter                       |

use std::sync::Arc;

use anyhow::Context;
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use aresa_dashboard::api::{DashboardApi, DemoApi, HttpDashboardApi};
use aresa_dashboard::{console, Config, Dashboard};

// ─── Entry Point ──────────────────────────────────────────────────────────────

// One thread: every controller update happens on the same execution context.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // ── 1. Load .env (optional) ──────────────────────────────────────────────
    dotenvy::dotenv().ok();

    // ── 2. Structured logging (stderr, so it never mixes with the page) ──────
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env()
            .add_directive("aresa_dashboard=debug".parse()?)
            .add_directive("reqwest=warn".parse()?))
        .init();

    let config = Config::from_env().context("Failed to load config")?;

    // ── 3. Backend ───────────────────────────────────────────────────────────
    let api: Arc<dyn DashboardApi> = match &config.api_url {
        Some(url) => {
            info!(backend = %url, timeout = ?config.http_timeout, "Using HTTP backend");
            Arc::new(HttpDashboardApi::new(reqwest::Client::new(), url.clone(), config.http_timeout))
        }
        None => {
            warn!("ARESA_API_URL not set — using DEMO backend data");
            Arc::new(DemoApi::default())
        }
    };

    info!(
        lang                = %config.language,
        notify_fetch_errors = config.notify_fetch_errors,
        clear_draft         = config.clear_draft_on_success,
        "📘 Aresa dashboard starting"
    );

    // ── 4. Run the page ──────────────────────────────────────────────────────
    let mut dashboard = Dashboard::new(api, &config);
    console::run(&mut dashboard, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;

    Ok(())
}
