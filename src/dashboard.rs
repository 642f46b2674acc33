//! # dashboard
//!
//! The **Dashboard** orchestrator — single owner of every piece of session
//! state.
//!
//! ## Design
//!
//! * Each controller owns its own slice ([`DataFetchController`],
//!   [`ConnectFormController`], [`NotificationController`]); the language
//!   selection lives here.
//! * Suspension points (the two startup fetches, the connect request, the
//!   toast dismiss timer) run as spawned tokio tasks.  They report back as
//!   [`DashboardEvent`]s on an mpsc channel and only [`Dashboard::apply`]
//!   mutates state, so completions are applied one at a time in arrival
//!   order.
//! * [`Dashboard::teardown`] aborts every pending task and closes the apply
//!   gate; anything that still arrives afterwards is discarded.
//!
//! Methods that start work call `tokio::spawn` and must run inside a tokio
//! runtime.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::DashboardApi;
use crate::config::Config;
use crate::controllers::{
    ConnectFormController, DataFetchController, Notification, NotificationController, Severity,
    NOTIFICATION_TTL,
};
use crate::error::FormError;
use crate::events::DashboardEvent;
use crate::i18n::{Language, Texts};
use crate::view::{self, DashboardView};

pub struct Dashboard {
    session_id: Uuid,

    // ── State ─────────────────────────────────────────────────────────────────
    language:            Language,
    notify_fetch_errors: bool,
    data:                DataFetchController,
    form:                ConnectFormController,
    notifications:       NotificationController,

    // ── Plumbing ──────────────────────────────────────────────────────────────
    api:           Arc<dyn DashboardApi>,
    events_tx:     mpsc::UnboundedSender<DashboardEvent>,
    events_rx:     mpsc::UnboundedReceiver<DashboardEvent>,
    tasks:         Vec<JoinHandle<()>>,
    dismiss_timer: Option<JoinHandle<()>>,
    active:        bool,
}

impl Dashboard {
    pub fn new(api: Arc<dyn DashboardApi>, config: &Config) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let session_id = Uuid::new_v4();
        debug!(session = %session_id, lang = %config.language, "Dashboard session created");

        Self {
            session_id,
            language: config.language,
            notify_fetch_errors: config.notify_fetch_errors,
            data: DataFetchController::new(),
            form: ConnectFormController::new(config.clear_draft_on_success),
            notifications: NotificationController::new(),
            api,
            events_tx,
            events_rx,
            tasks: Vec::new(),
            dismiss_timer: None,
            active: true,
        }
    }

    // ─── Startup ──────────────────────────────────────────────────────────────

    /// Kick off the two startup reads.  They run concurrently and each one
    /// lands independently.  Returns `false` if already initialised or torn
    /// down.
    pub fn initialize(&mut self) -> bool {
        if !self.active || !self.data.begin_initialize() {
            return false;
        }
        info!(session = %self.session_id, "🚀 Loading dashboard data");

        let api = Arc::clone(&self.api);
        self.spawn(async move { DashboardEvent::TokensFetched(api.fetch_tokens().await) });

        let api = Arc::clone(&self.api);
        self.spawn(async move { DashboardEvent::HistoryFetched(api.fetch_trade_history().await) });

        true
    }

    // ─── User actions ─────────────────────────────────────────────────────────

    /// Switch every label to `language` at once.
    pub fn set_language(&mut self, language: Language) {
        if self.language != language {
            info!(from = %self.language, to = %language, "🌐 Language switched");
        }
        self.language = language;
    }

    pub fn update_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        self.form.update_field(name, value)
    }

    /// Validate the draft and send the connect request.  Precondition
    /// failures return before anything is sent.
    pub fn submit(&mut self) -> Result<(), FormError> {
        if !self.active {
            return Err(FormError::Inactive);
        }
        let request = self.form.begin_submit()?;
        let api = Arc::clone(&self.api);
        self.spawn(async move { DashboardEvent::ConnectFinished(api.connect_exchange(&request).await) });
        Ok(())
    }

    /// Show a toast and (re)arm its dismiss timer.  The previous timer, if
    /// any, is cancelled.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        if !self.active {
            return;
        }
        let generation = self.notifications.show(message, severity);

        if let Some(previous) = self.dismiss_timer.take() {
            previous.abort();
        }
        let tx = self.events_tx.clone();
        self.dismiss_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(NOTIFICATION_TTL).await;
            let _ = tx.send(DashboardEvent::NotificationExpired { generation });
        }));
    }

    // ─── Event loop ───────────────────────────────────────────────────────────

    /// Wait for the next completion without applying it.
    pub async fn next_event(&mut self) -> Option<DashboardEvent> {
        self.events_rx.recv().await
    }

    /// Wait for the next completion and apply it.
    pub async fn step(&mut self) {
        if let Some(event) = self.next_event().await {
            self.apply(event);
        }
    }

    /// Apply every completion that is already queued.  Never waits.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    pub fn apply(&mut self, event: DashboardEvent) {
        if !self.active {
            debug!(event = event.kind(), "Dashboard torn down — late event discarded");
            return;
        }
        debug!(event = event.kind(), "Applying dashboard event");

        let texts = self.texts();
        match event {
            DashboardEvent::TokensFetched(result) => {
                if self.data.apply_tokens(result).is_some() && self.notify_fetch_errors {
                    self.notify(texts.tokens_unavailable, Severity::Error);
                }
            }
            DashboardEvent::HistoryFetched(result) => {
                if self.data.apply_trades(result).is_some() && self.notify_fetch_errors {
                    self.notify(texts.history_unavailable, Severity::Error);
                }
            }
            DashboardEvent::ConnectFinished(result) => {
                let outcome = self.form.finish(result);
                self.notify(outcome.message(texts), outcome.severity());
            }
            DashboardEvent::NotificationExpired { generation } => {
                self.notifications.expire(generation);
            }
        }
    }

    // ─── Teardown ─────────────────────────────────────────────────────────────

    /// Abort in-flight work and stop applying events.  Idempotent.
    pub fn teardown(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        let pending = self.tasks.iter().filter(|t| !t.is_finished()).count();
        for task in self.tasks.drain(..) {
            task.abort();
        }
        if let Some(timer) = self.dismiss_timer.take() {
            timer.abort();
        }
        self.events_rx.close();
        if pending > 0 {
            warn!(session = %self.session_id, pending, "Dashboard torn down with requests in flight");
        } else {
            info!(session = %self.session_id, "Dashboard torn down");
        }
    }

    // ─── Accessors ────────────────────────────────────────────────────────────

    pub fn view(&self) -> DashboardView {
        view::compose(self)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn texts(&self) -> &'static Texts {
        self.language.texts()
    }

    pub fn data(&self) -> &DataFetchController {
        &self.data
    }

    pub fn form(&self) -> &ConnectFormController {
        &self.form
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    pub fn notifications(&self) -> &NotificationController {
        &self.notifications
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    // ─── Helpers ──────────────────────────────────────────────────────────────

    fn spawn<F>(&mut self, work: F)
    where
        F: Future<Output = DashboardEvent> + Send + 'static,
    {
        let tx = self.events_tx.clone();
        self.tasks.retain(|t| !t.is_finished());
        self.tasks.push(tokio::spawn(async move {
            let event = work.await;
            // Receiver gone means the dashboard is gone; nothing to update.
            let _ = tx.send(event);
        }));
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.teardown();
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
