//! # controllers::connect
//!
//! **Exchange Connection Form Controller**
//!
//! ```text
//! update_field ──▶ draft
//! submit ──▶ [in-flight?] ──▶ [required fields] ──▶ ConnectRequest ──▶ backend
//!                                                                      │
//! finish ◀──────────────────────────────────────────────────────────────┘
//!   ├─ status == "success"  → Connected
//!   ├─ any other status     → Rejected
//!   └─ no usable response   → Unreachable
//! ```
//!
//! Nothing is retried; the user resubmits by hand.

use tracing::{info, warn};

use crate::controllers::notification::Severity;
use crate::error::{ApiError, FormError};
use crate::i18n::Texts;
use crate::models::{ConnectRequest, ConnectResponse, CredentialDraft, DraftField};

// ─── Outcome ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// Backend answered `status: "success"`.
    Connected,
    /// Backend answered with any other status (or none).
    Rejected { status: Option<String> },
    /// No response obtained, or the body could not be read.
    Unreachable(ApiError),
}

impl ConnectOutcome {
    pub fn severity(&self) -> Severity {
        match self {
            ConnectOutcome::Connected => Severity::Success,
            ConnectOutcome::Rejected { .. } | ConnectOutcome::Unreachable(_) => Severity::Error,
        }
    }

    pub fn message(&self, texts: &Texts) -> &'static str {
        match self {
            ConnectOutcome::Connected => texts.connect_success,
            ConnectOutcome::Rejected { .. } => texts.connect_rejected,
            ConnectOutcome::Unreachable(_) => texts.connect_unreachable,
        }
    }
}

// ─── Controller ───────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct ConnectFormController {
    draft:            CredentialDraft,
    in_flight:        bool,
    clear_on_success: bool,
}

impl ConnectFormController {
    pub fn new(clear_on_success: bool) -> Self {
        Self {
            draft: CredentialDraft::default(),
            in_flight: false,
            clear_on_success,
        }
    }

    /// Set one draft field.  Any string is accepted.
    pub fn update_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let field: DraftField = name.parse()?;
        self.draft.set(field, value);
        Ok(())
    }

    /// Check preconditions and claim the in-flight slot.  On `Ok` the caller
    /// owns the request and must report back through [`Self::finish`].
    pub fn begin_submit(&mut self) -> Result<ConnectRequest, FormError> {
        if self.in_flight {
            warn!("Connect already in flight — duplicate submit refused");
            return Err(FormError::SubmissionInFlight);
        }
        let request = self.draft.validate()?;
        self.in_flight = true;
        info!(exchange = request.exchange.id(), "🔌 Connecting exchange...");
        Ok(request)
    }

    pub fn finish(&mut self, result: Result<ConnectResponse, ApiError>) -> ConnectOutcome {
        self.in_flight = false;

        let outcome = match result {
            Ok(resp) if resp.is_success() => ConnectOutcome::Connected,
            Ok(resp) => ConnectOutcome::Rejected { status: resp.status_text() },
            Err(err) => ConnectOutcome::Unreachable(err),
        };

        match &outcome {
            ConnectOutcome::Connected => {
                info!("✅ Exchange connected");
                if self.clear_on_success {
                    self.draft = CredentialDraft::default();
                }
            }
            ConnectOutcome::Rejected { status } => {
                warn!(status = ?status, "❌ Exchange connect rejected by backend");
            }
            ConnectOutcome::Unreachable(err) => {
                warn!(error = %err, "❌ Exchange connect request failed");
            }
        }

        outcome
    }

    pub fn draft(&self) -> &CredentialDraft {
        &self.draft
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}
