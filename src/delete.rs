//! Two-phase delete negotiation.
//!
//! The service may withhold a deletion until the client confirms it (the
//! document has derived artifacts, or is referenced elsewhere). The client
//! must give the server that chance on every delete, yet complete the
//! user's single intent in one perceived action. The flow is an explicit
//! state machine rather than nested callbacks so an error at any phase
//! aborts uniformly: no refresh, no inferred "maybe deleted" state.

use crate::client::{DeleteAck, DocumentApi};
use crate::error::ClientError;
use crate::store::DocumentStore;

/// Named phases of one delete attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePhase {
    Idle,
    /// Tentative call (`confirm=false`) issued.
    Requested,
    /// Server answered `confirm: true`; a forced call is owed.
    AwaitingConfirmation,
    /// Forced call (`confirm=true`) issued.
    Confirmed,
    /// Server accepted the deletion; the caller owes one store refresh.
    Done,
}

impl std::fmt::Display for DeletePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Requested => write!(f, "requested"),
            Self::AwaitingConfirmation => write!(f, "awaiting confirmation"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// Tracks the phase of a single delete attempt.
///
/// Transitions are pure; the async driver [`delete_document`] owns the I/O.
#[derive(Debug)]
pub struct DeleteNegotiator {
    phase: DeletePhase,
}

impl DeleteNegotiator {
    pub fn new() -> Self {
        Self {
            phase: DeletePhase::Idle,
        }
    }

    pub fn phase(&self) -> DeletePhase {
        self.phase
    }

    /// Idle → Requested.
    fn request(&mut self) {
        self.transition(DeletePhase::Requested);
    }

    /// Requested → AwaitingConfirmation when the server asks for a forced
    /// retry, Requested → Done otherwise. Returns whether a second call is
    /// owed.
    fn on_first_ack(&mut self, ack: &DeleteAck) -> bool {
        if ack.needs_confirmation() {
            self.transition(DeletePhase::AwaitingConfirmation);
            true
        } else {
            self.transition(DeletePhase::Done);
            false
        }
    }

    /// AwaitingConfirmation → Confirmed (forced call issued).
    fn confirm(&mut self) {
        self.transition(DeletePhase::Confirmed);
    }

    /// Confirmed → Done (forced call accepted).
    fn finish(&mut self) {
        self.transition(DeletePhase::Done);
    }

    fn transition(&mut self, next: DeletePhase) {
        tracing::debug!(from = %self.phase, to = %next, "delete phase");
        self.phase = next;
    }
}

impl Default for DeleteNegotiator {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a completed delete flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Remote delete calls issued: 1 when the first response was final,
    /// 2 when the server demanded confirmation.
    pub calls: u8,
    /// Whether the forced second call was needed.
    pub confirmation_required: bool,
}

/// Run one delete flow to completion and refresh the store.
///
/// Issues the tentative call, auto-issues the forced call if the server
/// asks for confirmation, and refreshes the store exactly once after
/// reaching `Done`. Any error aborts without refreshing: the document stays
/// in the snapshot, accurately reflecting that deletion did not complete.
pub async fn delete_document<A: DocumentApi>(
    api: &A,
    store: &DocumentStore,
    id: &str,
) -> Result<DeleteOutcome, ClientError> {
    let mut negotiator = DeleteNegotiator::new();

    negotiator.request();
    let ack = api.delete(id, false).await.map_err(|err| {
        tracing::warn!(id, error = %err, "tentative delete failed");
        err
    })?;

    let confirmation_required = negotiator.on_first_ack(&ack);
    if confirmation_required {
        negotiator.confirm();
        // The server is the idempotence authority here: if the document is
        // already gone the error is surfaced, never papered over.
        api.delete(id, true).await.map_err(|err| {
            tracing::warn!(
                id,
                error = %err,
                "forced delete failed, treating document as still present"
            );
            err
        })?;
        negotiator.finish();
    }

    debug_assert_eq!(negotiator.phase(), DeletePhase::Done);
    store.refresh(api).await?;
    tracing::info!(id, confirmation_required, "document deleted");

    Ok(DeleteOutcome {
        calls: if confirmation_required { 2 } else { 1 },
        confirmation_required,
    })
}
