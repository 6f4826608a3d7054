use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Danger,
    Warning,
    #[default]
    Info,
}

/// What a confirmation prompt shows. Severity only affects presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmOptions {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
    pub severity: Severity,
}

impl ConfirmOptions {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: "Confirm".to_string(),
            cancel_label: "Cancel".to_string(),
            severity: Severity::default(),
        }
    }

    pub fn confirm_label(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = label.into();
        self
    }

    pub fn cancel_label(mut self, label: impl Into<String>) -> Self {
        self.cancel_label = label.into();
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogState {
    Idle,
    Pending(ConfirmOptions),
    Resolved(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfirmationError {
    #[error("another confirmation is already waiting for an answer")]
    AlreadyPending,
    #[error("there is no confirmation waiting for an answer")]
    NothingPending,
    #[error("the confirmation was dropped without an answer")]
    Abandoned,
}

struct Slot {
    state: DialogState,
    responder: Option<oneshot::Sender<bool>>,
}

/// Single confirmation slot driven by a display surface.
///
/// Callers `request` (or `confirm`) and suspend until the surface calls
/// `accept` or `cancel`. Only one request may be pending at a time.
pub struct ConfirmationDialog {
    slot: Mutex<Slot>,
}

/// Answer to one confirmation request.
#[derive(Debug)]
pub struct PendingConfirmation {
    rx: oneshot::Receiver<bool>,
}

impl PendingConfirmation {
    pub async fn answer(self) -> Result<bool, ConfirmationError> {
        self.rx.await.map_err(|_| ConfirmationError::Abandoned)
    }
}

impl Default for ConfirmationDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmationDialog {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                state: DialogState::Idle,
                responder: None,
            }),
        }
    }

    pub fn state(&self) -> DialogState {
        self.lock().state.clone()
    }

    /// Options of the prompt currently waiting for an answer.
    pub fn pending(&self) -> Option<ConfirmOptions> {
        match self.lock().state {
            DialogState::Pending(ref options) => Some(options.clone()),
            _ => None,
        }
    }

    pub fn request(
        &self,
        options: ConfirmOptions,
    ) -> Result<PendingConfirmation, ConfirmationError> {
        let mut slot = self.lock();
        if matches!(slot.state, DialogState::Pending(_)) {
            return Err(ConfirmationError::AlreadyPending);
        }
        let (tx, rx) = oneshot::channel();
        debug!(title = %options.title, "confirmation requested");
        slot.state = DialogState::Pending(options);
        slot.responder = Some(tx);
        Ok(PendingConfirmation { rx })
    }

    pub async fn confirm(&self, options: ConfirmOptions) -> Result<bool, ConfirmationError> {
        self.request(options)?.answer().await
    }

    pub fn accept(&self) -> Result<(), ConfirmationError> {
        self.resolve(true)
    }

    pub fn cancel(&self) -> Result<(), ConfirmationError> {
        self.resolve(false)
    }

    fn resolve(&self, answer: bool) -> Result<(), ConfirmationError> {
        let mut slot = self.lock();
        if !matches!(slot.state, DialogState::Pending(_)) {
            return Err(ConfirmationError::NothingPending);
        }
        slot.state = DialogState::Resolved(answer);
        if let Some(tx) = slot.responder.take() {
            // The requester may have stopped waiting; the answer is recorded either way.
            let _ = tx.send(answer);
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Asks the user before a destructive action goes ahead.
#[async_trait]
pub trait Confirmer: Send + Sync {
    async fn confirm(&self, options: ConfirmOptions) -> bool;
}

#[async_trait]
impl Confirmer for ConfirmationDialog {
    async fn confirm(&self, options: ConfirmOptions) -> bool {
        match ConfirmationDialog::confirm(self, options).await {
            Ok(answer) => answer,
            Err(err) => {
                warn!(error = %err, "confirmation treated as declined");
                false
            }
        }
    }
}

/// Accepts every prompt without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

#[async_trait]
impl Confirmer for AutoConfirm {
    async fn confirm(&self, options: ConfirmOptions) -> bool {
        debug!(title = %options.title, "confirmation accepted automatically");
        true
    }
}
