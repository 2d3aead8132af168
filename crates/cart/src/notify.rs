//! User-facing notifications.
//!
//! The cart only ever emits error notifications; successful operations are
//! silent. Delivery is fire-and-forget: a [`Notifier`] cannot fail.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

/// Notification messages shown to the shopper.
pub mod messages {
    /// Adding a product failed (lookup or persistence error).
    pub const ADD_FAILED: &str = "Erro na adição do produto";

    /// Removing a product failed, including when it is not in the cart.
    pub const REMOVE_FAILED: &str = "Erro na remoção do produto";

    /// The requested quantity exceeds available stock.
    pub const OUT_OF_STOCK: &str = "Quantidade solicitada fora de estoque";

    /// Changing a product quantity failed.
    pub const UPDATE_FAILED: &str = "Erro na alteração de quantidade do produto";
}

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
        }
    }
}

/// A message for the UI toast area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    /// Create an error notification.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Emits notifications as `tracing` error events.
///
/// Used by the CLI, where the log output is the toast area.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        tracing::error!(
            severity = %notification.severity,
            "{}",
            notification.message
        );
    }
}

/// Records notifications in memory.
///
/// Cloning shares the underlying buffer, so a UI can hand one clone to the
/// cart and drain the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    received: Arc<Mutex<Vec<Notification>>>,
}

impl MemoryNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every notification received so far.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return every notification received so far.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.received.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}
