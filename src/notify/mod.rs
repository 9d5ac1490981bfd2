use async_trait::async_trait;

use crate::utils::error::NotifyError;

pub mod telegram;

pub use telegram::TelegramNotifier;

/// Delivery outcome for a single alert message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyStatus {
    Sent,
    /// Credentials are not configured; the send was skipped, not failed.
    Disabled,
}

/// One-way, best-effort alert channel.
///
/// Failures are reported to the caller, which logs them and moves on;
/// delivery never blocks or aborts a monitoring round.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<NotifyStatus, NotifyError>;
}
