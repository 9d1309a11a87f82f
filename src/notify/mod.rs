use async_trait::async_trait;

use crate::error::Result;

mod mailer;
pub use mailer::HttpMailer;

/// Outbound notification capability. The evaluators hold this as an injected
/// trait object so they carry no transport-specific state; delivery is
/// best-effort with no retry or queueing guarantees.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}
