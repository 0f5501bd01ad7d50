use crate::domain::model::{EmailMessage, FormSubmission, Lead};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Durable record of raw form submissions.
#[async_trait]
pub trait FormsStore: Send + Sync {
    async fn record(&self, submission: &FormSubmission) -> Result<()>;
}

/// Templated email delivery.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// Forwards a lead to the server-side notification relay.
#[async_trait]
pub trait RelayNotifier: Send + Sync {
    async fn notify(&self, lead: &Lead) -> Result<()>;
}
