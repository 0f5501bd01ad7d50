use crate::domain::model::Lead;
use crate::domain::ports::RelayNotifier;
use crate::utils::error::{LeadError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Calls the notification relay function with the lead as JSON.
#[derive(Debug, Clone)]
pub struct HttpRelayNotifier {
    client: Client,
    endpoint: String,
}

impl HttpRelayNotifier {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl RelayNotifier for HttpRelayNotifier {
    async fn notify(&self, lead: &Lead) -> Result<()> {
        tracing::debug!("Calling notification relay at {}", self.endpoint);

        let response = self.client.post(&self.endpoint).json(lead).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LeadError::UpstreamError {
                service: "notification relay".to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
