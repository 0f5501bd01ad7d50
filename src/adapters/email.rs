use crate::domain::model::EmailMessage;
use crate::domain::ports::EmailSender;
use crate::utils::error::{LeadError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a BTreeMap<String, String>,
}

/// Email-template service client (REST send endpoint).
#[derive(Debug, Clone)]
pub struct TemplateEmailSender {
    client: Client,
    api_url: String,
}

impl TemplateEmailSender {
    pub fn new(client: Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }
}

#[async_trait]
impl EmailSender for TemplateEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        let request = SendRequest {
            service_id: &message.service_id,
            template_id: &message.template_id,
            user_id: &message.public_key,
            template_params: &message.template_params,
        };

        tracing::debug!(
            "Sending {:?} email with template {}",
            message.recipient,
            message.template_id
        );

        let response = self.client.post(&self.api_url).json(&request).send().await?;

        // 只看成功與否，不解析回應內容
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LeadError::UpstreamError {
                service: "email service".to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
