use crate::config::RelayConfig;
use crate::domain::model::{Lead, LeadField};
use crate::utils::error::Result;
use chrono::{Local, NaiveDateTime};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

const DIVIDER: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Function-platform invocation event (only the parts the relay reads).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEvent {
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
}

/// Function-platform response: status code, headers, string body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl RelayResponse {
    fn json(status_code: u16, value: Value) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code,
            headers,
            body: value.to_string(),
        }
    }

    pub fn method_not_allowed() -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Allow".to_string(), "POST".to_string());
        headers.insert("Content-Type".to_string(), "text/plain".to_string());
        Self {
            status_code: 405,
            headers,
            body: "Method Not Allowed".to_string(),
        }
    }

    pub fn not_configured() -> Self {
        Self::json(500, json!({ "error": "WhatsApp service not configured" }))
    }

    pub fn failed(details: impl Into<String>) -> Self {
        Self::json(
            500,
            json!({ "error": "Failed to send WhatsApp", "details": details.into() }),
        )
    }

    pub fn sent(result: Value) -> Self {
        Self::json(
            200,
            json!({
                "success": true,
                "message": "WhatsApp sent successfully",
                "result": result,
            }),
        )
    }

    pub fn json_body(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }
}

#[derive(Debug, Serialize)]
struct GatewayRequest<'a> {
    token: &'a str,
    to: &'a str,
    body: &'a str,
}

/// Reads lead fields out of any JSON value; missing fields render empty and
/// non-string values render as JSON text.
pub fn lead_from_json(value: &Value) -> Lead {
    let mut lead = Lead::default();
    for field in LeadField::ALL {
        let text = match value.get(field.wire_name()) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        lead.set(field, text);
    }
    lead
}

/// `03/14/2026, 09:26 AM`
pub fn format_message_date(at: NaiveDateTime) -> String {
    at.format("%m/%d/%Y, %I:%M %p").to_string()
}

pub fn render_message(lead: &Lead, at: NaiveDateTime) -> String {
    format!(
        "🔔 *NEW LEAD FROM LANDING PAGE*\n\n\
         {divider}\n\n\
         👤 *Name:*\n{name}\n\n\
         📱 *Phone:*\n{phone}\n\n\
         📧 *Email:*\n{email}\n\n\
         📍 *Zip Code:*\n{zip}\n\n\
         ⚖️ *Case Type:*\n{case_type}\n\n\
         📝 *Description:*\n{description}\n\n\
         {divider}\n\
         📅 *Date:* {date}",
        divider = DIVIDER,
        name = lead.full_name(),
        phone = lead.phone_number,
        email = lead.email_address,
        zip = lead.zip_code,
        case_type = lead.case_type,
        description = lead.description,
        date = format_message_date(at),
    )
}

/// Stateless handler that forwards a lead to the messaging gateway with
/// server-held credentials.
#[derive(Debug, Clone)]
pub struct NotificationRelay {
    client: Client,
    config: RelayConfig,
}

impl NotificationRelay {
    pub fn new(client: Client, config: RelayConfig) -> Self {
        Self { client, config }
    }

    pub async fn handle_event(&self, event: &FunctionEvent) -> RelayResponse {
        self.handle(&event.http_method, event.body.as_deref()).await
    }

    pub async fn handle(&self, method: &str, body: Option<&str>) -> RelayResponse {
        if method != "POST" {
            tracing::warn!("Rejected {} request to notification relay", method);
            return RelayResponse::method_not_allowed();
        }

        match self.forward(body.unwrap_or_default()).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    "❌ Notification relay failed: {} (Category: {:?})",
                    e,
                    e.category()
                );
                RelayResponse::failed(e.to_string())
            }
        }
    }

    async fn forward(&self, body: &str) -> Result<RelayResponse> {
        let payload: Value = serde_json::from_str(body)?;

        let credentials = match self.config.credentials() {
            Ok(credentials) => credentials,
            Err(e) => {
                tracing::error!("Messaging gateway is not configured: {}", e);
                return Ok(RelayResponse::not_configured());
            }
        };

        let lead = lead_from_json(&payload);
        let message = render_message(&lead, Local::now().naive_local());
        let endpoint = self.config.send_endpoint(&credentials.instance_id);

        tracing::debug!("Forwarding lead to messaging gateway at {}", endpoint);

        let response = self
            .client
            .post(&endpoint)
            .json(&GatewayRequest {
                token: &credentials.token,
                to: &credentials.admin_number,
                body: &message,
            })
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        // 閘道回應原樣轉交；非 JSON 時以字串包裝
        let result = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));

        if !status.is_success() {
            tracing::error!("❌ Messaging gateway responded with status {}: {}", status, result);
            return Ok(RelayResponse::failed(format!("Gateway error: {}", result)));
        }

        tracing::info!("✅ WhatsApp notification sent: {}", result);
        Ok(RelayResponse::sent(result))
    }
}
