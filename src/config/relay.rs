use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use std::env;

pub const DEFAULT_GATEWAY_BASE_URL: &str = "https://api.ultramsg.com";

/// Server-held settings of the notification relay, read per invocation.
///
/// Every value is optional; a missing one makes the handler answer
/// "not configured" instead of failing to start.
#[derive(Debug, Clone, Default)]
pub struct RelayConfig {
    pub instance_id: Option<String>,
    pub token: Option<String>,
    pub admin_number: Option<String>,
    pub gateway_base_url: Option<String>,
}

/// The three values the gateway call needs, all known to be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayCredentials {
    pub instance_id: String,
    pub token: String,
    pub admin_number: String,
}

impl RelayConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        Self {
            instance_id: non_empty("ULTRAMSG_INSTANCE_ID"),
            token: non_empty("ULTRAMSG_TOKEN"),
            admin_number: non_empty("ADMIN_WHATSAPP_NUMBER"),
            gateway_base_url: non_empty("ULTRAMSG_BASE_URL"),
        }
    }

    /// Fails with the environment variable name of the first missing value.
    pub fn credentials(&self) -> Result<GatewayCredentials> {
        Ok(GatewayCredentials {
            instance_id: validate_required_field("ULTRAMSG_INSTANCE_ID", &self.instance_id)?
                .clone(),
            token: validate_required_field("ULTRAMSG_TOKEN", &self.token)?.clone(),
            admin_number: validate_required_field("ADMIN_WHATSAPP_NUMBER", &self.admin_number)?
                .clone(),
        })
    }

    pub fn gateway_base_url(&self) -> &str {
        self.gateway_base_url
            .as_deref()
            .unwrap_or(DEFAULT_GATEWAY_BASE_URL)
    }

    /// `<base>/<instance-id>/messages/chat`
    pub fn send_endpoint(&self, instance_id: &str) -> String {
        format!(
            "{}/{}/messages/chat",
            self.gateway_base_url().trim_end_matches('/'),
            instance_id
        )
    }
}
