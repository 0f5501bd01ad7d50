use crate::utils::error::{LeadError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_FORM_NAME: &str = "contact-form";
pub const DEFAULT_RELAY_PATH: &str = "/.netlify/functions/send-whatsapp";
pub const DEFAULT_EMAIL_API_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// 表單控制器的設定，啟動時載入一次，之後不可變
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub site: SiteSection,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub messaging: MessagingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSection {
    pub base_url: String,
    #[serde(default = "default_form_name")]
    pub form_name: String,
    #[serde(default = "default_relay_path")]
    pub relay_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_email_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub client_template_id: String,
    #[serde(default)]
    pub admin_template_id: String,
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub admin_email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagingConfig {
    #[serde(default)]
    pub enabled: bool,
    /// 僅供參考；relay 從自己的環境變數讀取收件號碼
    pub admin_number: Option<String>,
}

fn default_form_name() -> String {
    DEFAULT_FORM_NAME.to_string()
}

fn default_relay_path() -> String {
    DEFAULT_RELAY_PATH.to_string()
}

fn default_email_api_url() -> String {
    DEFAULT_EMAIL_API_URL.to_string()
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: default_email_api_url(),
            service_id: String::new(),
            client_template_id: String::new(),
            admin_template_id: String::new(),
            public_key: String::new(),
            admin_email: String::new(),
        }
    }
}

impl EmailConfig {
    /// A live key: present, not a `YOUR_...` placeholder, not an unresolved `${VAR}`.
    pub fn has_live_key(&self) -> bool {
        let key = self.public_key.trim();
        !key.is_empty() && !key.starts_with("YOUR_") && !key.contains("${")
    }

    pub fn is_ready(&self) -> bool {
        self.enabled && self.has_live_key()
    }
}

impl SiteConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            site: SiteSection {
                base_url: base_url.into(),
                form_name: default_form_name(),
                relay_path: default_relay_path(),
            },
            email: EmailConfig::default(),
            messaging: MessagingConfig::default(),
        }
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LeadError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::from_toml_str_with(content, |name| std::env::var(name).ok())
    }

    /// 同上，但變數值由 `lookup` 提供
    pub fn from_toml_str_with<F>(content: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let processed_content = Self::substitute_vars(content, lookup)?;

        toml::from_str(&processed_content).map_err(|e| LeadError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${EMAILJS_PUBLIC_KEY})，找不到的保留原樣
    fn substitute_vars<F>(content: &str, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| LeadError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 表單資料 POST 到網站根路徑
    pub fn forms_endpoint(&self) -> String {
        format!("{}/", self.site.base_url.trim_end_matches('/'))
    }

    pub fn relay_endpoint(&self) -> String {
        format!(
            "{}{}",
            self.site.base_url.trim_end_matches('/'),
            self.site.relay_path
        )
    }

    pub fn email_ready(&self) -> bool {
        self.email.is_ready()
    }

    pub fn messaging_enabled(&self) -> bool {
        self.messaging.enabled
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("site.base_url", &self.site.base_url)?;
        validation::validate_non_empty_string("site.form_name", &self.site.form_name)?;
        validation::validate_path_segment("site.relay_path", &self.site.relay_path)?;

        // 未啟用 email 時其餘欄位可留空
        if self.email.enabled {
            validation::validate_url("email.api_url", &self.email.api_url)?;
            validation::validate_non_empty_string("email.service_id", &self.email.service_id)?;
            validation::validate_non_empty_string(
                "email.client_template_id",
                &self.email.client_template_id,
            )?;
            validation::validate_non_empty_string(
                "email.admin_template_id",
                &self.email.admin_template_id,
            )?;
            validation::validate_email_setting("email.admin_email", &self.email.admin_email)?;

            if !self.email.has_live_key() {
                tracing::warn!(
                    "email.public_key is missing or a placeholder; email notifications will be skipped"
                );
            }
        }

        Ok(())
    }
}
