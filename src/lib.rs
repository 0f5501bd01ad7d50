pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HttpFormsStore, HttpRelayNotifier, TemplateEmailSender};
pub use config::{RelayConfig, SiteConfig};
pub use crate::core::{form_controller::FormController, relay::NotificationRelay};
pub use utils::error::{LeadError, Result};

/// The controller wired to the real HTTP collaborators.
pub type HttpFormController = FormController<HttpFormsStore, TemplateEmailSender, HttpRelayNotifier>;

/// Builds a controller whose collaborators all share one reqwest client.
pub fn http_form_controller(config: SiteConfig) -> HttpFormController {
    let client = reqwest::Client::new();
    let forms = HttpFormsStore::new(client.clone(), config.forms_endpoint());
    let email = TemplateEmailSender::new(client.clone(), config.email.api_url.clone());
    let relay = HttpRelayNotifier::new(client, config.relay_endpoint());
    FormController::new(config, forms, email, relay)
}
