// Adapters layer: reqwest-backed implementations of the domain ports.

pub mod email;
pub mod forms_store;
pub mod relay_client;

pub use email::TemplateEmailSender;
pub use forms_store::HttpFormsStore;
pub use relay_client::HttpRelayNotifier;
