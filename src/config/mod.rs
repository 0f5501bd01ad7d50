pub mod relay;
pub mod site_config;

#[cfg(feature = "cli")]
use clap::Parser;

pub use relay::{GatewayCredentials, RelayConfig};
pub use site_config::SiteConfig;

/// Command line of the `lead-intake` binary: one flag per form field.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "lead-intake")]
#[command(about = "Submit a lead through the landing-page intake flow")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "lead-intake.toml")]
    pub config: String,

    #[arg(long, default_value = "")]
    pub first_name: String,

    #[arg(long, default_value = "")]
    pub last_name: String,

    #[arg(long, default_value = "")]
    pub phone_number: String,

    #[arg(long, default_value = "")]
    pub email_address: String,

    #[arg(long, default_value = "")]
    pub zip_code: String,

    /// One of the case types listed by --list-case-types
    #[arg(long, default_value = "")]
    pub case_type: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Print the accepted case types and exit
    #[arg(long)]
    pub list_case_types: bool,

    /// Validate only, do not contact any service
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Field updates in form order, as the page would apply them.
    pub fn field_updates(&self) -> Vec<(crate::domain::model::LeadField, String)> {
        use crate::domain::model::LeadField;

        vec![
            (LeadField::FirstName, self.first_name.clone()),
            (LeadField::LastName, self.last_name.clone()),
            (LeadField::PhoneNumber, self.phone_number.clone()),
            (LeadField::EmailAddress, self.email_address.clone()),
            (LeadField::ZipCode, self.zip_code.clone()),
            (LeadField::CaseType, self.case_type.clone()),
            (LeadField::Description, self.description.clone()),
        ]
    }
}
