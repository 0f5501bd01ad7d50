use clap::Parser;
use lead_intake::domain::model::CaseType;
use lead_intake::utils::error::ErrorSeverity;
use lead_intake::utils::{logger, validation::Validate};
use lead_intake::{http_form_controller, CliConfig, SiteConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    if args.list_case_types {
        for case_type in CaseType::ALL {
            println!("{}", case_type);
        }
        return Ok(());
    }

    tracing::info!("🚀 Starting lead-intake");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let config = match SiteConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::debug!(
        "Email notifications: {}, messaging notifications: {}",
        config.email_ready(),
        config.messaging_enabled()
    );

    let mut controller = http_form_controller(config);
    for (field, value) in args.field_updates() {
        controller.update_field(field, value);
    }

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - validating only");
        if controller.validate() {
            println!("✅ Lead is valid");
            return Ok(());
        }
        eprintln!("❌ {}", controller.error().unwrap_or_default());
        std::process::exit(2);
    }

    match controller.submit().await {
        Ok(report) => {
            for (step, outcome) in report.steps() {
                tracing::debug!("{}: {}", step, outcome);
            }
            println!("✅ Thank you! We received your information and will contact you shortly.");
        }
        Err(e) => {
            tracing::error!(
                "❌ Submission refused: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 2,
                ErrorSeverity::Medium => 3,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 4,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
