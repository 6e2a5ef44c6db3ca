use agent_quote::adapters::export::{breakdown_csv, export_breakdown};
use agent_quote::core::format::render_quote;
use agent_quote::core::QuoteSettings;
use agent_quote::utils::error::{ErrorSeverity, QuoteError};
use agent_quote::utils::{logger, validation::Validate};
use agent_quote::{CliConfig, OutputFormat, PricingEngine, QuoteDesk, TomlConfig, WebhookSink};
use clap::Parser;

fn load_settings(config: &CliConfig) -> Result<Box<dyn QuoteSettings>, QuoteError> {
    match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let mut toml = TomlConfig::from_file(path)?;
            toml.apply_overrides(
                config.webhook_url.as_deref(),
                config.timeout_seconds,
                config.discount_rate,
                config.exchange_rate,
            );
            toml.validate()?;
            let settings: Box<dyn QuoteSettings> = Box::new(toml);
            Ok(settings)
        }
        None => {
            config.validate()?;
            let settings: Box<dyn QuoteSettings> = Box::new(config.clone());
            Ok(settings)
        }
    }
}

fn exit_with(e: &QuoteError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 2,
        ErrorSeverity::Medium => 3,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 4,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    let settings = match load_settings(&config) {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };

    let engine = PricingEngine::new(settings.catalog(), settings.pricing());
    let request = config.order_request();
    let order = engine.quote(&request);

    for key in &order.warnings {
        tracing::warn!(
            "⚠️ {} units exceed WhatsApp units; billing {}",
            key,
            order.effective_units(*key)
        );
    }

    match config.format {
        OutputFormat::Text => print!("{}", render_quote(&order)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&order)?),
        OutputFormat::Csv => print!("{}", breakdown_csv(&order).unwrap_or_else(|e| exit_with(&e))),
    }

    if let Some(path) = &config.export {
        if let Err(e) = export_breakdown(&order, path) {
            exit_with(&e);
        }
    }

    if !config.submit {
        return Ok(());
    }

    let sink = match WebhookSink::from_settings(settings.as_ref()) {
        Ok(sink) => sink,
        Err(e) => exit_with(&e),
    };
    let desk = QuoteDesk::new(engine, sink);

    match desk.submit(&request, &config.lead()).await {
        Ok(receipt) => {
            tracing::info!("✅ Order submitted");
            println!("✅ Pedido enviado");
            println!("{}", receipt.summary());
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}
