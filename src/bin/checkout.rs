use agent_quote::core::plans::{
    standard_plans, visible_plans, whatsapp_confirmation_link, PaymentMethod,
    TransferInstructions, DEFAULT_CONFIRMATION_PHONE,
};
use agent_quote::utils::logger;
use agent_quote::TomlConfig;
use anyhow::{bail, Context, Result};
use clap::Parser;

#[derive(Parser)]
#[command(name = "checkout")]
#[command(about = "Show subscription plans and bank transfer instructions")]
struct Args {
    /// Landing page URL or query string; `?plan=<slug>` narrows the list
    #[arg(long)]
    url: Option<String>,

    /// Plan to pay for by bank transfer
    #[arg(long)]
    plan: Option<String>,

    /// Optional TOML configuration file (for the confirmation phone)
    #[arg(short, long)]
    config: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let phone = match &args.config {
        Some(path) => TomlConfig::from_file(path)
            .with_context(|| format!("failed to load config file '{}'", path))?
            .whatsapp_phone()
            .to_string(),
        None => DEFAULT_CONFIRMATION_PHONE.to_string(),
    };

    let plans = standard_plans();

    let Some(slug) = &args.plan else {
        for plan in visible_plans(&plans, args.url.as_deref()) {
            let marker = if plan.featured { " ⭐" } else { "" };
            println!("{}{} · {}", plan.name, marker, plan.price_label());
            println!("  {}", plan.tagline);
            println!("  {}", plan.setup_label());
        }
        return Ok(());
    };

    let Some(plan) = plans.iter().find(|plan| plan.slug.eq_ignore_ascii_case(slug)) else {
        bail!("unknown plan '{}'", slug);
    };
    tracing::info!("Checkout for {}", plan.name);

    for method in [PaymentMethod::BankTransfer, PaymentMethod::Card] {
        let status = if method.is_available() { "" } else { " [no disponible]" };
        println!("- {}{}", method.label(), status);
    }
    println!();
    println!("{}", TransferInstructions::default().render(plan));
    println!();
    println!("Envía tu comprobante: {}", whatsapp_confirmation_link(&phone, &plan.name)?);

    Ok(())
}
