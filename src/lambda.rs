#[cfg(feature = "lambda")]
use agent_quote::core::format::{format_cop, format_usd, savings_badge};
#[cfg(feature = "lambda")]
use agent_quote::core::QuoteSettings;
#[cfg(feature = "lambda")]
use agent_quote::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use agent_quote::{
    CustomerLead, LambdaConfig, OrderRequest, PricedOrder, PricingEngine, QuoteDesk, ServiceKey,
    WebhookSink,
};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "lambda")]
use std::collections::HashMap;

#[cfg(feature = "lambda")]
#[derive(Deserialize)]
pub struct Request {
    /// Raw field text keyed by service, e.g. `{"whatsapp": "3", "voice": "5"}`.
    #[serde(default)]
    pub units: HashMap<String, String>,
    pub customer: Option<CustomerLead>,
}

#[cfg(feature = "lambda")]
#[derive(Serialize)]
pub struct Response {
    pub quote: PricedOrder,
    pub total: String,
    pub total_cop: String,
    pub badge: String,
    pub submitted: bool,
    pub message: String,
}

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    let config = LambdaConfig::from_env()?;
    config.validate()?;

    let request = OrderRequest::from_text(
        event
            .payload
            .units
            .iter()
            .filter_map(|(key, text)| ServiceKey::parse(key).map(|key| (key, text.as_str()))),
    );

    let engine = PricingEngine::new(config.catalog(), config.pricing());
    let quote = engine.quote(&request);

    let (submitted, message) = match &event.payload.customer {
        Some(lead) => {
            let desk = QuoteDesk::new(engine, WebhookSink::from_settings(&config)?);
            match desk.submit(&request, lead).await {
                Ok(receipt) => (true, receipt.summary()),
                Err(e) => {
                    tracing::error!("Order submission failed: {}", e);
                    (false, e.user_friendly_message())
                }
            }
        }
        None => (false, "Quote only".to_string()),
    };

    Ok(Response {
        total: format_usd(quote.grand_total),
        total_cop: format_cop(quote.grand_total_secondary),
        badge: savings_badge(&quote),
        quote,
        submitted,
        message,
    })
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();
    run(service_fn(function_handler)).await
}
