pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, OutputFormat};

pub use adapters::webhook::WebhookSink;
pub use config::lambda::LambdaConfig;
pub use config::toml_config::TomlConfig;
pub use core::pricing::PricingEngine;
pub use core::quote::{QuoteDesk, SubmissionReceipt};
pub use domain::model::{CustomerLead, OrderRequest, PricedOrder, ServiceKey};
pub use utils::error::{QuoteError, Result};
