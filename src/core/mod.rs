pub mod format;
pub mod lead;
pub mod payload;
pub mod plans;
pub mod pricing;
pub mod quote;

pub use crate::domain::model::{
    Catalog, CustomerLead, LineItem, OrderPayload, OrderRequest, PricedOrder, PricingSettings,
    ServiceDefinition, ServiceKey,
};
pub use crate::domain::ports::{LeadSink, QuoteSettings};
pub use crate::utils::error::Result;
