use crate::domain::model::{Catalog, OrderPayload, PricingSettings};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Where submitted leads go. Implementations must treat any non-2xx answer as a failure.
#[async_trait]
pub trait LeadSink: Send + Sync {
    async fn submit(&self, payload: &OrderPayload) -> Result<()>;
}

pub trait QuoteSettings: Send + Sync {
    fn pricing(&self) -> PricingSettings;
    fn webhook_url(&self) -> &str;
    fn timeout_seconds(&self) -> u64;

    fn catalog(&self) -> Catalog {
        Catalog::standard()
    }
}
