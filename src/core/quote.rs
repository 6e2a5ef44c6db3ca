use crate::core::pricing::PricingEngine;
use crate::domain::model::{CustomerLead, OrderPayload, OrderRequest, PricedOrder};
use crate::domain::ports::LeadSink;
use crate::utils::error::{QuoteError, Result};
use chrono::Utc;

#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    pub order: PricedOrder,
    pub payload: OrderPayload,
}

impl SubmissionReceipt {
    pub fn summary(&self) -> String {
        self.payload.summary()
    }
}

/// Prices requests and forwards valid leads to a [`LeadSink`].
///
/// Holds no per-order state: a failed submission leaves the caller's request
/// and lead untouched so the same call can simply be repeated.
pub struct QuoteDesk<S: LeadSink> {
    engine: PricingEngine,
    sink: S,
}

impl<S: LeadSink> QuoteDesk<S> {
    pub fn new(engine: PricingEngine, sink: S) -> Self {
        Self { engine, sink }
    }

    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }

    pub fn quote(&self, request: &OrderRequest) -> PricedOrder {
        self.engine.quote(request)
    }

    pub fn can_submit(&self, request: &OrderRequest, lead: &CustomerLead) -> bool {
        self.engine.is_submittable(request) && lead.is_valid()
    }

    /// Builds the payload without sending it.
    pub fn prepare(&self, request: &OrderRequest, lead: &CustomerLead) -> Result<SubmissionReceipt> {
        let order = self.engine.quote(request);
        if !order.submittable {
            return Err(QuoteError::NotSubmittable {
                reason: "Agrega al menos una clínica con WhatsApp".to_string(),
            });
        }
        lead.check()?;

        let payload = OrderPayload::build(lead, &order, Utc::now());
        Ok(SubmissionReceipt { order, payload })
    }

    pub async fn submit(
        &self,
        request: &OrderRequest,
        lead: &CustomerLead,
    ) -> Result<SubmissionReceipt> {
        let receipt = self.prepare(request, lead)?;

        tracing::info!(
            "Submitting order for {} ({} WhatsApp units, total {})",
            lead.email,
            receipt.payload.services.whatsapp,
            receipt.payload.totals.total
        );

        match self.sink.submit(&receipt.payload).await {
            Ok(()) => {
                tracing::info!("Order submitted for {}", lead.email);
                Ok(receipt)
            }
            Err(e) => {
                tracing::error!("Order submission failed: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ServiceKey;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingSink {
        sent: Arc<Mutex<Vec<OrderPayload>>>,
        fail_with: Option<u16>,
    }

    #[async_trait]
    impl LeadSink for RecordingSink {
        async fn submit(&self, payload: &OrderPayload) -> Result<()> {
            self.sent.lock().unwrap().push(payload.clone());
            match self.fail_with {
                Some(status) => Err(QuoteError::SubmissionFailed {
                    status: Some(status),
                    message: "rejected".to_string(),
                }),
                None => Ok(()),
            }
        }
    }

    fn request() -> OrderRequest {
        OrderRequest::new()
            .with_units(ServiceKey::Whatsapp, 2)
            .with_units(ServiceKey::Data, 5)
    }

    #[tokio::test]
    async fn test_submit_sends_clamped_units() {
        let sink = RecordingSink::default();
        let desk = QuoteDesk::new(PricingEngine::default(), sink.clone());
        let lead = CustomerLead::new("Ana", "ana@co.com", None);

        let receipt = desk.submit(&request(), &lead).await.unwrap();
        assert!(receipt.order.has_warning(ServiceKey::Data));

        let sent = sink.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].services.data, 2);
        assert!(receipt.summary().contains("Cliente: Ana"));
    }

    #[tokio::test]
    async fn test_invalid_lead_never_reaches_sink() {
        let sink = RecordingSink::default();
        let desk = QuoteDesk::new(PricingEngine::default(), sink.clone());
        let lead = CustomerLead::new("Ana", "ana@co", None);

        assert!(!desk.can_submit(&request(), &lead));
        let err = desk.submit(&request(), &lead).await.unwrap_err();
        assert!(matches!(err, QuoteError::InvalidLead { .. }));
        assert!(sink.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_order_without_base_is_not_submittable() {
        let sink = RecordingSink::default();
        let desk = QuoteDesk::new(PricingEngine::default(), sink.clone());
        let lead = CustomerLead::new("Ana", "ana@co.com", None);
        let request = OrderRequest::new().with_units(ServiceKey::Voice, 1);

        let err = desk.submit(&request, &lead).await.unwrap_err();
        assert!(matches!(err, QuoteError::NotSubmittable { .. }));
        assert!(sink.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_sink_failure_can_be_resubmitted() {
        let sink = RecordingSink {
            fail_with: Some(500),
            ..Default::default()
        };
        let desk = QuoteDesk::new(PricingEngine::default(), sink.clone());
        let lead = CustomerLead::new("Ana", "ana@co.com", None);
        let request = request();

        let first = tokio_test::block_on(desk.submit(&request, &lead));
        let second = tokio_test::block_on(desk.submit(&request, &lead));
        assert!(matches!(first, Err(QuoteError::SubmissionFailed { .. })));
        assert!(second.is_err());
        // no automatic retry, one call per attempt
        assert_eq!(sink.sent.lock().unwrap().len(), 2);
    }
}
