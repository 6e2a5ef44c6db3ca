use agent_quote::core::plans::whatsapp_confirmation_link;
use agent_quote::{
    CustomerLead, OrderRequest, PricingEngine, QuoteDesk, QuoteError, ServiceKey, WebhookSink,
};
use httpmock::prelude::*;
use std::time::Duration;

fn desk_for(server: &MockServer, path: &str) -> QuoteDesk<WebhookSink> {
    let sink = WebhookSink::new(server.url(path), Duration::from_secs(5)).unwrap();
    QuoteDesk::new(PricingEngine::default(), sink)
}

fn over_provisioned_request() -> OrderRequest {
    OrderRequest::from_text([
        (ServiceKey::Whatsapp, "3"),
        (ServiceKey::Voice, "5"),
        (ServiceKey::Data, ""),
        (ServiceKey::Content, "1"),
    ])
}

#[tokio::test]
async fn test_order_is_posted_as_json() {
    let server = MockServer::start();
    let hook = server.mock(|when, then| {
        when.method(POST)
            .path("/webhook/leads")
            .header("content-type", "application/json")
            .json_body_partial(
                r#"{
                    "customer": {"name": "Ana", "email": "ana@co.com", "company": "Vet SAS"},
                    "services": {"whatsapp": 3, "voice": 3, "data": 0, "content": 1},
                    "totals": {"listPrice": "$11,400", "discount": "-$2,280", "total": "$10,320"}
                }"#,
            );
        then.status(200).body("ok");
    });

    let desk = desk_for(&server, "/webhook/leads");
    let lead = CustomerLead::new("Ana", "ana@co.com", Some("Vet SAS"));

    let receipt = desk.submit(&over_provisioned_request(), &lead).await.unwrap();

    hook.assert();
    assert!(receipt.order.has_warning(ServiceKey::Voice));
    assert_eq!(receipt.payload.services.voice, 3);
    assert!(receipt.payload.timestamp.ends_with('Z'));
    assert!(receipt.summary().contains("Total: $10,320 USD"));
}

#[tokio::test]
async fn test_non_success_status_is_a_failure() {
    let server = MockServer::start();
    let hook = server.mock(|when, then| {
        when.method(POST).path("/webhook/down");
        then.status(503).body("maintenance");
    });

    let desk = desk_for(&server, "/webhook/down");
    let lead = CustomerLead::new("Ana", "ana@co.com", None);
    let request = over_provisioned_request();

    let err = desk.submit(&request, &lead).await.unwrap_err();
    match &err {
        QuoteError::SubmissionFailed { status, message } => {
            assert_eq!(*status, Some(503));
            assert_eq!(message, "maintenance");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_retryable());

    // the caller still holds the same request and lead and can resubmit by hand
    let _ = desk.submit(&request, &lead).await;
    hook.assert_hits(2);
}

#[tokio::test]
async fn test_invalid_lead_makes_no_request() {
    let server = MockServer::start();
    let hook = server.mock(|when, then| {
        when.method(POST).path("/webhook/leads");
        then.status(200);
    });

    let desk = desk_for(&server, "/webhook/leads");

    for lead in [
        CustomerLead::new("", "a@b.com", None),
        CustomerLead::new("Ana", "ana@co", None),
    ] {
        let err = desk.submit(&over_provisioned_request(), &lead).await.unwrap_err();
        assert!(matches!(err, QuoteError::InvalidLead { .. }));
    }

    hook.assert_hits(0);
}

#[tokio::test]
async fn test_empty_order_makes_no_request() {
    let server = MockServer::start();
    let hook = server.mock(|when, then| {
        when.method(POST).path("/webhook/leads");
        then.status(200);
    });

    let desk = desk_for(&server, "/webhook/leads");
    let lead = CustomerLead::new("Ana", "ana@co.com", None);
    let request = OrderRequest::from_text([(ServiceKey::Whatsapp, "0"), (ServiceKey::Voice, "2")]);

    let err = desk.submit(&request, &lead).await.unwrap_err();
    assert!(matches!(err, QuoteError::NotSubmittable { .. }));
    hook.assert_hits(0);
}

#[tokio::test]
async fn test_unreachable_webhook_is_a_network_error() {
    // nothing listens on port 9 on test machines
    let sink = WebhookSink::new("http://127.0.0.1:9/webhook", Duration::from_secs(2)).unwrap();
    let desk = QuoteDesk::new(PricingEngine::default(), sink);
    let lead = CustomerLead::new("Ana", "ana@co.com", None);

    let err = desk.submit(&over_provisioned_request(), &lead).await.unwrap_err();
    assert!(matches!(
        err,
        QuoteError::SubmissionFailed { status: None, .. }
    ));
    assert!(err.is_retryable());
    assert_eq!(
        err.user_friendly_message(),
        "Hubo un error al enviar tu pedido. Por favor, intenta nuevamente."
    );
}

#[test]
fn test_confirmation_link_for_checkout() {
    let link = whatsapp_confirmation_link("573102523739", "Plan Avanzado").unwrap();
    assert!(link.starts_with("https://wa.me/573102523739?text="));
    assert!(link.ends_with("comprobante."));
}
