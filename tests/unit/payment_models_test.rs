use parcelapay::installments::models::InstallmentId;
use parcelapay::payments::models::{PaymentStatus, WebhookEvent};
use parcelapay::payments::{ChargeStatus, PixCharge};

/// Full PIX QR code confirmation as the gateway documents it
#[test]
fn test_pix_webhook_payload() {
    let payload = serde_json::json!({
        "event": "billing.paid",
        "data": {
            "pixQrCode": {
                "id": "pix_char_123456",
                "status": "PAID",
                "amount": 5000
            }
        }
    });

    let event: WebhookEvent = serde_json::from_value(payload).unwrap();
    assert!(event.is_billing_paid());

    let pix = event.data.pix_qr_code.expect("pixQrCode payload");
    assert_eq!(pix.id, "pix_char_123456");
}

/// Full billing confirmation, products carrying installment references
#[test]
fn test_billing_webhook_payload() {
    let payload = serde_json::json!({
        "event": "billing.paid",
        "data": {
            "billing": {
                "id": "bill_xxx",
                "status": "PAID",
                "products": [
                    { "externalId": "12764-1", "quantity": 1 },
                    { "externalId": "12764-2" }
                ]
            }
        }
    });

    let event: WebhookEvent = serde_json::from_value(payload).unwrap();
    let billing = event.data.billing.expect("billing payload");

    let references: Vec<InstallmentId> = billing
        .products
        .iter()
        .filter_map(|p| p.external_id.as_deref())
        .filter_map(|id| id.parse().ok())
        .collect();

    assert_eq!(
        references,
        vec![InstallmentId::new(12764, 1), InstallmentId::new(12764, 2)]
    );
}

/// Events other than billing.paid must be ignorable without touching data
#[test]
fn test_unrelated_event() {
    let event: WebhookEvent = serde_json::from_value(serde_json::json!({
        "event": "billing.created",
        "data": { "billing": { "id": "bill_yyy", "status": "PENDING" } }
    }))
    .unwrap();

    assert!(!event.is_billing_paid());
}

#[test]
fn test_charge_round_trips_camel_case() {
    let charge = PixCharge {
        id: "pix_char_1".to_string(),
        br_code: Some("00020126".to_string()),
        br_code_base64: Some("aW1n".to_string()),
        status: Some("PENDING".to_string()),
        expires_at: Some("2024-01-10T12:00:00Z".to_string()),
    };

    let json = serde_json::to_value(&charge).unwrap();
    assert_eq!(json["brCode"], "00020126");
    assert_eq!(json["brCodeBase64"], "aW1n");
    assert_eq!(json["expiresAt"], "2024-01-10T12:00:00Z");

    let back: PixCharge = serde_json::from_value(json).unwrap();
    assert_eq!(back.id, charge.id);
}

#[test]
fn test_charge_status_shape() {
    let status: ChargeStatus = serde_json::from_value(serde_json::json!({
        "status": "PAID",
        "expiresAt": null
    }))
    .unwrap();

    assert_eq!(status.status, "PAID");
    assert!(status.expires_at.is_none());
}

#[test]
fn test_payment_status_parsing() {
    assert_eq!(
        PaymentStatus::try_from("pending".to_string()).unwrap(),
        PaymentStatus::Pending
    );
    assert!(PaymentStatus::try_from("PAID".to_string()).is_err());
}

#[test]
fn test_installment_id_is_the_join_key() {
    let id: InstallmentId = "100-2".parse().unwrap();
    assert_eq!(id.sale_id, 100);
    assert_eq!(id.seq, 2);
    assert_eq!(id.to_string(), "100-2");
}
