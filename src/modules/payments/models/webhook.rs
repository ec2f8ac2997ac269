use serde::Deserialize;

/// The only gateway event the portal acts on
pub const BILLING_PAID_EVENT: &str = "billing.paid";

/// Incoming AbacatePay webhook event.
///
/// The gateway sends `billing.paid` for both payment flavors: a PIX QR code
/// payment carries `data.pixQrCode`, a hosted billing payment carries
/// `data.billing` with product references. Unknown fields are ignored so
/// gateway payload additions do not break the receiver.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    pub event: Option<String>,
    #[serde(default)]
    pub data: WebhookData,
}

impl WebhookEvent {
    pub fn is_billing_paid(&self) -> bool {
        self.event.as_deref() == Some(BILLING_PAID_EVENT)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookData {
    #[serde(rename = "pixQrCode")]
    pub pix_qr_code: Option<PixQrCodePaid>,
    pub billing: Option<BillingPaid>,
}

/// PIX QR code payment confirmation
#[derive(Debug, Clone, Deserialize)]
pub struct PixQrCodePaid {
    pub id: String,
    pub status: Option<String>,
    pub amount: Option<i64>,
}

/// Hosted billing payment confirmation
#[derive(Debug, Clone, Deserialize)]
pub struct BillingPaid {
    pub id: String,
    pub status: Option<String>,
    #[serde(default)]
    pub products: Vec<BillingProduct>,
}

/// Product line inside a billing payload; `externalId` is our installment id
#[derive(Debug, Clone, Deserialize)]
pub struct BillingProduct {
    #[serde(rename = "externalId")]
    pub external_id: Option<String>,
}
