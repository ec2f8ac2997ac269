pub mod payment;
pub mod webhook;

pub use payment::{Payment, PaymentStatus, PIX_METHOD};
pub use webhook::{BillingPaid, BillingProduct, PixQrCodePaid, WebhookData, WebhookEvent};
