pub mod abacatepay;
pub mod payment_service;

pub use abacatepay::{AbacatePayClient, ChargeStatus, PixCharge};
pub use payment_service::{PaymentService, WebhookOutcome};
