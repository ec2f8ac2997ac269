use actix_web::web;

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Payment, PaymentStatus, WebhookEvent};
pub use repositories::PaymentRepository;
pub use services::{AbacatePayClient, ChargeStatus, PaymentService, PixCharge, WebhookOutcome};

/// Configure all payment and webhook routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    controllers::payment_controller::configure(cfg);
    controllers::webhook_controller::configure(cfg);
}
