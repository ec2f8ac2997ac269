// Webhook receiver for AbacatePay payment confirmations
//
// Endpoints:
// - POST /webhooks/abacatepay - Event delivery, guarded by a shared secret
// - GET /webhooks/abacatepay - Liveness acknowledgment (the gateway probes the URL)

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;
use crate::core::{AppError, Result};
use crate::modules::payments::models::WebhookEvent;
use crate::modules::payments::services::{AbacatePayClient, PaymentService, WebhookOutcome};

#[derive(Debug, Deserialize)]
pub struct WebhookQuery {
    #[serde(rename = "webhookSecret")]
    pub webhook_secret: Option<String>,
}

/// POST /webhooks/abacatepay
///
/// Processes `billing.paid` events; everything else is acknowledged and
/// dropped so the gateway does not keep retrying.
pub async fn receive_webhook(
    query: web::Query<WebhookQuery>,
    body: web::Json<WebhookEvent>,
    pool: web::Data<PgPool>,
    gateway: web::Data<AbacatePayClient>,
    config: web::Data<Config>,
) -> Result<HttpResponse> {
    if query.webhook_secret.as_deref() != Some(config.abacatepay.webhook_secret.as_str()) {
        return Err(AppError::unauthorized("Invalid webhook secret"));
    }

    let event = body.into_inner();
    info!(
        event = event.event.as_deref().unwrap_or("<none>"),
        "Webhook received"
    );

    let service = PaymentService::new(pool.get_ref().clone(), gateway.get_ref().clone());
    let outcome = service.process_webhook(event).await?;

    let response = match outcome {
        WebhookOutcome::Processed => serde_json::json!({ "ok": true }),
        WebhookOutcome::Ignored { event } => {
            serde_json::json!({ "ok": true, "ignored": true, "event": event })
        }
        WebhookOutcome::Unrecognized => {
            serde_json::json!({ "ok": true, "ignored": true })
        }
    };

    Ok(HttpResponse::Ok().json(response))
}

/// GET /webhooks/abacatepay
pub async fn webhook_probe() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "abacatepay-webhook"
    }))
}

/// Configure webhook routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/webhooks")
            .route("/abacatepay", web::post().to(receive_webhook))
            .route("/abacatepay", web::get().to(webhook_probe)),
    );
}
