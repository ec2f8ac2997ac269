// HTTP handlers for the payment endpoints
//
// Endpoints:
// - POST /payments/charges - Issue a PIX QR code for an installment
// - GET /payments/charges/{charge_id}/status - Gateway-side charge status
// - POST /payments/mark-paid - Manually confirm a charge
// - POST /payments/simulate - Sandbox payment (dev mode only)

use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;

use crate::config::Config;
use crate::core::{AppError, Result};
use crate::modules::installments::models::InstallmentId;
use crate::modules::payments::services::{AbacatePayClient, PaymentService};

#[derive(Debug, Deserialize)]
pub struct CreateChargeRequest {
    pub installment_id: String,
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct MarkPaidRequest {
    pub charge_id: String,
    pub sale_id: Option<i64>,
    pub seq: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct SimulatePaymentRequest {
    pub charge_id: String,
}

/// POST /payments/charges
pub async fn create_charge(
    request: web::Json<CreateChargeRequest>,
    pool: web::Data<PgPool>,
    gateway: web::Data<AbacatePayClient>,
) -> Result<HttpResponse> {
    let service = PaymentService::new(pool.get_ref().clone(), gateway.get_ref().clone());

    let charge = service
        .create_charge(&request.installment_id, request.amount)
        .await?;

    Ok(HttpResponse::Ok().json(charge))
}

/// GET /payments/charges/{charge_id}/status
pub async fn charge_status(
    path: web::Path<String>,
    pool: web::Data<PgPool>,
    gateway: web::Data<AbacatePayClient>,
) -> Result<HttpResponse> {
    let charge_id = path.into_inner();
    if charge_id.trim().is_empty() {
        return Err(AppError::validation("Missing charge id"));
    }

    let service = PaymentService::new(pool.get_ref().clone(), gateway.get_ref().clone());
    let status = service.charge_status(&charge_id).await?;

    Ok(HttpResponse::Ok().json(status))
}

/// POST /payments/mark-paid
///
/// Confirms a charge out of band. When the sale row pair is supplied the
/// paid marker is written back as well.
pub async fn mark_paid(
    request: web::Json<MarkPaidRequest>,
    pool: web::Data<PgPool>,
    gateway: web::Data<AbacatePayClient>,
) -> Result<HttpResponse> {
    if request.charge_id.trim().is_empty() {
        return Err(AppError::validation("Missing charge id"));
    }

    let installment = match (request.sale_id, request.seq) {
        (Some(sale_id), Some(seq)) => Some(InstallmentId::new(sale_id, seq)),
        _ => None,
    };

    let service = PaymentService::new(pool.get_ref().clone(), gateway.get_ref().clone());
    let updated = service.mark_paid(&request.charge_id, installment).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "ok": true, "updated": updated })))
}

/// POST /payments/simulate
pub async fn simulate_payment(
    request: web::Json<SimulatePaymentRequest>,
    pool: web::Data<PgPool>,
    gateway: web::Data<AbacatePayClient>,
    config: web::Data<Config>,
) -> Result<HttpResponse> {
    if !config.is_development() {
        return Err(AppError::not_found(
            "Payment simulation is not available in this environment",
        ));
    }

    if request.charge_id.trim().is_empty() {
        return Err(AppError::validation("Missing charge id"));
    }

    let service = PaymentService::new(pool.get_ref().clone(), gateway.get_ref().clone());
    let data = service.simulate_payment(&request.charge_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "ok": true, "data": data })))
}

/// Configure payment routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/payments")
            .route("/charges", web::post().to(create_charge))
            .route("/charges/{charge_id}/status", web::get().to(charge_status))
            .route("/mark-paid", web::post().to(mark_paid))
            .route("/simulate", web::post().to(simulate_payment)),
    );
}
