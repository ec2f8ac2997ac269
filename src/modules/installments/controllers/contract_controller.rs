// HTTP handlers for the contract-lookup endpoints
//
// Endpoints:
// - GET /customers/{token}/contracts - All contracts for an obfuscated customer token
// - GET /contracts/{contract_number} - One contract by its plain number

use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::PgPool;

use crate::core::token::decode_customer_id;
use crate::core::{AppError, Result};
use crate::modules::installments::services::ContractService;

/// GET /customers/{token}/contracts
///
/// Decodes the customer token, derives every contract's schedule and returns
/// it with the customer's display name. An unknown-but-valid token yields an
/// empty contract list.
pub async fn get_customer_contracts(
    path: web::Path<String>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let token = path.into_inner();
    let customer_id = decode_customer_id(&token)
        .ok_or_else(|| AppError::validation(format!("Invalid customer token: {}", token)))?;

    let service = ContractService::new(pool.get_ref().clone());
    let today = Utc::now().date_naive();

    let schedules = service.schedules_for_customer(customer_id, today).await?;

    Ok(HttpResponse::Ok().json(schedules))
}

/// GET /contracts/{contract_number}
///
/// Returns one contract with its derived installments, or 404 when no rows
/// exist for the number.
pub async fn get_contract(
    path: web::Path<i64>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let contract_number = path.into_inner();

    let service = ContractService::new(pool.get_ref().clone());
    let today = Utc::now().date_naive();

    let detail = service
        .schedule_for_contract(contract_number, today)
        .await?;

    Ok(HttpResponse::Ok().json(detail))
}

/// Configure contract lookup routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/customers/{token}/contracts",
        web::get().to(get_customer_contracts),
    )
    .route("/contracts/{contract_number}", web::get().to(get_contract));
}
