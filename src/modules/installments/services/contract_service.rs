use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::installments::models::{ContractSchedule, Installment};
use crate::modules::installments::repositories::SaleRepository;
use crate::modules::installments::services::derive_schedules;

/// Service tying the row source to the schedule derivation
pub struct ContractService {
    repository: SaleRepository,
}

/// Everything a customer sees on their portal page
#[derive(Debug, Serialize)]
pub struct CustomerSchedules {
    pub customer_name: Option<String>,
    pub contracts: Vec<ContractSchedule>,
}

/// Single-contract view, looked up by contract number
#[derive(Debug, Serialize)]
pub struct ContractDetail {
    pub contract: ContractSummary,
    pub installments: Vec<Installment>,
}

#[derive(Debug, Serialize)]
pub struct ContractSummary {
    pub id: String,
    pub token: String,
    pub customer_name: String,
    pub contract_number: String,
    pub total_amount: Decimal,
}

impl ContractService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: SaleRepository::new(pool),
        }
    }

    /// Schedules for every contract of one customer.
    ///
    /// A customer with no rows gets an empty contract list, not an error.
    pub async fn schedules_for_customer(
        &self,
        customer_id: i64,
        today: NaiveDate,
    ) -> Result<CustomerSchedules> {
        let customer_name = self.repository.customer_name(customer_id).await?;
        let rows = self.repository.find_by_customer(customer_id).await?;

        info!(
            customer_id,
            row_count = rows.len(),
            "Deriving customer schedules"
        );

        Ok(CustomerSchedules {
            customer_name,
            contracts: derive_schedules(&rows, today),
        })
    }

    /// Schedule of exactly one contract; unknown numbers are a 404
    pub async fn schedule_for_contract(
        &self,
        contract_number: i64,
        today: NaiveDate,
    ) -> Result<ContractDetail> {
        let rows = self.repository.find_by_contract(contract_number).await?;

        if rows.is_empty() {
            return Err(AppError::not_found(format!(
                "Contract {} not found",
                contract_number
            )));
        }

        let customer_id = rows[0].customer_id;

        let schedule = derive_schedules(&rows, today)
            .pop()
            .ok_or_else(|| AppError::internal("schedule derivation lost a contract"))?;

        Ok(ContractDetail {
            contract: ContractSummary {
                id: contract_number.to_string(),
                token: contract_number.to_string(),
                customer_name: format!("Cliente #{}", customer_id),
                contract_number: contract_number.to_string(),
                total_amount: schedule.contract.total,
            },
            installments: schedule.installments,
        })
    }
}
