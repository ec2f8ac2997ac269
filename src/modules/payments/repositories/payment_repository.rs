use sqlx::PgPool;

use crate::core::Result;
use crate::modules::payments::models::{Payment, PaymentStatus};

/// Repository for payment records
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a freshly created payment record
    pub async fn insert(&self, payment: &Payment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO payments (id, installment_id, amount, method, status, provider_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&payment.id)
        .bind(&payment.installment_id)
        .bind(payment.amount)
        .bind(&payment.method)
        .bind(payment.status.as_str())
        .bind(&payment.provider_id)
        .bind(payment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Flip pending payments with this gateway charge id to paid.
    ///
    /// Only pending rows transition, so replayed webhooks are no-ops.
    pub async fn mark_paid_by_provider(&self, provider_id: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE payments
            SET status = $1
            WHERE provider_id = $2 AND status = $3
            "#,
        )
        .bind(PaymentStatus::Paid.as_str())
        .bind(provider_id)
        .bind(PaymentStatus::Pending.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Installment id recorded for a gateway charge, if any
    pub async fn installment_for_provider(&self, provider_id: &str) -> Result<Option<String>> {
        let row: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT installment_id
            FROM payments
            WHERE provider_id = $1
            LIMIT 1
            "#,
        )
        .bind(provider_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.0))
    }
}
