use sqlx::PgPool;

use crate::core::Result;
use crate::modules::installments::models::{SaleRow, PAID_MARKER_CODE};

/// Repository for the legacy sales table and the customer display lookup
pub struct SaleRepository {
    pool: PgPool,
}

impl SaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All installment rows across all of a customer's contracts.
    ///
    /// Ordered newest contract first, installments ascending, which is the
    /// order the scheduler presents them back in.
    pub async fn find_by_customer(&self, customer_id: i64) -> Result<Vec<SaleRow>> {
        let rows = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT sale_id, sale_date, seq, amount, method_code, method_label, customer_id
            FROM sales
            WHERE customer_id = $1
            ORDER BY sale_id DESC, seq ASC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// All installment rows of exactly one contract
    pub async fn find_by_contract(&self, sale_id: i64) -> Result<Vec<SaleRow>> {
        let rows = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT sale_id, sale_date, seq, amount, method_code, method_label, customer_id
            FROM sales
            WHERE sale_id = $1
            ORDER BY seq ASC
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Display name of a customer, if one is registered
    pub async fn customer_name(&self, customer_id: i64) -> Result<Option<String>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT name FROM customers WHERE id = $1")
                .bind(customer_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|r| r.0))
    }

    /// Sets the paid marker on one installment row.
    ///
    /// Invoked by the payment flow on confirmation; returns the number of
    /// rows touched so the caller can notice a dangling reference.
    pub async fn mark_paid(&self, sale_id: i64, seq: i32) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE sales
            SET method_code = $1
            WHERE sale_id = $2 AND seq = $3
            "#,
        )
        .bind(PAID_MARKER_CODE)
        .bind(sale_id)
        .bind(seq)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
