use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Payment rail used by the portal; the only one offered today
pub const PIX_METHOD: &str = "pix";

/// Lifecycle status of a payment record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Charge created, awaiting gateway confirmation
    Pending,
    /// Gateway confirmed the payment
    Paid,
    /// Charge expired or was rejected
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for PaymentStatus {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.as_str() {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("Invalid payment status: {}", value)),
        }
    }
}

/// Persisted record of a payment attempt against one installment.
///
/// `provider_id` is the gateway's charge id and the key the webhook uses to
/// find this record again.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub id: String,
    /// `"{sale_id}-{seq}"` of the installment being paid
    pub installment_id: String,
    pub amount: Decimal,
    pub method: String,
    #[sqlx(try_from = "String")]
    pub status: PaymentStatus,
    pub provider_id: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Payment {
    /// Create a pending payment record for a freshly issued charge
    pub fn new(installment_id: String, amount: Decimal, provider_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            installment_id,
            amount,
            method: PIX_METHOD.to_string(),
            status: PaymentStatus::Pending,
            provider_id: Some(provider_id),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
