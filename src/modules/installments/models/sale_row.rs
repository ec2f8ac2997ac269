use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Method code meaning "this installment has been paid".
///
/// The legacy sales table overloads `method_code`: values 1 and 5 describe
/// how the sale was financed, 7 marks the installment as settled.
pub const PAID_MARKER_CODE: i32 = 7;

const CASH_CODE: i32 = 1;
const BOLETO_CODE: i32 = 5;

/// One raw installment row from the sales table.
///
/// A contract is the group of rows sharing a `sale_id`; `seq` is the 1-based
/// position of the installment within it.
#[derive(Debug, Clone, FromRow)]
pub struct SaleRow {
    pub sale_id: i64,
    pub sale_date: NaiveDate,
    pub seq: i32,
    pub amount: Option<Decimal>,
    pub method_code: Option<i32>,
    pub method_label: Option<String>,
    pub customer_id: i64,
}

impl SaleRow {
    /// Payment method of the sale, split out from the overloaded code/label pair
    pub fn payment_method(&self) -> PaymentMethod {
        PaymentMethod::classify(self.method_code, self.method_label.as_deref())
    }

    /// Whether the row carries the paid marker
    pub fn is_paid(&self) -> bool {
        self.method_code == Some(PAID_MARKER_CODE)
    }

    /// Row amount, with absent values treated as zero
    pub fn amount_or_zero(&self) -> Decimal {
        self.amount.unwrap_or(Decimal::ZERO)
    }
}

/// How a sale was financed, as far as scheduling cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    Boleto,
    Other,
}

impl PaymentMethod {
    /// Classifies the raw code/label pair.
    ///
    /// The label wins ties: a row labeled `BOLETO` is a boleto sale whatever
    /// its code says, matching how the upstream system fills these columns.
    pub fn classify(code: Option<i32>, label: Option<&str>) -> Self {
        let label = label.map(str::to_uppercase);

        if label.as_deref() == Some("BOLETO") || code == Some(BOLETO_CODE) {
            PaymentMethod::Boleto
        } else if label.as_deref() == Some("DINHEIRO") || code == Some(CASH_CODE) {
            PaymentMethod::Cash
        } else {
            PaymentMethod::Other
        }
    }

    /// Boleto sales push every due date one period later
    pub fn shifts_due_date(&self) -> bool {
        matches!(self, PaymentMethod::Boleto)
    }
}
