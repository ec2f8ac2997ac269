use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Point-in-time lifecycle status of an installment.
///
/// Never stored; recomputed against the current date on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallmentStatus {
    /// Open, due date not yet reached
    Pendente,
    /// Settled (paid marker present on the row)
    Pago,
    /// Open and past its due date
    Atrasado,
}

impl InstallmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pendente => "pendente",
            Self::Pago => "pago",
            Self::Atrasado => "atrasado",
        }
    }
}

impl fmt::Display for InstallmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One derived installment of a contract
#[derive(Debug, Clone, Serialize)]
pub struct Installment {
    /// `"{sale_id}-{seq}"`, the join key used by the payment flow
    pub id: String,
    pub contract_id: String,
    /// 1-based position within the contract
    pub index: i32,
    /// Total installments in the contract, identical on every sibling
    pub count: i32,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub status: InstallmentStatus,
    /// Gateway charge id, populated only while a payment is in flight
    pub pix_charge_id: Option<String>,
    /// The contract's sale id, kept for payment write-back
    pub pcrnot: i64,
}

/// Contract-level aggregate over its installment rows
#[derive(Debug, Clone, Serialize)]
pub struct Contract {
    pub contract_number: i64,
    pub total: Decimal,
    pub count: i32,
    pub first_date: NaiveDate,
}

/// A derived contract paired with its installments
#[derive(Debug, Clone, Serialize)]
pub struct ContractSchedule {
    pub contract: Contract,
    pub installments: Vec<Installment>,
}

/// Parsed form of the `"{sale_id}-{seq}"` installment identifier.
///
/// This string is the only key the payment gateway round-trips back to us,
/// so both halves must be strictly numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallmentId {
    pub sale_id: i64,
    pub seq: i32,
}

impl InstallmentId {
    pub fn new(sale_id: i64, seq: i32) -> Self {
        Self { sale_id, seq }
    }
}

impl fmt::Display for InstallmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.sale_id, self.seq)
    }
}

impl FromStr for InstallmentId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (sale, seq) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid installment id: {}", s))?;

        let sale_id: i64 = sale
            .parse()
            .map_err(|_| format!("Invalid sale id in installment id: {}", s))?;
        let seq: i32 = seq
            .parse()
            .map_err(|_| format!("Invalid sequence in installment id: {}", s))?;

        Ok(Self { sale_id, seq })
    }
}
