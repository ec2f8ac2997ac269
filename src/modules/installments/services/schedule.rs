//! Due-date derivation and status classification for installment rows.
//!
//! This is the one piece of real business logic in the portal: it turns raw
//! sale rows into the schedule customers see. It is a pure function of its
//! inputs and the injected date, so every endpoint that renders a schedule
//! goes through it and gets the same answer.

use std::collections::{HashMap, HashSet};

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use tracing::warn;

use crate::modules::installments::models::{
    Contract, ContractSchedule, Installment, InstallmentStatus, PaymentMethod, SaleRow,
};

/// Calendar days between consecutive installments
const PERIOD_DAYS: i64 = 30;

/// Per-contract running aggregate built in the first pass
struct ContractAccumulator {
    first_date: NaiveDate,
    total: Decimal,
    count: i32,
}

/// Derives contracts and installments from raw sale rows.
///
/// `today` is the reference date for overdue classification; it is threaded
/// in by the caller rather than read from a clock so results are
/// reproducible.
///
/// Two passes: the first settles each contract's earliest date, total and
/// installment count; the second computes due dates and statuses against
/// those settled values. Due dates therefore do not depend on the order rows
/// arrive in.
///
/// Contracts come back sorted by sale id descending (newest first);
/// installments keep the row order the caller presented.
pub fn derive_schedules(rows: &[SaleRow], today: NaiveDate) -> Vec<ContractSchedule> {
    let mut accumulators: HashMap<i64, ContractAccumulator> = HashMap::new();

    for row in rows {
        let entry = accumulators
            .entry(row.sale_id)
            .or_insert(ContractAccumulator {
                first_date: row.sale_date,
                total: Decimal::ZERO,
                count: 0,
            });

        if row.sale_date < entry.first_date {
            entry.first_date = row.sale_date;
        }
        entry.total += row.amount_or_zero();
        entry.count = entry.count.max(row.seq);
    }

    let mut installments: HashMap<i64, Vec<Installment>> = HashMap::new();
    let mut seen: HashSet<(i64, i32)> = HashSet::new();

    for row in rows {
        let acc = &accumulators[&row.sale_id];

        if !seen.insert((row.sale_id, row.seq)) {
            // Upstream data-quality issue: both rows are emitted and share an id
            warn!(
                sale_id = row.sale_id,
                seq = row.seq,
                "duplicate installment sequence within contract"
            );
        }

        let due_date = due_date_for(acc.first_date, row.seq, row.payment_method());
        let status = classify(row.is_paid(), due_date, today);

        installments
            .entry(row.sale_id)
            .or_default()
            .push(Installment {
                id: format!("{}-{}", row.sale_id, row.seq),
                contract_id: row.sale_id.to_string(),
                index: row.seq,
                count: acc.count,
                amount: row.amount_or_zero(),
                due_date,
                status,
                pix_charge_id: None,
                pcrnot: row.sale_id,
            });
    }

    let mut schedules: Vec<ContractSchedule> = accumulators
        .into_iter()
        .map(|(sale_id, acc)| ContractSchedule {
            contract: Contract {
                contract_number: sale_id,
                total: acc.total,
                count: acc.count,
                first_date: acc.first_date,
            },
            installments: installments.remove(&sale_id).unwrap_or_default(),
        })
        .collect();

    schedules.sort_by(|a, b| b.contract.contract_number.cmp(&a.contract.contract_number));
    schedules
}

/// Due date of the installment at `seq`, counted from the contract's first
/// date.
///
/// Boleto sales pay the first installment one period after the sale, so the
/// whole schedule shifts by one period; every other method has the first
/// installment due on the sale date itself.
pub fn due_date_for(first_date: NaiveDate, seq: i32, method: PaymentMethod) -> NaiveDate {
    let periods = if method.shifts_due_date() {
        i64::from(seq)
    } else {
        i64::from(seq) - 1
    };

    first_date + Duration::days(PERIOD_DAYS * periods)
}

/// Status at `today`: the paid marker wins outright, then a strict date-only
/// comparison separates overdue from open.
fn classify(is_paid: bool, due_date: NaiveDate, today: NaiveDate) -> InstallmentStatus {
    if is_paid {
        InstallmentStatus::Pago
    } else if due_date < today {
        InstallmentStatus::Atrasado
    } else {
        InstallmentStatus::Pendente
    }
}
