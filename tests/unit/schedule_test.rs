use chrono::{Duration, NaiveDate};
use parcelapay::installments::models::{InstallmentStatus, PaymentMethod, SaleRow};
use parcelapay::installments::services::{derive_schedules, due_date_for};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn row(sale_id: i64, seq: i32, amount: Decimal, code: i32, sale_date: NaiveDate) -> SaleRow {
    SaleRow {
        sale_id,
        sale_date,
        seq,
        amount: Some(amount),
        method_code: Some(code),
        method_label: None,
        customer_id: 1,
    }
}

/// Two cash installments: the first is due on the sale date and already
/// overdue, the second lands one period later and is still open.
#[test]
fn test_cash_contract_schedule() {
    let sale_date = date(2024, 1, 10);
    let rows = vec![
        row(100, 1, dec!(50), 1, sale_date),
        row(100, 2, dec!(50), 1, sale_date),
    ];

    let schedules = derive_schedules(&rows, date(2024, 1, 20));
    assert_eq!(schedules.len(), 1);

    let contract = &schedules[0].contract;
    assert_eq!(contract.total, dec!(100));
    assert_eq!(contract.count, 2);
    assert_eq!(contract.first_date, sale_date);

    let installments = &schedules[0].installments;
    assert_eq!(installments[0].due_date, date(2024, 1, 10));
    assert_eq!(installments[0].status, InstallmentStatus::Atrasado);
    assert_eq!(installments[1].due_date, date(2024, 2, 9));
    assert_eq!(installments[1].status, InstallmentStatus::Pendente);
}

/// The same contract financed by boleto shifts every due date one period
#[test]
fn test_boleto_contract_schedule() {
    let sale_date = date(2024, 1, 10);
    let rows = vec![
        row(100, 1, dec!(50), 5, sale_date),
        row(100, 2, dec!(50), 5, sale_date),
    ];

    let schedules = derive_schedules(&rows, date(2024, 1, 20));
    let installments = &schedules[0].installments;

    assert_eq!(installments[0].due_date, date(2024, 2, 9));
    assert_eq!(installments[1].due_date, date(2024, 3, 10));
}

/// Boleto detection by label alone, any casing
#[test]
fn test_boleto_by_label() {
    let sale_date = date(2024, 1, 10);
    let mut r = row(100, 1, dec!(50), 2, sale_date);
    r.method_label = Some("Boleto".to_string());

    let schedules = derive_schedules(&[r], date(2024, 1, 1));
    assert_eq!(schedules[0].installments[0].due_date, date(2024, 2, 9));
}

/// The paid marker wins over lateness
#[test]
fn test_paid_overrides_overdue() {
    let rows = vec![row(100, 1, dec!(50), 7, date(2020, 1, 1))];

    let schedules = derive_schedules(&rows, date(2024, 6, 1));
    assert_eq!(
        schedules[0].installments[0].status,
        InstallmentStatus::Pago
    );
}

/// An installment due exactly today is pending, not overdue
#[test]
fn test_due_today_is_pending() {
    let today = date(2024, 1, 10);
    let rows = vec![row(100, 1, dec!(50), 1, today)];

    let schedules = derive_schedules(&rows, today);
    assert_eq!(
        schedules[0].installments[0].status,
        InstallmentStatus::Pendente
    );
}

#[test]
fn test_empty_rows_yield_empty_result() {
    assert!(derive_schedules(&[], date(2024, 1, 1)).is_empty());
}

/// Contracts come back newest first
#[test]
fn test_contracts_sorted_descending() {
    let d = date(2024, 1, 10);
    let rows = vec![
        row(50, 1, dec!(10), 1, d),
        row(100, 1, dec!(20), 1, d),
        row(100, 2, dec!(20), 1, d),
    ];

    let schedules = derive_schedules(&rows, d);
    let numbers: Vec<i64> = schedules
        .iter()
        .map(|s| s.contract.contract_number)
        .collect();
    assert_eq!(numbers, vec![100, 50]);
}

/// Count is back-filled onto every installment, including rows processed
/// before the max sequence was seen
#[test]
fn test_count_backfilled_on_all_installments() {
    let d = date(2024, 1, 10);
    let rows = vec![
        row(100, 1, dec!(10), 1, d),
        row(100, 2, dec!(10), 1, d),
        row(100, 5, dec!(10), 1, d),
    ];

    let schedules = derive_schedules(&rows, d);
    for installment in &schedules[0].installments {
        assert_eq!(installment.count, 5);
    }
}

/// Identifier and cross-reference fields line up with the source row
#[test]
fn test_identifier_fields() {
    let d = date(2024, 1, 10);
    let rows = vec![row(12764, 3, dec!(10), 1, d)];

    let schedules = derive_schedules(&rows, d);
    let installment = &schedules[0].installments[0];

    assert_eq!(installment.id, "12764-3");
    assert_eq!(installment.contract_id, "12764");
    assert_eq!(installment.index, 3);
    assert_eq!(installment.pcrnot, 12764);
    assert!(installment.pix_charge_id.is_none());
}

#[test]
fn test_due_date_formula() {
    let first = date(2024, 3, 1);

    assert_eq!(due_date_for(first, 1, PaymentMethod::Cash), first);
    assert_eq!(
        due_date_for(first, 4, PaymentMethod::Cash),
        first + Duration::days(90)
    );
    assert_eq!(
        due_date_for(first, 1, PaymentMethod::Boleto),
        first + Duration::days(30)
    );
    assert_eq!(
        due_date_for(first, 4, PaymentMethod::Boleto),
        first + Duration::days(120)
    );
    assert_eq!(due_date_for(first, 2, PaymentMethod::Other), first + Duration::days(30));
}

fn arb_row() -> impl Strategy<Value = SaleRow> {
    (
        1i64..4i64,
        1i32..6i32,
        0i64..10_000i64,
        prop::sample::select(vec![1, 3, 5, 7]),
        0i64..60i64,
    )
        .prop_map(|(sale_id, seq, cents, code, day_offset)| SaleRow {
            sale_id,
            sale_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(day_offset),
            seq,
            amount: Some(Decimal::new(cents, 2)),
            method_code: Some(code),
            method_label: None,
            customer_id: 1,
        })
}

/// Key facts of one installment, independent of emission order
type InstallmentFacts = (String, NaiveDate, String, Decimal);

fn contract_facts(
    schedules: &[parcelapay::installments::models::ContractSchedule],
) -> BTreeMap<i64, (Decimal, i32, NaiveDate, Vec<InstallmentFacts>)> {
    schedules
        .iter()
        .map(|s| {
            let mut facts: Vec<InstallmentFacts> = s
                .installments
                .iter()
                .map(|i| {
                    (
                        i.id.clone(),
                        i.due_date,
                        i.status.to_string(),
                        i.amount,
                    )
                })
                .collect();
            facts.sort();
            (
                s.contract.contract_number,
                (s.contract.total, s.contract.count, s.contract.first_date, facts),
            )
        })
        .collect()
}

proptest! {
    /// Totals, counts, first dates, due dates and statuses do not depend on
    /// the order rows arrive in
    #[test]
    fn prop_derivation_is_order_independent(rows in prop::collection::vec(arb_row(), 0..12)) {
        let today = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();

        let forward = derive_schedules(&rows, today);
        let mut reversed_rows = rows.clone();
        reversed_rows.reverse();
        let reversed = derive_schedules(&reversed_rows, today);

        prop_assert_eq!(contract_facts(&forward), contract_facts(&reversed));
    }

    /// Contract totals equal the sum of row amounts
    #[test]
    fn prop_total_is_sum_of_amounts(rows in prop::collection::vec(arb_row(), 1..12)) {
        let today = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        let schedules = derive_schedules(&rows, today);

        for schedule in &schedules {
            let expected: Decimal = rows
                .iter()
                .filter(|r| r.sale_id == schedule.contract.contract_number)
                .map(|r| r.amount.unwrap_or(Decimal::ZERO))
                .sum();
            prop_assert_eq!(schedule.contract.total, expected);
        }
    }

    /// Every installment carries its contract's max sequence as count
    #[test]
    fn prop_count_is_max_seq(rows in prop::collection::vec(arb_row(), 1..12)) {
        let today = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        let schedules = derive_schedules(&rows, today);

        for schedule in &schedules {
            let expected = rows
                .iter()
                .filter(|r| r.sale_id == schedule.contract.contract_number)
                .map(|r| r.seq)
                .max()
                .unwrap_or(0);
            prop_assert_eq!(schedule.contract.count, expected);
            for installment in &schedule.installments {
                prop_assert_eq!(installment.count, expected);
            }
        }
    }

    /// Paid marker forces pago; otherwise status follows the date comparison
    #[test]
    fn prop_status_rules(rows in prop::collection::vec(arb_row(), 1..12)) {
        let today = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        let schedules = derive_schedules(&rows, today);

        for schedule in &schedules {
            for installment in &schedule.installments {
                match installment.status {
                    InstallmentStatus::Pago => {}
                    InstallmentStatus::Atrasado => prop_assert!(installment.due_date < today),
                    InstallmentStatus::Pendente => prop_assert!(installment.due_date >= today),
                }
            }
        }
    }

    /// Contract order is strictly descending by sale id
    #[test]
    fn prop_sorted_descending(rows in prop::collection::vec(arb_row(), 0..12)) {
        let today = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        let schedules = derive_schedules(&rows, today);

        for pair in schedules.windows(2) {
            prop_assert!(pair[0].contract.contract_number > pair[1].contract.contract_number);
        }
    }
}
