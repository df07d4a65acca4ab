//! Tests for report derivation and presentation.

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use quill_shared::types::{AccountId, TransactionId};

use crate::chart::MainAccountKind;
use crate::ledger::EntryType;

use super::service::{
    balance_sheet_summary, pnl_accounts, reporting_balances, sort_audit_rows, trial_balance_rows,
};
use super::types::{AccountActivity, AccountProfile, AuditRow};

fn profile(code: i32, main: MainAccountKind) -> AccountProfile {
    AccountProfile {
        account_id: AccountId::from_uuid(Uuid::from_u128(code.unsigned_abs().into())),
        code,
        name: format!("Account {code}"),
        main,
        sub_account_code: code / 100,
        sub_account: format!("Sub {}", code / 100),
        category_code: code / 10,
        category: format!("Category {}", code / 10),
    }
}

fn activity(
    code: i32,
    main: MainAccountKind,
    debits: Decimal,
    credits: Decimal,
) -> AccountActivity {
    AccountActivity {
        profile: profile(code, main),
        debits,
        credits,
    }
}

#[test]
fn test_trial_balance_splits_net_into_columns() {
    let rows = trial_balance_rows(vec![
        activity(1010, MainAccountKind::Assets, dec!(100), dec!(0)),
        activity(2010, MainAccountKind::Liabilities, dec!(0), dec!(100)),
    ]);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].debit, dec!(100));
    assert_eq!(rows[0].credit, dec!(0));
    assert_eq!(rows[1].debit, dec!(0));
    assert_eq!(rows[1].credit, dec!(100));
}

#[test]
fn test_trial_balance_keeps_zero_balance_accounts() {
    let rows = trial_balance_rows(vec![activity(
        1010,
        MainAccountKind::Assets,
        dec!(40),
        dec!(40),
    )]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].debit, dec!(0));
    assert_eq!(rows[0].credit, dec!(0));
}

#[test]
fn test_trial_balance_orders_by_fixed_enumeration() {
    let rows = trial_balance_rows(vec![
        activity(5010, MainAccountKind::Revenue, dec!(0), dec!(10)),
        activity(1010, MainAccountKind::Assets, dec!(10), dec!(0)),
        activity(4010, MainAccountKind::Expenses, dec!(5), dec!(0)),
        activity(3010, MainAccountKind::Equity, dec!(0), dec!(5)),
    ]);

    let mains: Vec<MainAccountKind> = rows.iter().map(|r| r.main_account).collect();
    assert_eq!(
        mains,
        vec![
            MainAccountKind::Assets,
            MainAccountKind::Equity,
            MainAccountKind::Expenses,
            MainAccountKind::Revenue,
        ]
    );
}

#[test]
fn test_reporting_balances_drops_zero_rows() {
    let balances = reporting_balances(vec![
        activity(1010, MainAccountKind::Assets, dec!(100), dec!(0)),
        activity(1020, MainAccountKind::Assets, dec!(25), dec!(25)),
        activity(2010, MainAccountKind::Liabilities, dec!(0), dec!(100)),
    ]);

    assert_eq!(balances.len(), 2);
    assert_eq!(balances[0].amount, dec!(100));
    assert_eq!(balances[1].amount, dec!(-100));
}

#[test]
fn test_balance_sheet_summary_sums_categories() {
    let balances = reporting_balances(vec![
        activity(1011, MainAccountKind::Assets, dec!(100), dec!(0)),
        activity(1012, MainAccountKind::Assets, dec!(50), dec!(0)),
        activity(2010, MainAccountKind::Liabilities, dec!(0), dec!(150)),
    ]);

    let lines = balance_sheet_summary(&balances);
    assert_eq!(lines.len(), 2);
    // 1011 and 1012 share category 101.
    assert_eq!(lines[0].amount, dec!(150));
    assert_eq!(lines[0].main_account, MainAccountKind::Assets);
    assert_eq!(lines[1].amount, dec!(-150));
}

#[test]
fn test_pnl_restricts_to_statement_mains() {
    let balances = pnl_accounts(vec![
        activity(1010, MainAccountKind::Assets, dec!(500), dec!(0)),
        activity(4010, MainAccountKind::Expenses, dec!(80), dec!(0)),
        activity(5010, MainAccountKind::Revenue, dec!(0), dec!(200)),
        activity(6010, MainAccountKind::OtherRevenue, dec!(0), dec!(20)),
        activity(2010, MainAccountKind::Liabilities, dec!(0), dec!(300)),
    ]);

    assert!(balances.iter().all(|b| matches!(
        b.main_account,
        MainAccountKind::Expenses | MainAccountKind::Revenue | MainAccountKind::OtherRevenue
    )));
    assert_eq!(balances.len(), 3);
}

#[test]
fn test_pnl_orders_by_magnitude_within_main() {
    let balances = pnl_accounts(vec![
        activity(4010, MainAccountKind::Expenses, dec!(15), dec!(0)),
        activity(4020, MainAccountKind::Expenses, dec!(90), dec!(0)),
        activity(5010, MainAccountKind::Revenue, dec!(0), dec!(40)),
        activity(5020, MainAccountKind::Revenue, dec!(0), dec!(400)),
    ]);

    let codes: Vec<i32> = balances.iter().map(|b| b.code).collect();
    // Expenses precede Revenue; within each, larger |amount| first.
    assert_eq!(codes, vec![4020, 4010, 5020, 5010]);
}

fn audit_row(
    recorded_at: NaiveDateTime,
    transaction_id: TransactionId,
    entry_type: EntryType,
    amount: Decimal,
) -> AuditRow {
    AuditRow {
        recorded_at,
        issuer: "clerk".into(),
        transaction_id,
        account: "Cash".into(),
        entry_type,
        posting_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
        amount,
        remark: None,
    }
}

#[test]
fn test_audit_rows_sort_credit_before_debit() {
    let at = NaiveDate::from_ymd_opt(2026, 6, 1)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    let tid = TransactionId::from_uuid(Uuid::from_u128(1));

    let mut rows = vec![
        audit_row(at, tid, EntryType::Debit, dec!(50)),
        audit_row(at, tid, EntryType::Credit, dec!(50)),
        audit_row(at, tid, EntryType::Debit, dec!(10)),
    ];
    sort_audit_rows(&mut rows);

    assert_eq!(rows[0].entry_type, EntryType::Credit);
    assert_eq!(rows[1].amount, dec!(10));
    assert_eq!(rows[2].amount, dec!(50));
}

#[test]
fn test_audit_rows_sort_by_recorded_time_then_transaction() {
    let early = NaiveDate::from_ymd_opt(2026, 6, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    let late = early + chrono::Duration::hours(2);
    let tid_a = TransactionId::from_uuid(Uuid::from_u128(1));
    let tid_b = TransactionId::from_uuid(Uuid::from_u128(2));

    let mut rows = vec![
        audit_row(late, tid_a, EntryType::Credit, dec!(5)),
        audit_row(early, tid_b, EntryType::Debit, dec!(5)),
        audit_row(early, tid_a, EntryType::Debit, dec!(5)),
    ];
    sort_audit_rows(&mut rows);

    assert_eq!(rows[0].recorded_at, early);
    assert_eq!(rows[0].transaction_id, tid_a);
    assert_eq!(rows[1].transaction_id, tid_b);
    assert_eq!(rows[2].recorded_at, late);
}

#[test]
fn test_reports_are_idempotent() {
    let activities = vec![
        activity(1010, MainAccountKind::Assets, dec!(100), dec!(30)),
        activity(5010, MainAccountKind::Revenue, dec!(0), dec!(70)),
    ];
    assert_eq!(
        trial_balance_rows(activities.clone()),
        trial_balance_rows(activities.clone())
    );
    assert_eq!(
        reporting_balances(activities.clone()),
        reporting_balances(activities)
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Given only balanced transactions, total trial-balance debits equal
    /// total credits for any fold of the history.
    #[test]
    fn prop_trial_balance_conserves_globally(
        moves in proptest::collection::vec(
            (0usize..6, 0usize..6, (1i64..100_000i64).prop_map(|n| Decimal::new(n, 2))),
            1..10,
        )
    ) {
        let mains = [
            MainAccountKind::Assets,
            MainAccountKind::Liabilities,
            MainAccountKind::Equity,
            MainAccountKind::Expenses,
            MainAccountKind::Revenue,
            MainAccountKind::OtherRevenue,
        ];

        let mut debits = [Decimal::ZERO; 6];
        let mut credits = [Decimal::ZERO; 6];
        for (debit_idx, credit_idx, amount) in moves {
            debits[debit_idx] += amount;
            credits[credit_idx] += amount;
        }

        let activities: Vec<AccountActivity> = (0..6)
            .map(|i| activity(
                i32::try_from(i).unwrap() * 1000 + 10,
                mains[i],
                debits[i],
                credits[i],
            ))
            .collect();

        let rows = trial_balance_rows(activities);
        let total_debit: Decimal = rows.iter().map(|r| r.debit).sum();
        let total_credit: Decimal = rows.iter().map(|r| r.credit).sum();
        prop_assert_eq!(total_debit, total_credit);
    }
}
