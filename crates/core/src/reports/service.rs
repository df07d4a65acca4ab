//! Report presentation policy.

use rust_decimal::Decimal;

use crate::chart::MainAccountKind;
use crate::ledger::EntryType;

use super::types::{
    AccountActivity, AccountBalance, AccountProfile, AuditRow, BalanceSheetLine, TrialBalanceRow,
};

/// Net balance under the debit-positive convention: debits minus credits.
///
/// The sign is preserved; presentation decides which column it lands in.
#[must_use]
pub fn net_balance(debits: Decimal, credits: Decimal) -> Decimal {
    debits - credits
}

/// Fixed classification ordering: main-account enumeration, then
/// sub-account code, then category code, then account code.
fn classification_key(profile: &AccountProfile) -> (u8, i32, i32, i32) {
    (
        profile.main.statement_order(),
        profile.sub_account_code,
        profile.category_code,
        profile.code,
    )
}

/// Builds trial-balance rows from per-account activity.
///
/// Every account appears, including those with no postings. The net balance
/// lands in the debit column when positive and the credit column when
/// negative; a zero balance shows zero in both.
#[must_use]
pub fn trial_balance_rows(mut activities: Vec<AccountActivity>) -> Vec<TrialBalanceRow> {
    activities.sort_by_key(|a| classification_key(&a.profile));

    activities
        .into_iter()
        .map(|activity| {
            let net = net_balance(activity.debits, activity.credits);
            let (debit, credit) = if net >= Decimal::ZERO {
                (net, Decimal::ZERO)
            } else {
                (Decimal::ZERO, -net)
            };
            TrialBalanceRow {
                account_id: activity.profile.account_id,
                code: activity.profile.code,
                name: activity.profile.name,
                main_account: activity.profile.main,
                sub_account: activity.profile.sub_account,
                category: activity.profile.category,
                debit,
                credit,
            }
        })
        .collect()
}

/// Builds the non-zero balance detail used by statement views.
///
/// Ordering matches the trial balance; zero balances are dropped.
#[must_use]
pub fn reporting_balances(mut activities: Vec<AccountActivity>) -> Vec<AccountBalance> {
    activities.sort_by_key(|a| classification_key(&a.profile));

    activities
        .into_iter()
        .filter_map(|activity| {
            let amount = net_balance(activity.debits, activity.credits);
            if amount == Decimal::ZERO {
                return None;
            }
            Some(AccountBalance {
                account_id: activity.profile.account_id,
                code: activity.profile.code,
                name: activity.profile.name,
                main_account: activity.profile.main,
                sub_account: activity.profile.sub_account,
                category: activity.profile.category,
                amount,
            })
        })
        .collect()
}

/// Rolls account balances up into (main, sub, category) groups.
///
/// Expects its input in classification order, as produced by
/// [`reporting_balances`]; adjacent rows of the same group are summed.
#[must_use]
pub fn balance_sheet_summary(balances: &[AccountBalance]) -> Vec<BalanceSheetLine> {
    let mut lines: Vec<BalanceSheetLine> = Vec::new();

    for balance in balances {
        match lines.last_mut() {
            Some(line)
                if line.main_account == balance.main_account
                    && line.sub_account == balance.sub_account
                    && line.category == balance.category =>
            {
                line.amount += balance.amount;
            }
            _ => lines.push(BalanceSheetLine {
                main_account: balance.main_account,
                sub_account: balance.sub_account.clone(),
                category: balance.category.clone(),
                amount: balance.amount,
            }),
        }
    }

    lines
}

/// Main accounts that appear on the profit-and-loss statement.
const PNL_MAINS: [MainAccountKind; 3] = [
    MainAccountKind::Expenses,
    MainAccountKind::Revenue,
    MainAccountKind::OtherRevenue,
];

/// Builds the profit-and-loss account detail.
///
/// Restricted to Expenses, Revenue, and Other Revenue; ordered by the fixed
/// main-account enumeration, then by descending balance magnitude, with the
/// account code as the final tie-break.
#[must_use]
pub fn pnl_accounts(activities: Vec<AccountActivity>) -> Vec<AccountBalance> {
    let mut balances: Vec<AccountBalance> = activities
        .into_iter()
        .filter(|a| PNL_MAINS.contains(&a.profile.main))
        .filter_map(|activity| {
            let amount = net_balance(activity.debits, activity.credits);
            if amount == Decimal::ZERO {
                return None;
            }
            Some(AccountBalance {
                account_id: activity.profile.account_id,
                code: activity.profile.code,
                name: activity.profile.name,
                main_account: activity.profile.main,
                sub_account: activity.profile.sub_account,
                category: activity.profile.category,
                amount,
            })
        })
        .collect();

    balances.sort_by(|a, b| {
        a.main_account
            .statement_order()
            .cmp(&b.main_account.statement_order())
            .then_with(|| b.amount.abs().cmp(&a.amount.abs()))
            .then_with(|| a.code.cmp(&b.code))
    });

    balances
}

/// Sorts audit rows into the deterministic export order: recorded
/// timestamp, then transaction, then CREDIT before DEBIT, then ascending
/// amount.
pub fn sort_audit_rows(rows: &mut [AuditRow]) {
    rows.sort_by(|a, b| {
        a.recorded_at
            .cmp(&b.recorded_at)
            .then_with(|| a.transaction_id.into_inner().cmp(&b.transaction_id.into_inner()))
            .then_with(|| side_rank(a.entry_type).cmp(&side_rank(b.entry_type)))
            .then_with(|| a.amount.cmp(&b.amount))
    });
}

const fn side_rank(entry_type: EntryType) -> u8 {
    match entry_type {
        EntryType::Credit => 0,
        EntryType::Debit => 1,
    }
}

#[cfg(test)]
mod ordering_tests {
    use super::*;

    #[test]
    fn test_side_rank_puts_credit_first() {
        assert!(side_rank(EntryType::Credit) < side_rank(EntryType::Debit));
    }

    #[test]
    fn test_net_balance_sign_is_preserved() {
        assert_eq!(
            net_balance(Decimal::new(100, 0), Decimal::new(150, 0)),
            Decimal::new(-50, 0)
        );
    }

    #[test]
    fn test_classification_key_orders_mains_first() {
        let asset = AccountProfile {
            account_id: quill_shared::types::AccountId::new(),
            code: 900,
            name: "Cash".into(),
            main: MainAccountKind::Assets,
            sub_account_code: 9,
            sub_account: "Current Assets".into(),
            category_code: 9,
            category: "Cash & Equivalents".into(),
        };
        let revenue = AccountProfile {
            account_id: quill_shared::types::AccountId::new(),
            code: 1,
            name: "Sales".into(),
            main: MainAccountKind::Revenue,
            sub_account_code: 1,
            sub_account: "Operating Revenue".into(),
            category_code: 1,
            category: "Sales".into(),
        };
        assert!(classification_key(&asset) < classification_key(&revenue));
    }
}
