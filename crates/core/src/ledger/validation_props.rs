//! Property tests for entry expansion and conservation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use quill_shared::types::AccountId;

use super::types::{CounterpartLine, EntryType, JournalLine};
use super::validation::{
    check_conservation, expand_journal_lines, expand_voucher_lines, totals,
};

/// Strategy for non-negative decimal amounts with two fractional digits.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for one journal line with optional sides.
fn line_strategy() -> impl Strategy<Value = JournalLine> {
    (
        proptest::option::of(amount_strategy()),
        proptest::option::of(amount_strategy()),
    )
        .prop_map(|(debit, credit)| JournalLine {
            account_id: AccountId::from_uuid(uuid::Uuid::from_u128(0x42)),
            debit,
            credit,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Expansion totals equal the sum of the input sides, independent of
    /// line count or ordering.
    #[test]
    fn prop_expansion_preserves_side_totals(lines in proptest::collection::vec(line_strategy(), 1..12)) {
        let input_debits: Decimal = lines.iter().filter_map(|l| l.debit).sum();
        let input_credits: Decimal = lines.iter().filter_map(|l| l.credit).sum();

        match expand_journal_lines(&lines) {
            Ok(postings) => {
                let (debits, credits) = totals(&postings);
                prop_assert_eq!(debits, input_debits);
                prop_assert_eq!(credits, input_credits);
            }
            Err(err) => {
                // Only an all-zero/all-absent input may fail here.
                prop_assert_eq!(err, super::error::LedgerError::EmptyEntries);
                prop_assert_eq!(input_debits + input_credits, Decimal::ZERO);
            }
        }
    }

    /// Every expanded posting carries a strictly positive amount.
    #[test]
    fn prop_expanded_amounts_are_positive(lines in proptest::collection::vec(line_strategy(), 1..12)) {
        if let Ok(postings) = expand_journal_lines(&lines) {
            prop_assert!(postings.iter().all(|p| p.amount > Decimal::ZERO));
        }
    }

    /// Conservation accepts a posting set iff the side totals match.
    #[test]
    fn prop_conservation_matches_totals(lines in proptest::collection::vec(line_strategy(), 1..12)) {
        if let Ok(postings) = expand_journal_lines(&lines) {
            let (debits, credits) = totals(&postings);
            prop_assert_eq!(check_conservation(&postings).is_ok(), debits == credits);
        }
    }

    /// A voucher whose lines sum to its total always balances, and the head
    /// posting is the single credit.
    #[test]
    fn prop_voucher_with_matching_lines_balances(
        amounts in proptest::collection::vec((1i64..100_000i64).prop_map(|n| Decimal::new(n, 2)), 1..8)
    ) {
        let total: Decimal = amounts.iter().copied().sum();
        let lines: Vec<CounterpartLine> = amounts
            .iter()
            .map(|&amount| CounterpartLine {
                account_id: AccountId::from_uuid(uuid::Uuid::from_u128(0x7)),
                amount,
            })
            .collect();

        let from = AccountId::from_uuid(uuid::Uuid::from_u128(0x5));
        let postings = expand_voucher_lines(from, total, &lines).unwrap();

        prop_assert!(check_conservation(&postings).is_ok());
        let credit_count = postings
            .iter()
            .filter(|p| p.entry_type == EntryType::Credit)
            .count();
        prop_assert_eq!(credit_count, 1);
        prop_assert_eq!(postings[0].account_id, from);
    }
}
