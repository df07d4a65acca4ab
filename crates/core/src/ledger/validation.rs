//! Entry expansion and conservation checking.
//!
//! Callers describe a business event as a list of account/amount lines.
//! Expansion turns those lines into postings in input order, dropping
//! zero amounts and rejecting negative ones; the conservation check then
//! requires total debits to equal total credits before anything is stored.

use rust_decimal::Decimal;

use quill_shared::types::AccountId;

use super::error::LedgerError;
use super::types::{CounterpartLine, EntryType, JournalLine, PostingDraft};

/// Expands journal lines into postings.
///
/// Each line contributes a DEBIT posting when its debit side is present and
/// a CREDIT posting when its credit side is present, in input order with the
/// debit side first. Zero amounts are omitted; the expansion must yield at
/// least one posting.
///
/// # Errors
///
/// Returns `LedgerError::NegativeAmount` for any negative amount and
/// `LedgerError::EmptyEntries` when nothing remains after expansion.
pub fn expand_journal_lines(lines: &[JournalLine]) -> Result<Vec<PostingDraft>, LedgerError> {
    let mut postings = Vec::with_capacity(lines.len() * 2);

    for line in lines {
        if let Some(debit) = line.debit {
            push_posting(&mut postings, line.account_id, EntryType::Debit, debit)?;
        }
        if let Some(credit) = line.credit {
            push_posting(&mut postings, line.account_id, EntryType::Credit, credit)?;
        }
    }

    if postings.is_empty() {
        return Err(LedgerError::EmptyEntries);
    }

    Ok(postings)
}

/// Expands a payment voucher into postings.
///
/// One CREDIT posting of `total` against the paying account, followed by a
/// DEBIT posting per counterpart line, in input order.
///
/// # Errors
///
/// Same failure modes as [`expand_journal_lines`].
pub fn expand_voucher_lines(
    from_account: AccountId,
    total: Decimal,
    lines: &[CounterpartLine],
) -> Result<Vec<PostingDraft>, LedgerError> {
    expand_counterpart(from_account, EntryType::Credit, total, lines)
}

/// Expands a deposit into postings.
///
/// One DEBIT posting of `total` against the receiving account, followed by
/// a CREDIT posting per counterpart line, in input order.
///
/// # Errors
///
/// Same failure modes as [`expand_journal_lines`].
pub fn expand_deposit_lines(
    to_account: AccountId,
    total: Decimal,
    lines: &[CounterpartLine],
) -> Result<Vec<PostingDraft>, LedgerError> {
    expand_counterpart(to_account, EntryType::Debit, total, lines)
}

fn expand_counterpart(
    head_account: AccountId,
    head_side: EntryType,
    total: Decimal,
    lines: &[CounterpartLine],
) -> Result<Vec<PostingDraft>, LedgerError> {
    let line_side = match head_side {
        EntryType::Credit => EntryType::Debit,
        EntryType::Debit => EntryType::Credit,
    };

    let mut postings = Vec::with_capacity(lines.len() + 1);
    push_posting(&mut postings, head_account, head_side, total)?;
    for line in lines {
        push_posting(&mut postings, line.account_id, line_side, line.amount)?;
    }

    if postings.is_empty() {
        return Err(LedgerError::EmptyEntries);
    }

    Ok(postings)
}

fn push_posting(
    postings: &mut Vec<PostingDraft>,
    account_id: AccountId,
    entry_type: EntryType,
    amount: Decimal,
) -> Result<(), LedgerError> {
    if amount < Decimal::ZERO {
        return Err(LedgerError::NegativeAmount);
    }
    // Zero-value postings are never stored.
    if amount > Decimal::ZERO {
        postings.push(PostingDraft {
            account_id,
            entry_type,
            amount,
        });
    }
    Ok(())
}

/// Sums the debit and credit sides of a posting set.
#[must_use]
pub fn totals(postings: &[PostingDraft]) -> (Decimal, Decimal) {
    let mut debits = Decimal::ZERO;
    let mut credits = Decimal::ZERO;
    for posting in postings {
        match posting.entry_type {
            EntryType::Debit => debits += posting.amount,
            EntryType::Credit => credits += posting.amount,
        }
    }
    (debits, credits)
}

/// Verifies double-entry conservation: total debits equal total credits.
///
/// # Errors
///
/// Returns `LedgerError::Unbalanced` with both totals on mismatch.
pub fn check_conservation(postings: &[PostingDraft]) -> Result<(), LedgerError> {
    let (debits, credits) = totals(postings);
    if debits != credits {
        return Err(LedgerError::Unbalanced { debits, credits });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn account() -> AccountId {
        AccountId::new()
    }

    #[test]
    fn test_expand_preserves_input_order() {
        let a = account();
        let b = account();
        let lines = vec![
            JournalLine {
                account_id: a,
                debit: Some(dec!(100)),
                credit: None,
            },
            JournalLine {
                account_id: b,
                debit: None,
                credit: Some(dec!(100)),
            },
        ];

        let postings = expand_journal_lines(&lines).unwrap();
        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].account_id, a);
        assert_eq!(postings[0].entry_type, EntryType::Debit);
        assert_eq!(postings[1].account_id, b);
        assert_eq!(postings[1].entry_type, EntryType::Credit);
    }

    #[test]
    fn test_line_with_both_sides_yields_two_postings() {
        let a = account();
        let lines = vec![JournalLine {
            account_id: a,
            debit: Some(dec!(25)),
            credit: Some(dec!(25)),
        }];

        let postings = expand_journal_lines(&lines).unwrap();
        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].entry_type, EntryType::Debit);
        assert_eq!(postings[1].entry_type, EntryType::Credit);
    }

    #[test]
    fn test_zero_amounts_are_omitted() {
        let lines = vec![
            JournalLine {
                account_id: account(),
                debit: Some(dec!(0)),
                credit: Some(dec!(40)),
            },
            JournalLine {
                account_id: account(),
                debit: Some(dec!(40)),
                credit: None,
            },
        ];

        let postings = expand_journal_lines(&lines).unwrap();
        assert_eq!(postings.len(), 2);
        assert!(postings.iter().all(|p| p.amount > Decimal::ZERO));
    }

    #[test]
    fn test_empty_expansion_is_rejected() {
        assert_eq!(expand_journal_lines(&[]), Err(LedgerError::EmptyEntries));

        let all_zero = vec![JournalLine {
            account_id: account(),
            debit: Some(dec!(0)),
            credit: None,
        }];
        assert_eq!(
            expand_journal_lines(&all_zero),
            Err(LedgerError::EmptyEntries)
        );
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let lines = vec![JournalLine {
            account_id: account(),
            debit: Some(dec!(-10)),
            credit: None,
        }];
        assert_eq!(
            expand_journal_lines(&lines),
            Err(LedgerError::NegativeAmount)
        );
    }

    #[test]
    fn test_voucher_expansion_credits_head_then_debits_lines() {
        let from = account();
        let expense = account();
        let postings = expand_voucher_lines(
            from,
            dec!(50),
            &[CounterpartLine {
                account_id: expense,
                amount: dec!(50),
            }],
        )
        .unwrap();

        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].account_id, from);
        assert_eq!(postings[0].entry_type, EntryType::Credit);
        assert_eq!(postings[0].amount, dec!(50));
        assert_eq!(postings[1].account_id, expense);
        assert_eq!(postings[1].entry_type, EntryType::Debit);
        assert!(check_conservation(&postings).is_ok());
    }

    #[test]
    fn test_deposit_expansion_mirrors_voucher() {
        let bank = account();
        let income = account();
        let postings = expand_deposit_lines(
            bank,
            dec!(75),
            &[CounterpartLine {
                account_id: income,
                amount: dec!(75),
            }],
        )
        .unwrap();

        assert_eq!(postings[0].entry_type, EntryType::Debit);
        assert_eq!(postings[1].entry_type, EntryType::Credit);
        assert!(check_conservation(&postings).is_ok());
    }

    #[test]
    fn test_conservation_rejects_mismatch() {
        let postings = vec![
            PostingDraft {
                account_id: account(),
                entry_type: EntryType::Debit,
                amount: dec!(100),
            },
            PostingDraft {
                account_id: account(),
                entry_type: EntryType::Credit,
                amount: dec!(60),
            },
        ];
        assert_eq!(
            check_conservation(&postings),
            Err(LedgerError::Unbalanced {
                debits: dec!(100),
                credits: dec!(60),
            })
        );
    }

    #[test]
    fn test_voucher_with_short_lines_is_unbalanced() {
        let postings = expand_voucher_lines(
            account(),
            dec!(50),
            &[CounterpartLine {
                account_id: account(),
                amount: dec!(30),
            }],
        )
        .unwrap();
        assert!(matches!(
            check_conservation(&postings),
            Err(LedgerError::Unbalanced { .. })
        ));
    }
}
