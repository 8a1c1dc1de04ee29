//! Stateless admission rules
//!
//! Each function checks one candidate in isolation; aggregate rules such as
//! budget enforcement live in the ledger. Rules run in a fixed order and the
//! first failure is returned.

use crate::types::{Budget, LedgerError, TransactionDraft, TransactionKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Check a candidate transaction against the per-entity rules
///
/// In order: amount is positive, category is non-empty, a date is present,
/// the date is not after `today`, and the kind is income or expense.
///
/// # Returns
///
/// * `Ok(TransactionKind)` - the recognised kind, so callers need not re-parse
/// * `Err(LedgerError)` - the first rule that failed
pub fn validate_transaction(
    draft: &TransactionDraft,
    today: NaiveDate,
) -> Result<TransactionKind, LedgerError> {
    if draft.amount <= Decimal::ZERO {
        return Err(LedgerError::non_positive_amount(draft.amount));
    }

    if draft.category.is_empty() {
        return Err(LedgerError::EmptyCategory);
    }

    let date = draft.date.ok_or(LedgerError::MissingDate)?;
    if date > today {
        return Err(LedgerError::future_date(date, today));
    }

    draft.kind.parse()
}

/// Check a candidate budget: limit is positive, then category is non-empty
pub fn validate_budget(budget: &Budget) -> Result<(), LedgerError> {
    if budget.limit <= Decimal::ZERO {
        return Err(LedgerError::non_positive_limit(budget.limit));
    }

    if budget.category.is_empty() {
        return Err(LedgerError::EmptyCategory);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn draft() -> TransactionDraft {
        TransactionDraft::new(
            Decimal::new(10000, 2),
            "food",
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            TransactionKind::Expense,
        )
    }

    #[rstest]
    #[case::expense("expense", TransactionKind::Expense)]
    #[case::income("income", TransactionKind::Income)]
    fn test_valid_transaction(#[case] kind: &str, #[case] expected: TransactionKind) {
        let mut tx = draft();
        tx.kind = kind.to_string();
        assert_eq!(validate_transaction(&tx, today()), Ok(expected));
    }

    #[test]
    fn test_transaction_dated_today_is_valid() {
        let mut tx = draft();
        tx.date = Some(today());
        assert!(validate_transaction(&tx, today()).is_ok());
    }

    #[rstest]
    #[case::zero_amount(
        TransactionDraft { amount: Decimal::ZERO, ..draft() },
        LedgerError::non_positive_amount(Decimal::ZERO)
    )]
    #[case::negative_amount(
        TransactionDraft { amount: Decimal::new(-5000, 2), ..draft() },
        LedgerError::non_positive_amount(Decimal::new(-5000, 2))
    )]
    #[case::empty_category(
        TransactionDraft { category: String::new(), ..draft() },
        LedgerError::EmptyCategory
    )]
    #[case::missing_date(
        TransactionDraft { date: None, ..draft() },
        LedgerError::MissingDate
    )]
    #[case::future_date(
        TransactionDraft { date: NaiveDate::from_ymd_opt(2024, 6, 16), ..draft() },
        LedgerError::future_date(NaiveDate::from_ymd_opt(2024, 6, 16).unwrap(), today())
    )]
    #[case::unknown_kind(
        TransactionDraft { kind: "transfer".to_string(), ..draft() },
        LedgerError::invalid_kind("transfer")
    )]
    #[case::empty_kind(
        TransactionDraft { kind: String::new(), ..draft() },
        LedgerError::invalid_kind("")
    )]
    #[case::upper_kind(
        TransactionDraft { kind: "EXPENSE".to_string(), ..draft() },
        LedgerError::invalid_kind("EXPENSE")
    )]
    #[case::mixed_kind(
        TransactionDraft { kind: "Income".to_string(), ..draft() },
        LedgerError::invalid_kind("Income")
    )]
    fn test_invalid_transaction(#[case] tx: TransactionDraft, #[case] expected: LedgerError) {
        assert_eq!(validate_transaction(&tx, today()), Err(expected));
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let tx = TransactionDraft {
            amount: Decimal::ZERO,
            category: String::new(),
            description: None,
            date: None,
            kind: "bogus".to_string(),
        };
        assert_eq!(
            validate_transaction(&tx, today()),
            Err(LedgerError::non_positive_amount(Decimal::ZERO))
        );

        let tx = TransactionDraft {
            amount: Decimal::ONE,
            ..tx
        };
        assert_eq!(validate_transaction(&tx, today()), Err(LedgerError::EmptyCategory));
    }

    #[rstest]
    #[case::valid(Budget::new("food", Decimal::new(500, 0)), Ok(()))]
    #[case::zero_limit(
        Budget::new("food", Decimal::ZERO),
        Err(LedgerError::non_positive_limit(Decimal::ZERO))
    )]
    #[case::negative_limit(
        Budget::new("food", Decimal::new(-100, 0)),
        Err(LedgerError::non_positive_limit(Decimal::new(-100, 0)))
    )]
    #[case::empty_category(Budget::new("", Decimal::new(500, 0)), Err(LedgerError::EmptyCategory))]
    #[case::limit_checked_first(
        Budget::new("", Decimal::ZERO),
        Err(LedgerError::non_positive_limit(Decimal::ZERO))
    )]
    fn test_validate_budget(#[case] budget: Budget, #[case] expected: Result<(), LedgerError>) {
        assert_eq!(validate_budget(&budget), expected);
    }
}
