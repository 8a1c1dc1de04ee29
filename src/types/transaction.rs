//! Transaction-related types for the budget ledger
//!
//! A transaction exists in two stages. A [`TransactionDraft`] is what a caller
//! builds: it has no identifier and may violate any rule. A [`Transaction`] is
//! what the ledger hands back after admission: it carries the ledger-assigned
//! identifier and can no longer be modified.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::error::LedgerError;

/// Category label
///
/// Free text; the natural key for budget lookup. Comparison is exact.
pub type Category = String;

/// Ledger-assigned transaction identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        TransactionId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Direction of a transaction
///
/// Only expenses count towards category spending. Income is recorded but
/// never checked against, or contributes to, a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    /// Money coming in
    Income,

    /// Money going out; counted against the category budget
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(LedgerError::invalid_kind(s)),
        }
    }
}

/// Candidate transaction built by a caller
///
/// Nothing here is trusted. `date` is `None` when the caller supplied no
/// date, and `kind` is kept as raw text so that recognising it is part of
/// validation rather than decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub amount: Decimal,
    pub category: Category,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub kind: String,
}

impl TransactionDraft {
    /// Build a draft with a recognised kind and no description
    pub fn new(
        amount: Decimal,
        category: impl Into<Category>,
        date: NaiveDate,
        kind: TransactionKind,
    ) -> Self {
        TransactionDraft {
            amount,
            category: category.into(),
            description: None,
            date: Some(date),
            kind: kind.as_str().to_string(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Transaction admitted into the ledger
///
/// Only the ledger can construct one. Fields are exposed through accessors so
/// an admitted value cannot be altered and re-used as if it were stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    id: TransactionId,
    amount: Decimal,
    category: Category,
    description: Option<String>,
    date: NaiveDate,
    kind: TransactionKind,
}

impl Transaction {
    /// Seal a validated draft under a fresh identifier
    pub(crate) fn admit(
        draft: TransactionDraft,
        date: NaiveDate,
        kind: TransactionKind,
    ) -> Self {
        Transaction {
            id: TransactionId::new(),
            amount: draft.amount,
            category: draft.category,
            description: draft.description,
            date,
            kind,
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::income("income", TransactionKind::Income)]
    #[case::expense("expense", TransactionKind::Expense)]
    fn test_kind_parsing(#[case] input: &str, #[case] expected: TransactionKind) {
        assert_eq!(input.parse::<TransactionKind>().unwrap(), expected);
    }

    #[rstest]
    #[case::empty("")]
    #[case::transfer("transfer")]
    #[case::padded(" income")]
    #[case::upper("EXPENSE")]
    #[case::mixed("Income")]
    fn test_kind_parsing_rejects_unknown(#[case] input: &str) {
        let err = input.parse::<TransactionKind>().unwrap_err();
        assert_eq!(err, LedgerError::invalid_kind(input));
    }

    #[test]
    fn test_admit_assigns_distinct_ids() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let draft = TransactionDraft::new(Decimal::new(1000, 2), "food", date, TransactionKind::Expense)
            .with_description("groceries");

        let a = Transaction::admit(draft.clone(), date, TransactionKind::Expense);
        let b = Transaction::admit(draft, date, TransactionKind::Expense);

        assert_ne!(a.id(), b.id());
        assert_eq!(a.category(), "food");
        assert_eq!(a.description(), Some("groceries"));
        assert!(a.is_expense());
    }
}
