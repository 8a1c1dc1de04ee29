//! Error types for the budget ledger
//!
//! This module defines every error the ledger and its input pipeline can
//! produce. Errors are designed to be descriptive enough to print straight to
//! the log.
//!
//! # Error Categories
//!
//! - **Invalid input**: a transaction or budget breaks a validation rule
//! - **Budget exceeded**: an otherwise valid expense would overshoot its limit
//! - **Arithmetic**: a spending total would overflow
//! - **File I/O and parsing**: problems reading an operations file
//!
//! None of these are fatal inside the ledger. A rejected operation leaves the
//! ledger untouched and the caller decides what to do next.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Coarse classification of a [`LedgerError`]
///
/// Lets an adapter map errors to outcomes without matching every variant,
/// e.g. `InvalidInput` to a client error and `BudgetExceeded` to a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    BudgetExceeded,
    Internal,
}

/// Main error type for the budget ledger
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Transaction amount is zero or negative
    #[error("amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Category label is empty
    #[error("category cannot be empty")]
    EmptyCategory,

    /// Transaction carries no date
    #[error("date cannot be zero")]
    MissingDate,

    /// Transaction is dated after the admission date
    #[error("date {date} cannot be in the future (today is {today})")]
    FutureDate {
        /// Date on the transaction
        date: NaiveDate,
        /// Date the check was made against
        today: NaiveDate,
    },

    /// Transaction kind is neither income nor expense
    #[error("invalid transaction kind '{kind}', expected income or expense")]
    InvalidKind {
        /// The unrecognised kind text
        kind: String,
    },

    /// Budget limit is zero or negative
    #[error("limit must be positive, got {limit}")]
    NonPositiveLimit {
        /// The rejected limit
        limit: Decimal,
    },

    /// Expense would push category spending over its budget
    ///
    /// The ledger is unchanged. Distinct from the validation variants so
    /// callers can report it as a conflict rather than bad input.
    #[error("budget exceeded for category '{category}': limit {limit}, spent {spent}, requested {requested}")]
    BudgetExceeded {
        /// Category whose budget would be exceeded
        category: String,
        /// Configured limit
        limit: Decimal,
        /// Spending already admitted
        spent: Decimal,
        /// Amount of the rejected expense
        requested: Decimal,
    },

    /// Summing spending for a category overflowed `Decimal`
    #[error("arithmetic overflow computing spending for category '{category}'")]
    ArithmeticOverflow {
        /// Category being summed
        category: String,
    },

    /// Input file not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// The malformed row is skipped and processing continues.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Operation column holds something other than `budget` or `transaction`
    #[error("Invalid operation '{op}'")]
    InvalidOperation {
        /// The unrecognised operation text
        op: String,
    },

    /// Amount column could not be parsed as a decimal
    #[error("Invalid amount '{amount}'")]
    InvalidAmount {
        /// The raw amount text
        amount: String,
    },

    /// Date column is not a `YYYY-MM-DD` date
    #[error("Invalid date '{date}', expected YYYY-MM-DD")]
    InvalidDate {
        /// The raw date text
        date: String,
    },
}

// Conversion from io::Error to LedgerError
impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to LedgerError
impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        // Extract line number if available
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl LedgerError {
    /// Classify the error for callers that map errors to outcomes
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::NonPositiveAmount { .. }
            | LedgerError::EmptyCategory
            | LedgerError::MissingDate
            | LedgerError::FutureDate { .. }
            | LedgerError::InvalidKind { .. }
            | LedgerError::NonPositiveLimit { .. }
            | LedgerError::ParseError { .. }
            | LedgerError::InvalidOperation { .. }
            | LedgerError::InvalidAmount { .. }
            | LedgerError::InvalidDate { .. } => ErrorKind::InvalidInput,
            LedgerError::BudgetExceeded { .. } => ErrorKind::BudgetExceeded,
            LedgerError::ArithmeticOverflow { .. }
            | LedgerError::FileNotFound { .. }
            | LedgerError::IoError { .. } => ErrorKind::Internal,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }

    pub fn is_budget_exceeded(&self) -> bool {
        self.kind() == ErrorKind::BudgetExceeded
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create a NonPositiveAmount error
    pub fn non_positive_amount(amount: Decimal) -> Self {
        LedgerError::NonPositiveAmount { amount }
    }

    /// Create a FutureDate error
    pub fn future_date(date: NaiveDate, today: NaiveDate) -> Self {
        LedgerError::FutureDate { date, today }
    }

    /// Create an InvalidKind error
    pub fn invalid_kind(kind: &str) -> Self {
        LedgerError::InvalidKind {
            kind: kind.to_string(),
        }
    }

    /// Create a NonPositiveLimit error
    pub fn non_positive_limit(limit: Decimal) -> Self {
        LedgerError::NonPositiveLimit { limit }
    }

    /// Create a BudgetExceeded error
    pub fn budget_exceeded(
        category: &str,
        limit: Decimal,
        spent: Decimal,
        requested: Decimal,
    ) -> Self {
        LedgerError::BudgetExceeded {
            category: category.to_string(),
            limit,
            spent,
            requested,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(category: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            category: category.to_string(),
        }
    }

    /// Create an InvalidOperation error
    pub fn invalid_operation(op: &str) -> Self {
        LedgerError::InvalidOperation { op: op.to_string() }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: &str) -> Self {
        LedgerError::InvalidAmount {
            amount: amount.to_string(),
        }
    }

    /// Create an InvalidDate error
    pub fn invalid_date(date: &str) -> Self {
        LedgerError::InvalidDate {
            date: date.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case::non_positive_amount(
        LedgerError::NonPositiveAmount { amount: Decimal::new(-500, 2) },
        "amount must be positive, got -5.00"
    )]
    #[case::empty_category(LedgerError::EmptyCategory, "category cannot be empty")]
    #[case::missing_date(LedgerError::MissingDate, "date cannot be zero")]
    #[case::future_date(
        LedgerError::FutureDate { date: date(2030, 1, 2), today: date(2024, 5, 6) },
        "date 2030-01-02 cannot be in the future (today is 2024-05-06)"
    )]
    #[case::invalid_kind(
        LedgerError::InvalidKind { kind: "transfer".to_string() },
        "invalid transaction kind 'transfer', expected income or expense"
    )]
    #[case::non_positive_limit(
        LedgerError::NonPositiveLimit { limit: Decimal::ZERO },
        "limit must be positive, got 0"
    )]
    #[case::budget_exceeded(
        LedgerError::BudgetExceeded {
            category: "food".to_string(),
            limit: Decimal::new(5000, 0),
            spent: Decimal::new(1000, 0),
            requested: Decimal::new(4500, 0),
        },
        "budget exceeded for category 'food': limit 5000, spent 1000, requested 4500"
    )]
    #[case::parse_error_with_line(
        LedgerError::ParseError { line: Some(42), message: "Invalid field".to_string() },
        "CSV parse error at line 42: Invalid field"
    )]
    #[case::parse_error_without_line(
        LedgerError::ParseError { line: None, message: "Invalid field".to_string() },
        "CSV parse error: Invalid field"
    )]
    #[case::invalid_date(
        LedgerError::InvalidDate { date: "03/01/2024".to_string() },
        "Invalid date '03/01/2024', expected YYYY-MM-DD"
    )]
    fn test_error_display(#[case] error: LedgerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::amount(LedgerError::non_positive_amount(Decimal::ZERO), ErrorKind::InvalidInput)]
    #[case::category(LedgerError::EmptyCategory, ErrorKind::InvalidInput)]
    #[case::kind(LedgerError::invalid_kind("x"), ErrorKind::InvalidInput)]
    #[case::limit(LedgerError::non_positive_limit(Decimal::ZERO), ErrorKind::InvalidInput)]
    #[case::budget(
        LedgerError::budget_exceeded("food", Decimal::ONE, Decimal::ZERO, Decimal::TWO),
        ErrorKind::BudgetExceeded
    )]
    #[case::overflow(LedgerError::arithmetic_overflow("food"), ErrorKind::Internal)]
    fn test_error_kind(#[case] error: LedgerError, #[case] expected: ErrorKind) {
        assert_eq!(error.kind(), expected);
        assert_eq!(error.is_budget_exceeded(), expected == ErrorKind::BudgetExceeded);
        assert_eq!(error.is_invalid_input(), expected == ErrorKind::InvalidInput);
    }

    #[rstest]
    #[case::budget_exceeded(
        LedgerError::budget_exceeded("food", Decimal::new(5000, 0), Decimal::new(1000, 0), Decimal::new(4500, 0)),
        LedgerError::BudgetExceeded {
            category: "food".to_string(),
            limit: Decimal::new(5000, 0),
            spent: Decimal::new(1000, 0),
            requested: Decimal::new(4500, 0),
        }
    )]
    #[case::invalid_operation(
        LedgerError::invalid_operation("refund"),
        LedgerError::InvalidOperation { op: "refund".to_string() }
    )]
    fn test_helper_functions(#[case] result: LedgerError, #[case] expected: LedgerError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: LedgerError = io_error.into();
        assert!(matches!(error, LedgerError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
