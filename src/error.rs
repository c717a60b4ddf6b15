use std::path::PathBuf;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// A record that cannot be stored.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    #[error("amount {0} is out of range (at most 15 digits before the point and 8 after)")]
    AmountOutOfRange(Decimal),

    #[error("unknown category '{0}' (expected Income or Expense)")]
    UnknownCategory(String),
}

/// The backing file is missing, unreadable or corrupt.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("data file not found: {} (run `tally init`)", .0.display())]
    Missing(PathBuf),

    #[error("data file has no header row")]
    MissingHeader,

    #[error("unexpected header '{found}', expected '{expected}'")]
    HeaderMismatch { found: String, expected: String },

    #[error("malformed entry on line {line}: {reason}")]
    MalformedEntry { line: u64, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Error, Debug)]
pub enum TallyError {
    #[error("Invalid transaction: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid date range: start {start} is after end {end}")]
    Range { start: NaiveDate, end: NaiveDate },

    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, TallyError>;
