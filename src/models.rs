use std::collections::BTreeMap;
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ValidationError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Label for expenses with no usable description.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Largest accepted amounts have this many digits before the point.
pub const MAX_INTEGER_DIGITS: u32 = 15;

/// Most digits accepted after the point.
pub const MAX_SCALE: u32 = 8;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Direction of a transaction. Amounts are always positive; this carries the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    Income,
    Expense,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    /// Accepts the single-letter codes `I` and `E` (any case) as well as full labels.
    pub fn from_code(raw: &str) -> Result<Self, ValidationError> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "I" | "INCOME" => Ok(Self::Income),
            "E" | "EXPENSE" => Ok(Self::Expense),
            _ => Err(ValidationError::UnknownCategory(raw.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Strict parse: only the exact labels written to the data file.
impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Income" => Ok(Self::Income),
            "Expense" => Ok(Self::Expense),
            other => Err(ValidationError::UnknownCategory(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: Category,
    pub description: String,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        amount: Decimal,
        category: Category,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            amount,
            category,
            description: description.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount.scale() > MAX_SCALE || self.amount >= max_amount() {
            return Err(ValidationError::AmountOutOfRange(self.amount));
        }
        Ok(())
    }

    pub fn is_income(&self) -> bool {
        self.category == Category::Income
    }

    pub fn is_expense(&self) -> bool {
        self.category == Category::Expense
    }
}

/// Untyped record fields as a caller supplies them.
#[derive(Debug, Clone, Default)]
pub struct TransactionInput {
    pub date: String,
    pub amount: String,
    pub category: String,
    pub description: String,
}

impl TransactionInput {
    pub fn validate(&self) -> Result<Transaction, ValidationError> {
        let date = parse_date(&self.date)
            .ok_or_else(|| ValidationError::InvalidDate(self.date.clone()))?;
        let amount = parse_amount(&self.amount)
            .ok_or_else(|| ValidationError::InvalidAmount(self.amount.clone()))?;
        let category = Category::from_str(&self.category)?;
        let txn = Transaction::new(date, amount, category, self.description.clone());
        txn.validate()?;
        Ok(txn)
    }
}

/// Strict `YYYY-MM-DD` with zero padding, and a real calendar date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Plain decimal: ASCII digits with at most one `.`. No signs, separators or exponents.
/// At most `MAX_INTEGER_DIGITS` significant digits before the point and `MAX_SCALE`
/// after it, so the value is held exactly and sums over a store cannot overflow.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if int_part.trim_start_matches('0').len() > MAX_INTEGER_DIGITS as usize
        || frac_part.len() > MAX_SCALE as usize
    {
        return None;
    }
    Decimal::from_str(raw).ok()
}

/// Exclusive upper bound on a single amount.
fn max_amount() -> Decimal {
    Decimal::from(10_i64.pow(MAX_INTEGER_DIGITS))
}

// ---------------------------------------------------------------------------
// Derived values
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
    pub count: usize,
}

impl Add for Summary {
    type Output = Summary;

    fn add(self, rhs: Summary) -> Summary {
        Summary {
            income: self.income + rhs.income,
            expense: self.expense + rhs.expense,
            net: self.net + rhs.net,
            count: self.count + rhs.count,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BreakdownItem {
    pub total: Decimal,
    pub count: usize,
}

/// Expense totals keyed by label, sorted by label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryBreakdown {
    pub categories: BTreeMap<String, BreakdownItem>,
    pub total: Decimal,
}

impl CategoryBreakdown {
    pub fn get(&self, label: &str) -> Option<Decimal> {
        self.categories.get(label).map(|item| item.total)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Share of the grand total, as a percentage.
    pub fn pct(&self, label: &str) -> Decimal {
        match self.get(label) {
            Some(t) if !self.total.is_zero() => t / self.total * Decimal::ONE_HUNDRED,
            _ => Decimal::ZERO,
        }
    }
}
