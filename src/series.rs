//! Chart-ready series. Nothing here draws; a plotting tool consumes the output.

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};
use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Category, CategoryBreakdown, Transaction};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Daily,
    Monthly,
}

impl Granularity {
    /// First day of the period containing `date`.
    pub fn period_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Daily => date,
            Self::Monthly => date.with_day(1).unwrap_or(date),
        }
    }

    fn next(&self, period: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Daily => period.succ_opt(),
            Self::Monthly => period.checked_add_months(Months::new(1)),
        }
    }
}

/// Income and expense for one period. `net` is `income - expense`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub period: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

impl SeriesPoint {
    fn new(period: NaiveDate, income: Decimal, expense: Decimal) -> Self {
        Self {
            period,
            income,
            expense,
            net: income - expense,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySlice {
    pub label: String,
    pub value: Decimal,
}

/// One point per period from the earliest to the latest record, gaps filled with zeros.
pub fn time_series(collection: &[Transaction], granularity: Granularity) -> Vec<SeriesPoint> {
    let mut buckets: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
    for txn in collection {
        let bucket = buckets.entry(granularity.period_start(txn.date)).or_default();
        match txn.category {
            Category::Income => bucket.0 += txn.amount,
            Category::Expense => bucket.1 += txn.amount,
        }
    }

    let (first, last) = match (buckets.keys().next(), buckets.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Vec::new(),
    };

    let mut points = Vec::new();
    let mut period = Some(first);
    while let Some(p) = period.filter(|p| *p <= last) {
        let (income, expense) = buckets.get(&p).copied().unwrap_or_default();
        points.push(SeriesPoint::new(p, income, expense));
        period = granularity.next(p);
    }
    points
}

/// Running totals over an ordered series.
pub fn cumulative(points: &[SeriesPoint]) -> Vec<SeriesPoint> {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    points
        .iter()
        .map(|p| {
            income += p.income;
            expense += p.expense;
            SeriesPoint::new(p.period, income, expense)
        })
        .collect()
}

/// Breakdown as `(label, value)` pairs, zero values dropped.
pub fn category_series(breakdown: &CategoryBreakdown) -> Vec<CategorySlice> {
    breakdown
        .categories
        .iter()
        .filter(|(_, item)| !item.total.is_zero())
        .map(|(label, item)| CategorySlice {
            label: label.clone(),
            value: item.total,
        })
        .collect()
}
