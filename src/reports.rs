use log::debug;

use crate::models::{Category, CategoryBreakdown, Summary, Transaction, UNCATEGORIZED};

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

pub fn summarize(collection: &[Transaction]) -> Summary {
    let mut summary = Summary::default();
    for txn in collection {
        match txn.category {
            Category::Income => summary.income += txn.amount,
            Category::Expense => summary.expense += txn.amount,
        }
        summary.count += 1;
    }
    summary.net = summary.income - summary.expense;
    summary
}

// ---------------------------------------------------------------------------
// Expense Breakdown
// ---------------------------------------------------------------------------

/// What an expense is grouped by in a breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BreakdownKey {
    /// Each distinct trimmed description is its own label. Blank descriptions go
    /// under `Uncategorized`, which also collects any expense literally described
    /// that way.
    #[default]
    Description,
    /// Every expense under the single label `Expense`.
    Category,
}

impl BreakdownKey {
    fn label_for(&self, txn: &Transaction) -> String {
        match self {
            Self::Description => {
                let label = txn.description.trim();
                if label.is_empty() {
                    UNCATEGORIZED.to_string()
                } else {
                    label.to_string()
                }
            }
            Self::Category => txn.category.label().to_string(),
        }
    }
}

pub fn breakdown_by_category(collection: &[Transaction]) -> CategoryBreakdown {
    breakdown_by(collection, BreakdownKey::default())
}

/// Expense totals per label. Income is ignored.
pub fn breakdown_by(collection: &[Transaction], key: BreakdownKey) -> CategoryBreakdown {
    let mut breakdown = CategoryBreakdown::default();
    for txn in collection.iter().filter(|t| t.is_expense()) {
        let item = breakdown.categories.entry(key.label_for(txn)).or_default();
        item.total += txn.amount;
        item.count += 1;
        breakdown.total += txn.amount;
    }
    debug!(
        "expense breakdown by {key:?}: {} labels, total {}",
        breakdown.len(),
        breakdown.total
    );
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn txn(date: &str, amount: &str, category: Category, description: &str) -> Transaction {
        Transaction::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            Decimal::from_str(amount).unwrap(),
            category,
            description,
        )
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn seed_transactions() -> Vec<Transaction> {
        vec![
            txn("2024-01-05", "1000.00", Category::Income, "salary"),
            txn("2024-01-10", "200.00", Category::Expense, "groceries"),
            txn("2024-02-01", "50.00", Category::Expense, "utilities"),
        ]
    }

    #[test]
    fn test_summarize_empty() {
        let s = summarize(&[]);
        assert_eq!(s.income, Decimal::ZERO);
        assert_eq!(s.expense, Decimal::ZERO);
        assert_eq!(s.net, Decimal::ZERO);
        assert_eq!(s.count, 0);
    }

    #[test]
    fn test_summarize_totals() {
        let s = summarize(&seed_transactions()[..2]);
        assert_eq!(s.income, dec("1000.00"));
        assert_eq!(s.expense, dec("200.00"));
        assert_eq!(s.net, dec("800.00"));
        assert_eq!(s.count, 2);
    }

    #[test]
    fn test_summarize_net_can_go_negative() {
        let txns = vec![
            txn("2024-01-05", "10.00", Category::Income, "refund"),
            txn("2024-01-06", "35.50", Category::Expense, "dinner"),
        ];
        assert_eq!(summarize(&txns).net, dec("-25.50"));
    }

    #[test]
    fn test_summarize_is_additive() {
        let all = seed_transactions();
        let (a, b) = all.split_at(1);
        assert_eq!(summarize(a) + summarize(b), summarize(&all));
    }

    #[test]
    fn test_summarize_is_exact_for_cents() {
        let txns: Vec<_> = (0..10)
            .map(|_| txn("2024-01-01", "0.10", Category::Expense, "gum"))
            .collect();
        assert_eq!(summarize(&txns).expense, dec("1.00"));
    }

    #[test]
    fn test_breakdown_groups_expenses_by_description() {
        let b = breakdown_by_category(&seed_transactions());
        assert_eq!(b.len(), 2);
        assert_eq!(b.get("groceries"), Some(dec("200.00")));
        assert_eq!(b.get("utilities"), Some(dec("50.00")));
        assert_eq!(b.get("salary"), None);
        assert_eq!(b.total, dec("250.00"));
    }

    #[test]
    fn test_breakdown_by_category_key() {
        let b = breakdown_by(&seed_transactions(), BreakdownKey::Category);
        assert_eq!(b.len(), 1);
        assert_eq!(b.get("Expense"), Some(dec("250.00")));
    }

    #[test]
    fn test_breakdown_blank_descriptions_are_uncategorized() {
        let txns = vec![
            txn("2024-01-01", "5.00", Category::Expense, ""),
            txn("2024-01-02", "7.00", Category::Expense, "   "),
            txn("2024-01-03", "1.00", Category::Expense, " coffee "),
            txn("2024-01-04", "2.00", Category::Expense, "coffee"),
        ];
        let b = breakdown_by_category(&txns);
        assert_eq!(b.get(UNCATEGORIZED), Some(dec("12.00")));
        assert_eq!(b.categories[UNCATEGORIZED].count, 2);
        assert_eq!(b.get("coffee"), Some(dec("3.00")));
    }

    #[test]
    fn test_breakdown_literal_uncategorized_shares_blank_bucket() {
        let txns = vec![
            txn("2024-01-01", "5.00", Category::Expense, ""),
            txn("2024-01-02", "7.00", Category::Expense, UNCATEGORIZED),
        ];
        let b = breakdown_by_category(&txns);
        assert_eq!(b.len(), 1);
        assert_eq!(b.categories[UNCATEGORIZED].count, 2);
    }

    #[test]
    fn test_summarize_largest_amounts() {
        let top = "999999999999999.99999999";
        let txns: Vec<_> = (0..1000)
            .map(|_| txn("2024-01-01", top, Category::Income, "windfall"))
            .collect();
        assert_eq!(summarize(&txns).income, dec(top) * Decimal::from(1000));
    }

    #[test]
    fn test_breakdown_of_income_only_is_empty() {
        let txns = vec![txn("2024-01-01", "5.00", Category::Income, "")];
        let b = breakdown_by_category(&txns);
        assert!(b.is_empty());
        assert_eq!(b.total, Decimal::ZERO);
    }
}
