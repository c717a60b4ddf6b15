use crate::fmt::money;
use crate::models::{Category, TransactionInput, DATE_FORMAT};

use super::{open_store, today, Result};

pub fn run(
    file: Option<String>,
    amount: &str,
    category: &str,
    date: Option<&str>,
    description: &str,
) -> Result<()> {
    let store = open_store(file);
    let input = TransactionInput {
        date: date
            .map(str::to_string)
            .unwrap_or_else(|| today().format(DATE_FORMAT).to_string()),
        amount: amount.trim().to_string(),
        category: Category::from_code(category)?.label().to_string(),
        description: description.to_string(),
    };
    let txn = store.append_input(&input)?;
    println!(
        "Added {} of {} on {}",
        txn.category,
        money(txn.amount),
        txn.date.format(DATE_FORMAT)
    );
    Ok(())
}
