use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::fmt::{money, pct};
use crate::models::{Summary, DATE_FORMAT};
use crate::reports::{self, BreakdownKey};

use super::{open_store, today, RangeArgs, Result};

pub fn transactions(file: Option<String>, range: &RangeArgs) -> Result<()> {
    let store = open_store(file);
    let range = range.resolve(today())?;
    let txns = range.filter(&store.load_all()?)?;

    let label = format!(
        "{} to {}",
        range.start.format(DATE_FORMAT),
        range.end.format(DATE_FORMAT)
    );
    if txns.is_empty() {
        println!("No transactions found in the given date range.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Date", "Category", "Amount", "Description"]);
    for t in &txns {
        let category = if t.is_income() {
            t.category.label().green()
        } else {
            t.category.label().red()
        };
        table.add_row(vec![
            Cell::new(t.date.format(DATE_FORMAT)),
            Cell::new(category),
            Cell::new(money(t.amount)),
            Cell::new(&t.description),
        ]);
    }
    println!("Transactions from {label}\n{table}");

    let summary = reports::summarize(&txns);
    println!("\nSummary\n{}", summary_table(&summary));
    Ok(())
}

fn summary_table(summary: &Summary) -> Table {
    let net_label = if summary.net.is_sign_negative() && !summary.net.is_zero() {
        "Net Savings".red().bold()
    } else {
        "Net Savings".green().bold()
    };
    let mut table = Table::new();
    table.add_row(vec![Cell::new("Total Income"), Cell::new(money(summary.income))]);
    table.add_row(vec![Cell::new("Total Expense"), Cell::new(money(summary.expense))]);
    table.add_row(vec![Cell::new(net_label), Cell::new(money(summary.net))]);
    table
}

pub fn breakdown(file: Option<String>, range: &RangeArgs, by_category: bool) -> Result<()> {
    let store = open_store(file);
    let all = store.load_all()?;
    let txns = if range.is_empty() {
        all
    } else {
        range.resolve(today())?.filter(&all)?
    };
    let key = if by_category {
        BreakdownKey::Category
    } else {
        BreakdownKey::Description
    };
    let data = reports::breakdown_by(&txns, key);

    if data.is_empty() {
        println!("No expenses found in the given date range.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Category", "Amount", "%", "Count"]);
    for (label, item) in &data.categories {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(money(item.total)),
            Cell::new(pct(data.pct(label))),
            Cell::new(item.count),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(money(data.total)),
        Cell::new(""),
        Cell::new(""),
    ]);
    println!("Category Breakdown\n{table}");
    Ok(())
}
