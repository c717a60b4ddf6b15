use crate::fmt::money;
use crate::reports::summarize;
use crate::settings::settings_path;

use super::{open_store, Result};

pub fn run(file: Option<String>) -> Result<()> {
    let store = open_store(file);

    println!("Settings:   {}", settings_path().display());
    println!("Data file:  {}", store.path().display());

    if store.path().exists() {
        let txns = store.load_all()?;
        let summary = summarize(&txns);
        let span = match (txns.iter().map(|t| t.date).min(), txns.iter().map(|t| t.date).max()) {
            (Some(first), Some(last)) => format!("{first} to {last}"),
            _ => "(none)".to_string(),
        };

        println!();
        println!("Transactions:  {}", summary.count);
        println!("Dates:         {span}");
        println!("Net savings:   {}", money(summary.net));
    } else {
        println!();
        println!("Data file not found. Run `tally init` to set up.");
    }

    Ok(())
}
