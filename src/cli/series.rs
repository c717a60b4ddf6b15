use crate::reports;
use crate::series::{self, Granularity};
use crate::settings::load_settings;

use super::{open_store, today, RangeArgs, Result};

/// Writes JSON to stdout for an external plotting tool.
pub fn run(
    file: Option<String>,
    range: &RangeArgs,
    granularity: Option<Granularity>,
    cumulative: bool,
    categories: bool,
) -> Result<()> {
    let store = open_store(file);
    let range = range.resolve(today())?;
    let txns = range.filter(&store.load_all()?)?;

    let encoded = if categories {
        let slices = series::category_series(&reports::breakdown_by_category(&txns));
        serde_json::to_string_pretty(&slices)
    } else {
        let granularity = granularity.unwrap_or_else(|| load_settings().granularity);
        let mut points = series::time_series(&txns, granularity);
        if cumulative {
            points = series::cumulative(&points);
        }
        serde_json::to_string_pretty(&points)
    };
    let json = encoded?;

    println!("{json}");
    Ok(())
}
