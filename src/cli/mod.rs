pub mod add;
pub mod init;
pub mod report;
pub mod series;
pub mod status;

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::models::parse_date;
use crate::query::DateRange;
use crate::series::Granularity;
use crate::settings::{get_data_file, shellexpand_path};
use crate::store::Store;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "tally", about = "Track income and expenses in a plain CSV file.")]
pub struct Cli {
    /// Data file to use instead of the one in settings
    #[arg(long, global = true)]
    pub file: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the data file if it does not exist yet.
    Init,
    /// Record a transaction.
    Add {
        /// Positive amount, e.g. 12.50
        #[arg(long)]
        amount: String,
        /// Income or Expense (I / E accepted)
        #[arg(long)]
        category: String,
        /// Date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Free-form description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List transactions in a date range with an income/expense summary.
    Report {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Expense breakdown for a date range (default: every record).
    Breakdown {
        #[command(flatten)]
        range: RangeArgs,
        /// Group all expenses under a single Expense label
        #[arg(long = "by-category")]
        by_category: bool,
    },
    /// Print chart series as JSON for a plotting tool.
    Series {
        #[command(flatten)]
        range: RangeArgs,
        /// Bucket size (default from settings)
        #[arg(long, value_enum)]
        granularity: Option<Granularity>,
        /// Running totals instead of per-period values
        #[arg(long)]
        cumulative: bool,
        /// Emit the expense category series instead of the time series
        #[arg(long)]
        categories: bool,
    },
    /// Show the data file in use and how many records it holds.
    Status,
    /// Make PATH the default data file.
    Use {
        /// Path to a tally CSV file
        path: String,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct RangeArgs {
    /// Month filter: YYYY-MM
    #[arg(long)]
    pub month: Option<String>,
    /// Year filter: YYYY
    #[arg(long)]
    pub year: Option<i32>,
    /// Start date: YYYY-MM-DD
    #[arg(long = "from")]
    pub from_date: Option<String>,
    /// End date: YYYY-MM-DD
    #[arg(long = "to")]
    pub to_date: Option<String>,
}

impl RangeArgs {
    /// No range flag was given.
    pub fn is_empty(&self) -> bool {
        self.month.is_none() && self.year.is_none() && self.from_date.is_none() && self.to_date.is_none()
    }

    pub fn resolve(&self, today: NaiveDate) -> Result<DateRange> {
        let (my, mm) = match &self.month {
            Some(m) => {
                let (y, m) = parse_month(m)?;
                (Some(y), Some(m))
            }
            None => (None, None),
        };
        let from = self.from_date.as_deref().map(parse_cli_date).transpose()?;
        let to = self.to_date.as_deref().map(parse_cli_date).transpose()?;
        Ok(DateRange::resolve(self.year.or(my), mm, from, to, today)?)
    }
}

pub(crate) fn parse_month(raw: &str) -> Result<(i32, u32)> {
    let (y, m) = raw
        .split_once('-')
        .ok_or_else(|| anyhow!("invalid month '{raw}' (expected YYYY-MM)"))?;
    let year = y.parse().with_context(|| format!("invalid year in '{raw}'"))?;
    let month = m.parse().with_context(|| format!("invalid month in '{raw}'"))?;
    Ok((year, month))
}

pub(crate) fn parse_cli_date(raw: &str) -> Result<NaiveDate> {
    parse_date(raw).ok_or_else(|| anyhow!("invalid date '{raw}' (expected YYYY-MM-DD)"))
}

pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// `--file` when given, otherwise the data file from settings.
pub(crate) fn open_store(file: Option<String>) -> Store {
    let path = match file {
        Some(f) => PathBuf::from(shellexpand_path(&f)),
        None => get_data_file(),
    };
    Store::new(path)
}
