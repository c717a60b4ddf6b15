//! Personal income and expense tracking on a flat CSV file.
//!
//! [`store::Store`] persists validated transactions, [`query`] selects them by
//! date, [`reports`] totals them and [`series`] shapes the totals for a chart.

pub mod cli;
pub mod error;
pub mod fmt;
pub mod models;
pub mod query;
pub mod reports;
pub mod series;
pub mod settings;
pub mod store;

pub use error::{Result, StorageError, TallyError, ValidationError};
pub use models::{Category, CategoryBreakdown, Summary, Transaction, TransactionInput};
pub use query::{filter_by_range, DateRange};
pub use reports::{breakdown_by, breakdown_by_category, summarize, BreakdownKey};
pub use series::{category_series, cumulative, time_series, CategorySlice, Granularity, SeriesPoint};
pub use store::Store;
