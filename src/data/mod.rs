//! Data module - CSV loading and filtering

mod filter;
pub(crate) mod loader;

pub use filter::{DataFilter, FilterState, FilteredView};
pub use loader::{ColumnInfo, DataLoader};
