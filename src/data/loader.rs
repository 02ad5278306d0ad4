//! CSV Data Loader Module
//! Handles dataset loading, column metadata and sampling using Polars.

use polars::prelude::*;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Data file not found: {0}")]
    NotFound(PathBuf),
    #[error("No data loaded")]
    NoData,
}

/// Metadata row for the column information table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub non_null_count: usize,
    pub dtype: String,
}

/// Holds the source dataset. The frame is never mutated after loading.
pub struct DataLoader {
    df: Option<DataFrame>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Integer and float columns count as numeric.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Render a single cell for display.
pub fn format_cell(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => "NaN".to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::Float32(v) => format!("{:.2}", v),
        AnyValue::Float64(v) => format!("{:.2}", v),
        other => other.to_string().trim_matches('"').to_string(),
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            file_path: None,
        }
    }

    /// Read a CSV file into a DataFrame, trimming whitespace around header names.
    pub fn read_csv(file_path: &Path) -> Result<DataFrame, LoaderError> {
        if !file_path.exists() {
            return Err(LoaderError::NotFound(file_path.to_path_buf()));
        }

        let mut df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        if df.width() == 0 {
            return Err(LoaderError::NoData);
        }

        let renames: Vec<(String, String)> = df
            .get_column_names()
            .iter()
            .filter_map(|name| {
                let trimmed = name.trim();
                (trimmed != name.as_str()).then(|| (name.to_string(), trimmed.to_string()))
            })
            .collect();
        for (old, new) in renames {
            df.rename(&old, new.into())?;
        }

        Ok(df)
    }

    /// Load a CSV file and keep it as the source dataset.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, LoaderError> {
        let df = Self::read_csv(file_path)?;
        self.file_path = Some(file_path.to_path_buf());
        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Get list of column names from loaded DataFrame.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get list of numeric column names, in file order.
    pub fn get_numeric_columns(&self) -> Vec<String> {
        let Some(df) = &self.df else {
            return Vec::new();
        };

        df.get_columns()
            .iter()
            .filter(|col| is_numeric_dtype(col.dtype()))
            .map(|col| col.name().to_string())
            .collect()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.df
            .as_ref()
            .is_some_and(|df| df.get_column_index(column).is_some())
    }

    /// Get sorted unique non-null values from a column.
    pub fn get_unique_values(&self, column: &str) -> Vec<String> {
        let Some(df) = &self.df else {
            return Vec::new();
        };

        let mut values: Vec<String> = df
            .column(column)
            .ok()
            .and_then(|col| col.unique().ok())
            .map(|unique| {
                let series = unique.as_materialized_series();
                (0..series.len())
                    .filter_map(|i| {
                        let val = series.get(i).ok()?;
                        if val.is_null() {
                            None
                        } else {
                            Some(val.to_string().trim_matches('"').to_string())
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();
        values.sort();
        values
    }

    /// Number of distinct non-null values in a column.
    pub fn n_unique(&self, column: &str) -> Option<usize> {
        let df = self.df.as_ref()?;
        let col = df.column(column).ok()?;
        col.as_materialized_series().drop_nulls().n_unique().ok()
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// First `n` rows formatted for display.
    pub fn head(&self, n: usize) -> Vec<Vec<String>> {
        let Some(df) = &self.df else {
            return Vec::new();
        };

        let head = df.head(Some(n));
        let columns = head.get_columns();
        (0..head.height())
            .map(|row| {
                columns
                    .iter()
                    .map(|col| {
                        col.get(row)
                            .map(|v| format_cell(&v))
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect()
    }

    /// Per-column name, non-null count and data type.
    pub fn column_info(&self) -> Vec<ColumnInfo> {
        let Some(df) = &self.df else {
            return Vec::new();
        };

        df.get_columns()
            .par_iter()
            .map(|col| ColumnInfo {
                name: col.name().to_string(),
                non_null_count: col.len() - col.null_count(),
                dtype: col.dtype().to_string(),
            })
            .collect()
    }

    /// Get a reference to the loaded DataFrame.
    pub fn get_dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    /// Get file path.
    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }
}
