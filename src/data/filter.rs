//! Data Filter Module
//! Category and calorie range filters, expressed as boolean masks over the source frame.

use crate::config::AppConfig;
use polars::prelude::*;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column not found: {0}")]
    MissingColumn(String),
}

/// User-selected restrictions on the dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Empty means every category
    pub categories: Vec<String>,
    /// Inclusive calorie bounds; `None` means the full range
    pub calorie_range: Option<(i64, i64)>,
}

/// Derived view produced by applying a [`FilterState`].
#[derive(Debug, Clone)]
pub struct FilteredView {
    pub frame: DataFrame,
    /// Bounds of the calorie column after the category filter
    pub calorie_bounds: Option<(i64, i64)>,
    /// Range actually applied, clamped into `calorie_bounds`
    pub calorie_range: Option<(i64, i64)>,
}

impl FilteredView {
    pub fn row_count(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }
}

pub struct DataFilter;

impl DataFilter {
    fn column<'a>(df: &'a DataFrame, column: &str) -> Result<&'a Column, FilterError> {
        df.column(column)
            .map_err(|_| FilterError::MissingColumn(column.to_string()))
    }

    /// Mask of rows whose category is in `categories`. An empty selection keeps every row.
    pub fn category_mask(
        df: &DataFrame,
        column: &str,
        categories: &[String],
    ) -> Result<BooleanChunked, FilterError> {
        let col = Self::column(df, column)?;
        if categories.is_empty() {
            return Ok((0..df.height()).map(|_| true).collect());
        }

        let wanted: HashSet<&str> = categories.iter().map(String::as_str).collect();
        let as_str = col.cast(&DataType::String)?;
        let mask = as_str
            .str()?
            .into_iter()
            .map(|v| v.is_some_and(|s| wanted.contains(s)))
            .collect();
        Ok(mask)
    }

    /// Mask of rows with `lo <= value <= hi`. Nulls never match.
    pub fn calorie_mask(
        df: &DataFrame,
        column: &str,
        lo: i64,
        hi: i64,
    ) -> Result<BooleanChunked, FilterError> {
        let col = Self::column(df, column)?;
        let (lo, hi) = (lo as f64, hi as f64);
        let as_f64 = col.cast(&DataType::Float64)?;
        let mask = as_f64
            .f64()?
            .into_iter()
            .map(|v| v.is_some_and(|x| x >= lo && x <= hi))
            .collect();
        Ok(mask)
    }

    /// Integer-truncated minimum and maximum of a numeric column. A fractional
    /// maximum lies above the upper bound, so the full range excludes it.
    pub fn calorie_bounds(df: &DataFrame, column: &str) -> Result<Option<(i64, i64)>, FilterError> {
        let col = Self::column(df, column)?;
        let as_f64 = col.cast(&DataType::Float64)?;
        let values = as_f64.f64()?;

        let bounds = values
            .into_iter()
            .flatten()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            });

        Ok(bounds.map(|(lo, hi)| (lo as i64, hi as i64)))
    }

    /// Clamp a selected range into `bounds`, keeping `lo <= hi`.
    pub fn clamp_range(range: (i64, i64), bounds: (i64, i64)) -> (i64, i64) {
        let lo = range.0.clamp(bounds.0, bounds.1);
        let hi = range.1.clamp(bounds.0, bounds.1);
        if lo <= hi {
            (lo, hi)
        } else {
            (hi, lo)
        }
    }

    /// Apply the category filter, then the calorie filter.
    ///
    /// Calorie bounds are taken from the category-filtered rows, so narrowing
    /// the categories also narrows the selectable calorie range. Filters whose
    /// column is absent from the dataset are skipped.
    pub fn apply(
        df: &DataFrame,
        config: &AppConfig,
        state: &FilterState,
    ) -> Result<FilteredView, FilterError> {
        let has = |name: &str| df.get_column_index(name).is_some();

        let by_category = if has(&config.category_column) && !state.categories.is_empty() {
            let mask = Self::category_mask(df, &config.category_column, &state.categories)?;
            df.filter(&mask)?
        } else {
            df.clone()
        };

        if !has(&config.calorie_column) {
            return Ok(FilteredView {
                frame: by_category,
                calorie_bounds: None,
                calorie_range: None,
            });
        }

        let Some(bounds) = Self::calorie_bounds(&by_category, &config.calorie_column)? else {
            return Ok(FilteredView {
                frame: by_category,
                calorie_bounds: None,
                calorie_range: None,
            });
        };

        let range = Self::clamp_range(state.calorie_range.unwrap_or(bounds), bounds);
        let mask = Self::calorie_mask(&by_category, &config.calorie_column, range.0, range.1)?;
        let frame = by_category.filter(&mask)?;

        log::debug!(
            "Filter applied: {} categories, calories {}..={}, {} rows",
            state.categories.len(),
            range.0,
            range.1,
            frame.height()
        );

        Ok(FilteredView {
            frame,
            calorie_bounds: Some(bounds),
            calorie_range: Some(range),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::tests::sample_loader;
    use crate::data::DataLoader;
    use std::io::Write;

    fn selected(mask: &BooleanChunked) -> usize {
        mask.into_iter().flatten().filter(|v| *v).count()
    }

    fn sample_frame() -> DataFrame {
        sample_loader()
            .get_dataframe()
            .cloned()
            .expect("sample frame")
    }

    /// Second row has no category, third has no calories, the last one a fractional maximum.
    fn sparse_frame() -> DataFrame {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("temp file");
        file.write_all(
            b"Beverage_category,Beverage,Calories\n\
              Coffee,Brewed Coffee,10\n\
              ,Mystery Drink,20\n\
              Tea,Green Tea,\n\
              Coffee,Caffe Mocha,30.5\n",
        )
        .expect("write csv");
        DataLoader::read_csv(file.path()).expect("sparse frame")
    }

    #[test]
    fn test_empty_category_selection_keeps_all() {
        let df = sample_frame();
        let mask = DataFilter::category_mask(&df, "Beverage_category", &[]).expect("mask");
        assert_eq!(selected(&mask), 10);
    }

    #[test]
    fn test_category_mask_selects_members() {
        let df = sample_frame();
        let wanted = vec!["Coffee".to_string(), "Smoothies".to_string()];
        let mask = DataFilter::category_mask(&df, "Beverage_category", &wanted).expect("mask");
        assert_eq!(selected(&mask), 4);
    }

    #[test]
    fn test_missing_column_is_error() {
        let df = sample_frame();
        let err = DataFilter::category_mask(&df, "Nope", &[]).unwrap_err();
        assert!(matches!(err, FilterError::MissingColumn(_)));
    }

    #[test]
    fn test_calorie_bounds() {
        let df = sample_frame();
        let bounds = DataFilter::calorie_bounds(&df, "Calories").expect("bounds");
        assert_eq!(bounds, Some((3, 510)));
    }

    #[test]
    fn test_calorie_bounds_are_inclusive() {
        let df = sample_frame();
        let mask = DataFilter::calorie_mask(&df, "Calories", 70, 160).expect("mask");
        // 70, 130, 160
        assert_eq!(selected(&mask), 3);
    }

    #[test]
    fn test_full_range_keeps_every_row() {
        let df = sample_frame();
        let view = DataFilter::apply(&df, &AppConfig::default(), &FilterState::default())
            .expect("apply");
        assert_eq!(view.row_count(), 10);
        assert_eq!(view.calorie_range, Some((3, 510)));
    }

    #[test]
    fn test_narrowing_range_is_monotone() {
        let df = sample_frame();
        let config = AppConfig::default();
        let mut previous = usize::MAX;

        for (lo, hi) in [(3, 510), (50, 500), (100, 400), (200, 300), (250, 260), (255, 255)] {
            let state = FilterState {
                categories: Vec::new(),
                calorie_range: Some((lo, hi)),
            };
            let rows = DataFilter::apply(&df, &config, &state).expect("apply").row_count();
            assert!(rows <= previous, "range {lo}..={hi} grew the view");
            previous = rows;
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn test_bounds_follow_category_filter() {
        let df = sample_frame();
        let state = FilterState {
            categories: vec!["Smoothies".to_string()],
            calorie_range: Some((0, 1000)),
        };
        let view = DataFilter::apply(&df, &AppConfig::default(), &state).expect("apply");
        assert_eq!(view.calorie_bounds, Some((260, 280)));
        assert_eq!(view.calorie_range, Some((260, 280)));
        assert_eq!(view.row_count(), 2);
    }

    #[test]
    fn test_unknown_category_empties_view() {
        let df = sample_frame();
        let state = FilterState {
            categories: vec!["Juice".to_string()],
            calorie_range: None,
        };
        let view = DataFilter::apply(&df, &AppConfig::default(), &state).expect("apply");
        assert!(view.is_empty());
        assert_eq!(view.calorie_bounds, None);
    }

    #[test]
    fn test_clamp_range() {
        assert_eq!(DataFilter::clamp_range((0, 1000), (10, 20)), (10, 20));
        assert_eq!(DataFilter::clamp_range((12, 15), (10, 20)), (12, 15));
        assert_eq!(DataFilter::clamp_range((30, 40), (10, 20)), (20, 20));
    }

    #[test]
    fn test_missing_optional_columns_are_skipped() {
        let df = sample_frame();
        let config = AppConfig {
            category_column: "Kind".to_string(),
            calorie_column: "Energy".to_string(),
            ..AppConfig::default()
        };
        let state = FilterState {
            categories: vec!["Coffee".to_string()],
            calorie_range: Some((0, 1)),
        };
        let view = DataFilter::apply(&df, &config, &state).expect("apply");
        assert_eq!(view.row_count(), 10);
        assert_eq!(view.calorie_bounds, None);
    }

    #[test]
    fn test_null_category_never_matches() {
        let df = sparse_frame();
        let wanted = vec!["Coffee".to_string()];
        let mask = DataFilter::category_mask(&df, "Beverage_category", &wanted).expect("mask");
        let flags: Vec<Option<bool>> = mask.into_iter().collect();
        assert_eq!(flags, vec![Some(true), Some(false), Some(false), Some(true)]);
    }

    #[test]
    fn test_null_calories_never_match() {
        let df = sparse_frame();
        let mask = DataFilter::calorie_mask(&df, "Calories", 0, 100).expect("mask");
        let flags: Vec<Option<bool>> = mask.into_iter().collect();
        assert_eq!(flags, vec![Some(true), Some(true), Some(false), Some(true)]);
    }

    #[test]
    fn test_full_range_uses_truncated_bounds() {
        let df = sparse_frame();
        let config = AppConfig::default();

        let view = DataFilter::apply(&df, &config, &FilterState::default()).expect("apply");
        assert_eq!(view.calorie_bounds, Some((10, 30)));
        assert_eq!(view.calorie_range, Some((10, 30)));
        // 30.5 lies above the truncated maximum; the null row never matches
        assert_eq!(view.row_count(), 2);

        let state = FilterState {
            categories: vec!["Coffee".to_string()],
            calorie_range: None,
        };
        let view = DataFilter::apply(&df, &config, &state).expect("apply");
        assert_eq!(view.calorie_bounds, Some((10, 30)));
        assert_eq!(view.row_count(), 1);
    }
}
