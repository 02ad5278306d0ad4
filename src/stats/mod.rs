//! Stats module - Descriptive statistics and chart summaries

mod calculator;

pub use calculator::{BoxStats, HistogramData, StatsCalculator, SummaryStats};
