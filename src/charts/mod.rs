//! Charts module - Interactive plots and static PNG export

mod plotter;
mod renderer;

pub use plotter::{ChartData, ChartPlotter};
pub use renderer::StaticChartRenderer;
