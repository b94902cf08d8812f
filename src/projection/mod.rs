pub mod calculator;
pub mod pace;

pub use calculator::{CompletionData, Forecast, ProjectionCalculator};
pub use pace::PaceSummary;
