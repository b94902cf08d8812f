pub mod review;
pub mod settings;
pub mod stats;

pub use review::{ReviewEntry, ReviewKind};
pub use settings::{SettingsError, UserSettings};
pub use stats::{DailyActivity, HeatLevel, Streak};
