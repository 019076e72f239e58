//! pulso - Daily operations dashboard for small businesses
//!
//! Owners record one entry per day (revenue and order count). From that
//! time series pulso derives rolling averages, ticket size, a linear
//! month-end projection against the monthly goal, and short rule-based
//! insights.
//!
//! Commands:
//! - setup: Register the business
//! - entry: Record (or overwrite) a day
//! - target: Set or clear the monthly revenue goal
//! - dashboard: KPIs, goal pace and insights (default)
//! - entries: Recent raw entries

pub mod dashboard;
pub mod display;
pub mod engine;
pub mod input;
pub mod model;
pub mod pace;
pub mod store;

pub use dashboard::DashboardView;
pub use engine::compute_dashboard_metrics;
pub use model::{
    Business, BusinessSettings, DailyEntry, DashboardMetrics, Insight, InsightLevel, NewEntry,
};
pub use pace::GoalPace;
pub use store::{EntryStore, SqliteStore};
