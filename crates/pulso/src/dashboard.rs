//! Dashboard request handler
//!
//! Fetch the trailing entries and the settings, run the engine, and attach
//! goal pace. The result is what gets rendered or emitted as JSON.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::engine::compute_dashboard_metrics;
use crate::model::{DailyEntry, DashboardMetrics, Insight};
use crate::pace::GoalPace;
use crate::store::EntryStore;

/// How many of the latest entries the dashboard lists
pub const RECENT_LIMIT: usize = 10;

/// Everything the dashboard shows for one business
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub metrics: DashboardMetrics,
    pub target_monthly_revenue: Option<f64>,
    pub pace: Option<GoalPace>,
    /// "Ritmo do mês" banner, present whenever `pace` is
    pub banner: Option<Insight>,
    /// Latest entries, newest first
    pub recent_entries: Vec<DailyEntry>,
}

impl DashboardView {
    /// Build the view from entries already fetched
    pub fn from_parts(entries: &[DailyEntry], target_monthly_revenue: Option<f64>) -> Self {
        let metrics = compute_dashboard_metrics(entries);
        let pace = GoalPace::compute(&metrics, target_monthly_revenue);
        let banner = pace.as_ref().map(GoalPace::banner);

        let mut recent_entries = entries.to_vec();
        recent_entries.sort_by(|a, b| b.entry_date.cmp(&a.entry_date));
        recent_entries.truncate(RECENT_LIMIT);

        Self {
            metrics,
            target_monthly_revenue,
            pace,
            banner,
            recent_entries,
        }
    }

    /// Fetch from `store` and build the view
    pub fn load(store: &dyn EntryStore, business_id: &str, window_days: u32) -> Result<Self> {
        let entries = store.fetch_entries(business_id, window_days)?;
        let target = store
            .fetch_settings(business_id)?
            .and_then(|s| s.target_monthly_revenue);
        debug!(
            "Loaded {} entries over {} days, target {:?}",
            entries.len(),
            window_days,
            target
        );

        let view = Self::from_parts(&entries, target);
        info!(
            "Dashboard computed: {} insights, pace {:?}",
            view.metrics.insights.len(),
            view.pace.as_ref().map(|p| p.status.as_str())
        );
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::date_ago;
    use crate::model::{InsightLevel, NewEntry};
    use crate::store::SqliteStore;

    fn seed(store: &SqliteStore, business_id: &str, days_ago: i64, revenue: f64, orders: u32) {
        store
            .upsert_entry(&NewEntry {
                business_id: business_id.to_string(),
                entry_date: date_ago(days_ago),
                revenue,
                orders,
                notes: None,
            })
            .unwrap();
    }

    #[test]
    fn test_empty_business() {
        let store = SqliteStore::open_in_memory().unwrap();
        let biz = store.create_business("owner", "Padaria").unwrap();
        store.upsert_settings(&biz.id, Some(10_000.0)).unwrap();

        let view = DashboardView::load(&store, &biz.id, 40).unwrap();
        assert_eq!(view.metrics, DashboardMetrics::default());
        assert_eq!(view.target_monthly_revenue, Some(10_000.0));
        assert!(view.pace.is_none());
        assert!(view.banner.is_none());
    }

    #[test]
    fn test_load_with_target() {
        let store = SqliteStore::open_in_memory().unwrap();
        let biz = store.create_business("owner", "Padaria").unwrap();
        for days_ago in 1..=3 {
            seed(&store, &biz.id, days_ago, 1000.0, 10);
        }
        store.upsert_settings(&biz.id, Some(30_000.0)).unwrap();

        let view = DashboardView::load(&store, &biz.id, 40).unwrap();
        assert_eq!(view.metrics.last_entry.as_ref().unwrap().entry_date, date_ago(1));
        assert_eq!(view.metrics.insights[0].title, "Construindo referência");

        let pace = view.pace.as_ref().unwrap();
        assert_eq!(view.banner.as_ref().unwrap().level, pace.status);
    }

    #[test]
    fn test_window_excludes_old_entries() {
        let store = SqliteStore::open_in_memory().unwrap();
        let biz = store.create_business("owner", "Padaria").unwrap();
        seed(&store, &biz.id, 1, 500.0, 5);
        seed(&store, &biz.id, 90, 99_999.0, 5);

        let view = DashboardView::load(&store, &biz.id, 40).unwrap();
        assert_eq!(view.metrics.last28_revenue_avg, Some(500.0));
    }

    #[test]
    fn test_no_target_suppresses_pace() {
        let entries = vec![DailyEntry {
            id: "e".to_string(),
            business_id: "b".to_string(),
            entry_date: "2025-03-15".to_string(),
            revenue: 100.0,
            orders: 1,
            notes: None,
            created_at: String::new(),
        }];

        for target in [None, Some(0.0)] {
            let view = DashboardView::from_parts(&entries, target);
            assert!(view.pace.is_none());
            assert!(view.banner.is_none());
        }

        let view = DashboardView::from_parts(&entries, Some(100.0));
        // 100 over 15 days of a 31-day month
        let pace = view.pace.unwrap();
        assert_eq!(pace.goal_pct, 100.0);
        assert_eq!(pace.status, InsightLevel::Success);
    }

    #[test]
    fn test_recent_entries_newest_first() {
        let store = SqliteStore::open_in_memory().unwrap();
        let biz = store.create_business("owner", "Padaria").unwrap();
        for days_ago in 1..=12 {
            seed(&store, &biz.id, days_ago, days_ago as f64, 1);
        }

        let view = DashboardView::load(&store, &biz.id, 40).unwrap();
        assert_eq!(view.recent_entries.len(), RECENT_LIMIT);
        assert_eq!(view.recent_entries[0].entry_date, date_ago(1));
        assert_eq!(view.recent_entries[9].entry_date, date_ago(10));
    }

    #[test]
    fn test_view_serializes() {
        let view = DashboardView::from_parts(&[], None);
        let value = serde_json::to_value(&view).unwrap();
        assert!(value["pace"].is_null());
        assert_eq!(value["metrics"]["monthTotal"], 0.0);
        assert!(value["metrics"]["insights"].as_array().unwrap().is_empty());
    }
}
