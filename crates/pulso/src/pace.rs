//! Goal pace
//!
//! Month-to-date revenue against the monthly goal, plus a naive linear
//! projection of where the month will close at the current daily average.

use chrono::{Datelike, NaiveDate};
use pulso_core::format::format_brl;
use serde::{Deserialize, Serialize};

use crate::model::{DashboardMetrics, Insight, InsightLevel};

/// Upper bound for displayed goal/pace percentages
pub const MAX_PCT: f64 = 999.0;

/// Progress against the monthly goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalPace {
    pub days_in_month: u32,
    /// Day of the anchor date, at least 1
    pub day_of_month: u32,
    pub projected_month_total: f64,
    /// Month-to-date revenue as a share of the goal, within [0, 999]
    pub goal_pct: f64,
    /// Projection as a share of the goal, within [0, 999]
    pub pace_pct: f64,
    pub status: InsightLevel,
}

/// Number of days in the month of `date`
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// success at or above 100%, warning from 90%, danger below
pub fn pace_status(pace_pct: f64) -> InsightLevel {
    if pace_pct >= 100.0 {
        InsightLevel::Success
    } else if pace_pct >= 90.0 {
        InsightLevel::Warning
    } else {
        InsightLevel::Danger
    }
}

impl GoalPace {
    /// Project the month anchored on the last entry
    ///
    /// `None` without a positive target or without any entry.
    pub fn compute(metrics: &DashboardMetrics, target: Option<f64>) -> Option<Self> {
        let target = target.filter(|t| *t > 0.0)?;
        let last = metrics.last_entry.as_ref()?;
        let anchor = NaiveDate::parse_from_str(&last.entry_date, "%Y-%m-%d").ok()?;

        let days_in_month = days_in_month(anchor);
        let day_of_month = anchor.day().max(1);

        let projected_month_total =
            metrics.month_total / day_of_month as f64 * days_in_month as f64;
        let goal_pct = (metrics.month_total / target * 100.0).clamp(0.0, MAX_PCT);
        let pace_pct = (projected_month_total / target * 100.0).clamp(0.0, MAX_PCT);

        Some(Self {
            days_in_month,
            day_of_month,
            projected_month_total,
            goal_pct,
            pace_pct,
            status: pace_status(pace_pct),
        })
    }

    /// Width of a 0-100 progress bar
    pub fn progress_pct(&self) -> f64 {
        self.goal_pct.clamp(0.0, 100.0)
    }

    /// The "Ritmo do mês" banner shown above the dashboard
    pub fn banner(&self) -> Insight {
        let suffix = if self.day_of_month < 3 {
            " (estimativa inicial)"
        } else if self.day_of_month < 7 {
            " (estimativa preliminar)"
        } else {
            ""
        };

        Insight::new(
            "Ritmo do mês",
            format!(
                "Mantendo esse ritmo, você fecha o mês em {}{}.",
                format_brl(self.projected_month_total),
                suffix
            ),
            self.status,
        )
    }
}
