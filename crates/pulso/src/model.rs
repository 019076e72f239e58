//! Domain records
//!
//! `DailyEntry`, `BusinessSettings` and `Business` are snapshots of what
//! the store holds. `Insight` and `DashboardMetrics` are derived on every
//! computation and never persisted.

use serde::{Deserialize, Deserializer, Serialize};

/// One day's recorded figures for a business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    pub id: String,
    pub business_id: String,
    /// Date in YYYY-MM-DD format, unique per business
    pub entry_date: String,
    /// Missing or null revenue is read as zero
    #[serde(default, deserialize_with = "null_as_zero")]
    pub revenue: f64,
    #[serde(default)]
    pub orders: u32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

impl DailyEntry {
    /// Average order value for the day, if any orders were made
    pub fn ticket(&self) -> Option<f64> {
        if self.orders > 0 {
            Some(self.revenue / self.orders as f64)
        } else {
            None
        }
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// Upsert payload for a day, keyed by (business, date)
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub business_id: String,
    pub entry_date: String,
    pub revenue: f64,
    pub orders: u32,
    pub notes: Option<String>,
}

/// Per-business settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessSettings {
    pub business_id: String,
    /// `None` means no goal has been set
    pub target_monthly_revenue: Option<f64>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub id: String,
    pub owner: String,
    pub name: String,
    pub created_at: String,
}

/// Severity of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightLevel {
    Success,
    Warning,
    Danger,
}

impl InsightLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

/// A short rule-triggered observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub message: String,
    pub level: InsightLevel,
}

impl Insight {
    pub fn new(title: &str, message: impl Into<String>, level: InsightLevel) -> Self {
        Self {
            title: title.to_string(),
            message: message.into(),
            level,
        }
    }
}

/// Everything derived from one business's entry list
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub last_entry: Option<DailyEntry>,
    /// Revenue in the calendar month of `last_entry`
    pub month_total: f64,

    pub last7_revenue_avg: Option<f64>,
    pub last28_revenue_avg: Option<f64>,
    pub last_vs28_pct: Option<f64>,

    pub last_ticket_avg: Option<f64>,
    pub last7_ticket_avg: Option<f64>,
    pub last28_ticket_avg: Option<f64>,
    pub last_ticket_vs7_pct: Option<f64>,

    pub last7_vs28_revenue_pct: Option<f64>,
    pub last7_vs28_ticket_pct: Option<f64>,

    pub insights: Vec<Insight>,
}
