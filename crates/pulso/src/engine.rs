//! Metrics engine
//!
//! Turns a business's daily entries into a `DashboardMetrics` bundle:
//! - Revenue and ticket averages over the trailing 7 and 28 entries
//! - Percentage deltas between the last day and those windows
//! - Revenue for the month of the most recent entry
//! - Threshold insights, in a fixed display order
//!
//! Pure and total: every input, including an empty one, yields a value.

use chrono::{Datelike, NaiveDate};
use pulso_core::format::whole_percent;

use crate::model::{DailyEntry, DashboardMetrics, Insight, InsightLevel};

/// Entries making up the short window
pub const SHORT_WINDOW: usize = 7;
/// Entries making up the long window
pub const LONG_WINDOW: usize = 28;

const LAST_VS_28_THRESHOLD: f64 = 20.0;
const TICKET_VS_7_THRESHOLD: f64 = 15.0;
const WEEK_VS_28_THRESHOLD: f64 = 12.0;

/// Percentage change of `current` relative to `base`
///
/// `None` when either side is missing or the base is exactly zero.
pub fn pct_change(current: Option<f64>, base: Option<f64>) -> Option<f64> {
    match (current, base) {
        (Some(current), Some(base)) if base != 0.0 => Some((current - base) / base * 100.0),
        _ => None,
    }
}

/// Mean revenue of a window
pub fn revenue_avg(window: &[&DailyEntry]) -> Option<f64> {
    if window.is_empty() {
        return None;
    }
    let sum: f64 = window.iter().map(|e| e.revenue).sum();
    Some(sum / window.len() as f64)
}

/// Mean of each day's own ticket; days without orders count as zero
pub fn ticket_avg(window: &[&DailyEntry]) -> Option<f64> {
    if window.is_empty() {
        return None;
    }
    let sum: f64 = window.iter().map(|e| e.ticket().unwrap_or(0.0)).sum();
    Some(sum / window.len() as f64)
}

fn year_month(date: &str) -> Option<(i32, u32)> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|d| (d.year(), d.month()))
}

/// Revenue of the entries sharing the last entry's calendar month
///
/// `sorted` must be in ascending date order.
pub fn month_total(sorted: &[&DailyEntry]) -> f64 {
    let Some(anchor) = sorted.last().and_then(|last| year_month(&last.entry_date)) else {
        return 0.0;
    };

    sorted
        .iter()
        .filter(|e| year_month(&e.entry_date) == Some(anchor))
        .map(|e| e.revenue)
        .sum()
}

/// The last `n` elements (or all of them, if fewer)
fn trailing<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}

/// Compute the dashboard bundle for one business
pub fn compute_dashboard_metrics(entries: &[DailyEntry]) -> DashboardMetrics {
    if entries.is_empty() {
        return DashboardMetrics::default();
    }

    // Stable: among duplicated dates the later input element ends up last
    let mut sorted: Vec<&DailyEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.entry_date.cmp(&b.entry_date));

    let last = sorted[sorted.len() - 1];
    let last7 = trailing(&sorted, SHORT_WINDOW);
    let last28 = trailing(&sorted, LONG_WINDOW);

    let last7_revenue_avg = revenue_avg(last7);
    let last28_revenue_avg = revenue_avg(last28);

    let last_ticket_avg = last.ticket();
    let last7_ticket_avg = ticket_avg(last7);
    let last28_ticket_avg = ticket_avg(last28);

    let last_vs28_pct = pct_change(Some(last.revenue), last28_revenue_avg);
    let last_ticket_vs7_pct = pct_change(last_ticket_avg, last7_ticket_avg);
    let last7_vs28_revenue_pct = pct_change(last7_revenue_avg, last28_revenue_avg);
    let last7_vs28_ticket_pct = pct_change(last7_ticket_avg, last28_ticket_avg);

    let insights = build_insights(
        sorted.len(),
        last_vs28_pct,
        last_ticket_vs7_pct,
        last7_vs28_revenue_pct,
        last7_vs28_ticket_pct,
    );

    DashboardMetrics {
        last_entry: Some(last.clone()),
        month_total: month_total(&sorted),
        last7_revenue_avg,
        last28_revenue_avg,
        last_vs28_pct,
        last_ticket_avg,
        last7_ticket_avg,
        last28_ticket_avg,
        last_ticket_vs7_pct,
        last7_vs28_revenue_pct,
        last7_vs28_ticket_pct,
        insights,
    }
}

/// One threshold rule: a decline insight, a rise insight, or nothing
struct Rule {
    threshold: f64,
    down_title: &'static str,
    down_level: InsightLevel,
    up_title: &'static str,
    /// Sentence with `{}` standing for "N% abaixo" / "N% acima"
    template: &'static str,
}

impl Rule {
    fn evaluate(&self, pct: Option<f64>) -> Option<Insight> {
        let pct = pct?;
        if pct <= -self.threshold {
            let detail = format!("{}% abaixo", whole_percent(pct.abs()));
            Some(Insight::new(
                self.down_title,
                self.template.replace("{}", &detail),
                self.down_level,
            ))
        } else if pct >= self.threshold {
            let detail = format!("{}% acima", whole_percent(pct));
            Some(Insight::new(
                self.up_title,
                self.template.replace("{}", &detail),
                InsightLevel::Success,
            ))
        } else {
            None
        }
    }
}

const LAST_DAY_RULE: Rule = Rule {
    threshold: LAST_VS_28_THRESHOLD,
    down_title: "Queda fora do normal",
    down_level: InsightLevel::Danger,
    up_title: "Dia acima do normal",
    template: "Seu último lançamento está {} da média das últimas 4 semanas.",
};

const LAST_TICKET_RULE: Rule = Rule {
    threshold: TICKET_VS_7_THRESHOLD,
    down_title: "Ticket caiu",
    down_level: InsightLevel::Warning,
    up_title: "Ticket subiu",
    template: "O ticket do último dia ficou {} do ticket médio da última semana.",
};

const WEEK_REVENUE_RULE: Rule = Rule {
    threshold: WEEK_VS_28_THRESHOLD,
    down_title: "Semana mais fraca",
    down_level: InsightLevel::Warning,
    up_title: "Semana mais forte",
    template: "A média da última semana está {} da média das últimas 4 semanas.",
};

const WEEK_TICKET_RULE: Rule = Rule {
    threshold: WEEK_VS_28_THRESHOLD,
    down_title: "Ticket da semana caiu",
    down_level: InsightLevel::Warning,
    up_title: "Ticket da semana subiu",
    template: "O ticket médio da última semana está {} da média das últimas 4 semanas.",
};

fn build_insights(
    entry_count: usize,
    last_vs28_pct: Option<f64>,
    last_ticket_vs7_pct: Option<f64>,
    last7_vs28_revenue_pct: Option<f64>,
    last7_vs28_ticket_pct: Option<f64>,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    // Too little history: a reference notice always leads the list
    if entry_count < SHORT_WINDOW {
        insights.push(Insight::new(
            "Construindo referência",
            "Com ~7 dias de lançamentos, as comparações ficam mais úteis.",
            InsightLevel::Warning,
        ));
    } else if entry_count < 2 * SHORT_WINDOW {
        insights.push(Insight::new(
            "Aprimorando referência",
            "Com ~14 dias de lançamentos, as comparações ficam mais confiáveis.",
            InsightLevel::Success,
        ));
    }

    let rules = [
        (&LAST_DAY_RULE, last_vs28_pct),
        (&LAST_TICKET_RULE, last_ticket_vs7_pct),
        (&WEEK_REVENUE_RULE, last7_vs28_revenue_pct),
        (&WEEK_TICKET_RULE, last7_vs28_ticket_pct),
    ];
    insights.extend(rules.iter().filter_map(|(rule, pct)| rule.evaluate(*pct)));

    insights
}
