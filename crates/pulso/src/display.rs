//! Display and formatting utilities
//!
//! Terminal rendering of the dashboard: KPI lines, goal progress bar and
//! insights coloured by severity.

use pulso_core::format::{format_brl, format_date_br, format_pct};
use pulso_core::ColorMode;
use std::fmt::Write;

use crate::dashboard::DashboardView;
use crate::model::{DailyEntry, InsightLevel};

/// ANSI color codes (only used when terminal supports it)
pub struct Colors {
    pub red: &'static str,
    pub green: &'static str,
    pub yellow: &'static str,
    pub cyan: &'static str,
    pub bold: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Colors {
    /// Get colors for terminal output
    pub fn new(color_enabled: bool) -> Self {
        if color_enabled {
            Self {
                red: "\x1b[0;31m",
                green: "\x1b[0;32m",
                yellow: "\x1b[0;33m",
                cyan: "\x1b[0;36m",
                bold: "\x1b[1m",
                dim: "\x1b[2m",
                reset: "\x1b[0m",
            }
        } else {
            Self {
                red: "",
                green: "",
                yellow: "",
                cyan: "",
                bold: "",
                dim: "",
                reset: "",
            }
        }
    }

    /// Resolve a configured mode against TTY detection
    pub fn for_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Always => Self::new(true),
            ColorMode::Never => Self::new(false),
            ColorMode::Auto => Self::new(is_tty()),
        }
    }

    /// Colour for a severity level
    pub fn level(&self, level: InsightLevel) -> &'static str {
        match level {
            InsightLevel::Success => self.green,
            InsightLevel::Warning => self.yellow,
            InsightLevel::Danger => self.red,
        }
    }

    /// Red for a decline, green otherwise
    fn signed(&self, value: f64) -> &'static str {
        if value < 0.0 {
            self.red
        } else {
            self.green
        }
    }
}

/// Check if stdout is a TTY
fn is_tty() -> bool {
    #[cfg(unix)]
    unsafe {
        libc::isatty(libc::STDOUT_FILENO) != 0
    }

    #[cfg(not(unix))]
    true
}

/// Draw a simple bar chart for a 0-100 percentage
pub fn draw_bar(pct: f64, width: usize) -> String {
    let filled = ((pct.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!(
        "{}{}",
        "\u{2588}".repeat(filled),
        "\u{2591}".repeat(width - filled)
    )
}

/// Format a section header
pub fn section_header(title: &str, colors: &Colors) -> String {
    format!("{}{}{}", colors.cyan, title, colors.reset)
}

/// Format a bold title
pub fn title(text: &str, colors: &Colors) -> String {
    format!("{}{}{}", colors.bold, text, colors.reset)
}

fn money_or(value: Option<f64>, placeholder: &str) -> String {
    value.map(format_brl).unwrap_or_else(|| placeholder.to_string())
}

fn kpi(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "  {:<36} {}", format!("{}:", label), value);
}

fn kpi_pct(out: &mut String, label: &str, value: Option<f64>, colors: &Colors) {
    let shown = match value {
        Some(pct) => format!("{}{}{}", colors.signed(pct), format_pct(pct), colors.reset),
        None => "-".to_string(),
    };
    kpi(out, label, &shown);
}

/// One line of the entries listing
pub fn format_entry_row(entry: &DailyEntry, colors: &Colors) -> String {
    let mut row = format!(
        "  {}{}{}  {:>16}  {}{} pedidos{}",
        colors.dim,
        format_date_br(&entry.entry_date),
        colors.reset,
        format_brl(entry.revenue),
        colors.dim,
        entry.orders,
        colors.reset
    );
    if let Some(notes) = &entry.notes {
        let _ = write!(row, "  {}", notes);
    }
    row
}

/// Render the whole dashboard
pub fn render_dashboard(view: &DashboardView, business_name: &str, colors: &Colors) -> String {
    let m = &view.metrics;
    let mut out = String::new();

    let _ = writeln!(out, "{}", title(business_name, colors));
    let _ = writeln!(out, "{}Dashboard{}", colors.dim, colors.reset);
    let _ = writeln!(out);

    if let Some(banner) = &view.banner {
        let _ = writeln!(
            out,
            "{}{}:{} {}",
            colors.level(banner.level),
            banner.title,
            colors.reset,
            banner.message
        );
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "{}", section_header("Faturamento", colors));
    let last = match &m.last_entry {
        Some(entry) => format!(
            "{} ({})",
            format_brl(entry.revenue),
            format_date_br(&entry.entry_date)
        ),
        None => "Sem lançamentos".to_string(),
    };
    kpi(&mut out, "Último lançamento", &last);
    kpi(&mut out, "Média da última semana", &money_or(m.last7_revenue_avg, "Construindo..."));
    kpi(&mut out, "Média das últimas 4 semanas", &money_or(m.last28_revenue_avg, "Construindo..."));
    kpi_pct(&mut out, "Último vs últimas 4 semanas", m.last_vs28_pct, colors);
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", section_header("Ticket médio", colors));
    kpi(&mut out, "Ticket do último dia", &money_or(m.last_ticket_avg, "-"));
    kpi(&mut out, "Ticket médio da última semana", &money_or(m.last7_ticket_avg, "Construindo..."));
    kpi(&mut out, "Ticket médio das últimas 4 semanas", &money_or(m.last28_ticket_avg, "Construindo..."));
    kpi_pct(&mut out, "Ticket último vs última semana", m.last_ticket_vs7_pct, colors);
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", section_header("Meta do mês", colors));
    kpi(&mut out, "Faturamento do mês", &format_brl(m.month_total));
    let target = view
        .target_monthly_revenue
        .filter(|t| *t > 0.0)
        .map(format_brl)
        .unwrap_or_else(|| "Sem meta".to_string());
    kpi(&mut out, "Meta mensal", &target);
    match &view.pace {
        Some(pace) => {
            let color = colors.level(pace.status);
            let progress = format!(
                "{}{} {}{}",
                color,
                draw_bar(pace.progress_pct(), 20),
                format_pct(pace.goal_pct),
                colors.reset
            );
            kpi(&mut out, "Progresso da meta", &progress);
            let _ = writeln!(
                out,
                "  Ritmo do mês: {}{}{} da meta (projeção: {}).",
                colors.bold,
                format_pct(pace.pace_pct),
                colors.reset,
                format_brl(pace.projected_month_total)
            );
        }
        None => {
            let _ = writeln!(
                out,
                "  {}Defina uma meta com `pulso target`.{}",
                colors.dim, colors.reset
            );
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", section_header("Insights", colors));
    if m.insights.is_empty() {
        let _ = writeln!(out, "  {}Nenhum insight agora.{}", colors.dim, colors.reset);
    }
    for insight in &m.insights {
        let _ = writeln!(
            out,
            "  {}{}:{} {}",
            colors.level(insight.level),
            insight.title,
            colors.reset,
            insight.message
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", section_header("Últimos lançamentos", colors));
    if view.recent_entries.is_empty() {
        let _ = writeln!(out, "  {}Nenhum lançamento ainda.{}", colors.dim, colors.reset);
    }
    for entry in &view.recent_entries {
        let _ = writeln!(out, "{}", format_entry_row(entry, colors));
    }

    out
}
