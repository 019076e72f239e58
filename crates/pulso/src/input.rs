//! Owner input: parsing and validation
//!
//! Figures arrive as typed text ("3300,50", "1.234,56"); dates as ISO
//! strings. Validation happens here so the engine can stay permissive.

use chrono::{Duration, NaiveDate, Utc};
use pulso_core::format::parse_number_pt_br;
use thiserror::Error;

use crate::model::NewEntry;

/// Rejected owner input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Selecione uma data.")]
    MissingDate,

    #[error("Data inválida: {0} (use AAAA-MM-DD).")]
    InvalidDate(String),

    #[error("Faturamento inválido (ex: 3300 ou 3300,50).")]
    InvalidRevenue,

    #[error("Pedidos deve ser um número inteiro.")]
    InvalidOrders,

    #[error("Meta inválida (ex: 50000 ou 50000,50).")]
    InvalidTarget,

    #[error("Nome da empresa é obrigatório.")]
    EmptyBusinessName,
}

/// Raw text of a day being recorded
#[derive(Debug, Clone, Default)]
pub struct EntryForm {
    pub entry_date: String,
    pub revenue: String,
    pub orders: String,
    pub notes: String,
}

impl EntryForm {
    /// Validate into an upsert payload for `business_id`
    pub fn validate(&self, business_id: &str) -> Result<NewEntry, InputError> {
        let entry_date = self.entry_date.trim();
        if entry_date.is_empty() {
            return Err(InputError::MissingDate);
        }
        parse_date(entry_date)?;

        let revenue = parse_number_pt_br(&self.revenue)
            .filter(|r| *r >= 0.0)
            .ok_or(InputError::InvalidRevenue)?;
        let orders = parse_orders(&self.orders).ok_or(InputError::InvalidOrders)?;

        let notes = self.notes.trim();
        Ok(NewEntry {
            business_id: business_id.to_string(),
            entry_date: entry_date.to_string(),
            revenue,
            orders,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        })
    }
}

/// Parse an order count; blank means zero
pub fn parse_orders(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    let n: f64 = trimmed.parse().ok()?;
    if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= u32::MAX as f64 {
        Some(n as u32)
    } else {
        None
    }
}

/// Parse a monthly goal; blank clears it
pub fn parse_target(value: &str) -> Result<Option<f64>, InputError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_number_pt_br(value)
        .filter(|t| *t >= 0.0)
        .map(Some)
        .ok_or(InputError::InvalidTarget)
}

/// Validate a business name
pub fn parse_business_name(value: &str) -> Result<String, InputError> {
    let name = value.trim();
    if name.is_empty() {
        Err(InputError::EmptyBusinessName)
    } else {
        Ok(name.to_string())
    }
}

/// Parse an ISO "YYYY-MM-DD" date
pub fn parse_date(value: &str) -> Result<NaiveDate, InputError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| InputError::InvalidDate(value.to_string()))
}

/// Get date string for N days ago
pub fn date_ago(days: i64) -> String {
    let date = Utc::now() - Duration::days(days);
    date.format("%Y-%m-%d").to_string()
}

/// Default date for a new entry
pub fn yesterday() -> String {
    date_ago(1)
}

/// Shift an ISO date by `days`
pub fn add_days(iso: &str, days: i64) -> Result<String, InputError> {
    let date = parse_date(iso)? + Duration::days(days);
    Ok(date.format("%Y-%m-%d").to_string())
}
