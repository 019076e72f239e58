//! Entry storage
//!
//! `EntryStore` is the boundary the dashboard reads through. `SqliteStore`
//! is the local implementation: one SQLite file holding the business,
//! its settings and its daily entries, at most one entry per
//! (business, date).

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use tracing::debug;

use crate::input::date_ago;
use crate::model::{Business, BusinessSettings, DailyEntry, NewEntry};

/// What the dashboard needs from storage
pub trait EntryStore {
    /// Entries dated from `window_days` ago onwards, ascending by date
    fn fetch_entries(&self, business_id: &str, window_days: u32) -> Result<Vec<DailyEntry>>;

    fn fetch_settings(&self, business_id: &str) -> Result<Option<BusinessSettings>>;

    /// Set (or clear, with `None`) the monthly goal
    fn upsert_settings(&self, business_id: &str, target: Option<f64>) -> Result<()>;

    /// Insert a day, or overwrite the one already recorded for that date
    fn upsert_entry(&self, entry: &NewEntry) -> Result<()>;
}

/// SQLite-backed store
pub struct SqliteStore {
    conn: Connection,
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<DailyEntry> {
    Ok(DailyEntry {
        id: row.get(0)?,
        business_id: row.get(1)?,
        entry_date: row.get(2)?,
        revenue: row.get::<_, Option<f64>>(3)?.unwrap_or(0.0),
        orders: row.get(4)?,
        notes: row.get(5)?,
        created_at: row.get(6)?,
    })
}

impl SqliteStore {
    /// Open or create the database at `db_path`
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create pulso data directory")?;
        }
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open database at {}", db_path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::init(conn)
    }

    /// In-memory store, for tests and dry runs
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS businesses (
                id TEXT PRIMARY KEY,
                owner TEXT NOT NULL,
                name TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS business_settings (
                business_id TEXT PRIMARY KEY REFERENCES businesses(id),
                target_monthly_revenue REAL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS daily_entries (
                id TEXT PRIMARY KEY,
                business_id TEXT NOT NULL REFERENCES businesses(id),
                entry_date TEXT NOT NULL,
                revenue REAL NOT NULL DEFAULT 0,
                orders INTEGER NOT NULL DEFAULT 0,
                notes TEXT,
                created_at TEXT NOT NULL,
                UNIQUE (business_id, entry_date)
            );

            CREATE INDEX IF NOT EXISTS idx_entries_date
                ON daily_entries(business_id, entry_date);
            "#,
        )
        .context("Failed to create pulso tables")?;

        Ok(Self { conn })
    }

    /// Register a business
    pub fn create_business(&self, owner: &str, name: &str) -> Result<Business> {
        let business = Business {
            id: uuid::Uuid::new_v4().to_string(),
            owner: owner.to_string(),
            name: name.to_string(),
            created_at: now(),
        };
        self.conn.execute(
            "INSERT INTO businesses (id, owner, name, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![business.id, business.owner, business.name, business.created_at],
        )?;
        debug!("Created business {} ({})", business.name, business.id);
        Ok(business)
    }

    /// The first registered business, if any
    pub fn fetch_business(&self) -> Result<Option<Business>> {
        self.conn
            .query_row(
                "SELECT id, owner, name, created_at FROM businesses ORDER BY created_at LIMIT 1",
                [],
                |row| {
                    Ok(Business {
                        id: row.get(0)?,
                        owner: row.get(1)?,
                        name: row.get(2)?,
                        created_at: row.get(3)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn rename_business(&self, business_id: &str, name: &str) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE businesses SET name = ?2 WHERE id = ?1",
            params![business_id, name],
        )?;
        if changed == 0 {
            anyhow::bail!("Business not found: {}", business_id);
        }
        Ok(())
    }

    /// Entries dated on or after `from_date`, ascending by date
    pub fn fetch_entries_from(&self, business_id: &str, from_date: &str) -> Result<Vec<DailyEntry>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, business_id, entry_date, revenue, orders, notes, created_at
            FROM daily_entries
            WHERE business_id = ?1 AND entry_date >= ?2
            ORDER BY entry_date ASC
            "#,
        )?;

        let rows = stmt.query_map(params![business_id, from_date], entry_from_row)?;
        let entries = rows.collect::<Result<Vec<_>, _>>()?;
        debug!("Fetched {} entries since {}", entries.len(), from_date);
        Ok(entries)
    }
}

impl EntryStore for SqliteStore {
    fn fetch_entries(&self, business_id: &str, window_days: u32) -> Result<Vec<DailyEntry>> {
        self.fetch_entries_from(business_id, &date_ago(window_days as i64))
    }

    fn fetch_settings(&self, business_id: &str) -> Result<Option<BusinessSettings>> {
        self.conn
            .query_row(
                r#"
                SELECT business_id, target_monthly_revenue, created_at
                FROM business_settings WHERE business_id = ?1
                "#,
                [business_id],
                |row| {
                    Ok(BusinessSettings {
                        business_id: row.get(0)?,
                        target_monthly_revenue: row.get(1)?,
                        created_at: row.get(2)?,
                    })
                },
            )
            .optional()
            .context("Failed to load business settings")
    }

    fn upsert_settings(&self, business_id: &str, target: Option<f64>) -> Result<()> {
        self.conn
            .execute(
                r#"
                INSERT INTO business_settings (business_id, target_monthly_revenue, created_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(business_id) DO UPDATE SET
                    target_monthly_revenue = ?2
                "#,
                params![business_id, target, now()],
            )
            .context("Failed to save business settings")?;
        debug!("Monthly target for {} set to {:?}", business_id, target);
        Ok(())
    }

    fn upsert_entry(&self, entry: &NewEntry) -> Result<()> {
        self.conn
            .execute(
                r#"
                INSERT INTO daily_entries (
                    id, business_id, entry_date, revenue, orders, notes, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                ON CONFLICT(business_id, entry_date) DO UPDATE SET
                    revenue = ?4,
                    orders = ?5,
                    notes = ?6
                "#,
                params![
                    uuid::Uuid::new_v4().to_string(),
                    entry.business_id,
                    entry.entry_date,
                    entry.revenue,
                    entry.orders,
                    entry.notes,
                    now(),
                ],
            )
            .with_context(|| format!("Failed to save entry for {}", entry.entry_date))?;
        debug!("Upserted entry {} for {}", entry.entry_date, entry.business_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn new_entry(business_id: &str, date: &str, revenue: f64, orders: u32) -> NewEntry {
        NewEntry {
            business_id: business_id.to_string(),
            entry_date: date.to_string(),
            revenue,
            orders,
            notes: None,
        }
    }

    #[test]
    fn test_database_creation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("pulso.db");
        let store = SqliteStore::open(&path).unwrap();
        let business = store.create_business("owner", "Padaria").unwrap();
        drop(store);

        let reopened = SqliteStore::open(&path).unwrap();
        let found = reopened.fetch_business().unwrap().unwrap();
        assert_eq!(found, business);
    }

    #[test]
    fn test_no_business() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.fetch_business().unwrap().is_none());
    }

    #[test]
    fn test_rename_business() {
        let store = SqliteStore::open_in_memory().unwrap();
        let business = store.create_business("owner", "Padaria").unwrap();
        store.rename_business(&business.id, "Padaria Central").unwrap();
        assert_eq!(store.fetch_business().unwrap().unwrap().name, "Padaria Central");
        assert!(store.rename_business("missing", "x").is_err());
    }

    #[test]
    fn test_upsert_entry_overwrites_same_date() {
        let store = SqliteStore::open_in_memory().unwrap();
        let biz = store.create_business("owner", "Padaria").unwrap();

        store.upsert_entry(&new_entry(&biz.id, "2025-01-10", 100.0, 2)).unwrap();
        let mut again = new_entry(&biz.id, "2025-01-10", 250.0, 5);
        again.notes = Some("corrigido".to_string());
        store.upsert_entry(&again).unwrap();

        let entries = store.fetch_entries_from(&biz.id, "2025-01-01").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].revenue, 250.0);
        assert_eq!(entries[0].orders, 5);
        assert_eq!(entries[0].notes.as_deref(), Some("corrigido"));
    }

    #[test]
    fn test_fetch_entries_from_is_ordered_and_bounded() {
        let store = SqliteStore::open_in_memory().unwrap();
        let biz = store.create_business("owner", "Padaria").unwrap();
        let other = store.create_business("owner", "Outra").unwrap();

        for date in ["2025-01-09", "2025-01-03", "2025-01-07", "2024-12-30"] {
            store.upsert_entry(&new_entry(&biz.id, date, 10.0, 1)).unwrap();
        }
        store.upsert_entry(&new_entry(&other.id, "2025-01-08", 10.0, 1)).unwrap();

        let entries = store.fetch_entries_from(&biz.id, "2025-01-01").unwrap();
        let dates: Vec<&str> = entries.iter().map(|e| e.entry_date.as_str()).collect();
        assert_eq!(dates, vec!["2025-01-03", "2025-01-07", "2025-01-09"]);
    }

    #[test]
    fn test_fetch_entries_window() {
        let store = SqliteStore::open_in_memory().unwrap();
        let biz = store.create_business("owner", "Padaria").unwrap();
        store.upsert_entry(&new_entry(&biz.id, &date_ago(2), 10.0, 1)).unwrap();
        store.upsert_entry(&new_entry(&biz.id, &date_ago(60), 10.0, 1)).unwrap();

        let entries = store.fetch_entries(&biz.id, 40).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry_date, date_ago(2));
    }

    #[test]
    fn test_settings_roundtrip() {
        let store = SqliteStore::open_in_memory().unwrap();
        let biz = store.create_business("owner", "Padaria").unwrap();
        assert!(store.fetch_settings(&biz.id).unwrap().is_none());

        store.upsert_settings(&biz.id, Some(50_000.0)).unwrap();
        let settings = store.fetch_settings(&biz.id).unwrap().unwrap();
        assert_eq!(settings.target_monthly_revenue, Some(50_000.0));

        store.upsert_settings(&biz.id, None).unwrap();
        let settings = store.fetch_settings(&biz.id).unwrap().unwrap();
        assert!(settings.target_monthly_revenue.is_none());
    }
}
