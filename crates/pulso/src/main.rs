//! pulso - Daily operations dashboard for small businesses
//!
//! Record one line per day; read back averages, ticket size, goal pace
//! and insights.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use pulso_core::format::format_brl;
use pulso_core::{Config, Paths};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pulso::display::{format_entry_row, render_dashboard, section_header, Colors};
use pulso::input::{self, EntryForm};
use pulso::model::Business;
use pulso::{DashboardView, EntryStore, SqliteStore};

#[derive(Parser)]
#[command(name = "pulso")]
#[command(about = "Daily revenue dashboard - averages, ticket size, goal pace and insights")]
#[command(version)]
#[command(after_help = r#"EXAMPLES:
    pulso setup "Padaria Central" --target 50000
    pulso entry --revenue 3300,50 --orders 39
    pulso entry --date 2025-01-10 --revenue 1.250,00 --orders 12 --next
    pulso target 50000                 # Monthly goal
    pulso target                       # Clear the goal
    pulso                              # Dashboard (default)
    pulso dashboard --json

CONFIG:
    ~/.config/pulso/pulso.yaml (window_days, data_dir, color)
    RUST_LOG=debug for diagnostics
"#)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Register the business
    Setup {
        /// Business name
        name: String,

        /// Initial monthly revenue goal, e.g. 50000 or 50000,50
        #[arg(long, default_value = "")]
        target: String,
    },

    /// Rename the business
    Rename {
        /// New business name
        name: String,
    },

    /// Record a day (overwrites an existing entry for the same date)
    Entry {
        /// Date as YYYY-MM-DD (default: yesterday)
        #[arg(long)]
        date: Option<String>,

        /// Revenue, e.g. 3300 or 3300,50
        #[arg(long)]
        revenue: String,

        /// Number of orders
        #[arg(long, default_value = "")]
        orders: String,

        /// Free-text note (campaign, holiday, ...)
        #[arg(long, default_value = "")]
        notes: String,

        /// Print the following date, for recording history day by day
        #[arg(long)]
        next: bool,
    },

    /// Set the monthly revenue goal (no value clears it)
    Target {
        /// Goal, e.g. 50000 or 50000,50
        value: Option<String>,
    },

    /// KPIs, goal pace and insights (default)
    Dashboard {
        /// Days of history to fetch (default: from config)
        #[arg(long)]
        days: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List recorded entries
    Entries {
        /// Days to look back (default: from config)
        #[arg(long)]
        days: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging to stderr (stdout carries --json output)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let store = SqliteStore::open(&config.database_path(&Paths::new()))?;

    match cli.command {
        Some(Commands::Setup { name, target }) => cmd_setup(&store, &name, &target),
        Some(Commands::Rename { name }) => cmd_rename(&store, &name),
        Some(Commands::Entry {
            date,
            revenue,
            orders,
            notes,
            next,
        }) => {
            let form = EntryForm {
                entry_date: date.unwrap_or_else(input::yesterday),
                revenue,
                orders,
                notes,
            };
            cmd_entry(&store, form, next)
        }
        Some(Commands::Target { value }) => cmd_target(&store, value.as_deref().unwrap_or("")),
        Some(Commands::Dashboard { days, json }) => {
            cmd_dashboard(&store, &config, days.unwrap_or(config.window_days), json)
        }
        Some(Commands::Entries { days, json }) => {
            cmd_entries(&store, &config, days.unwrap_or(config.window_days), json)
        }
        None => cmd_dashboard(&store, &config, config.window_days, false),
    }
}

fn require_business(store: &SqliteStore) -> Result<Business> {
    match store.fetch_business()? {
        Some(business) => Ok(business),
        None => bail!("Nenhum negócio cadastrado. Rode `pulso setup <nome>` primeiro."),
    }
}

fn cmd_setup(store: &SqliteStore, name: &str, target: &str) -> Result<()> {
    let name = input::parse_business_name(name)?;
    let target = input::parse_target(target)?;
    if let Some(existing) = store.fetch_business()? {
        bail!(
            "Negócio já cadastrado: {}. Use `pulso rename` para alterar o nome.",
            existing.name
        );
    }
    let owner = std::env::var("USER").unwrap_or_else(|_| "local".to_string());
    let business = store.create_business(&owner, &name)?;
    store.upsert_settings(&business.id, target)?;
    info!("Business registered: {}", business.id);
    println!("Negócio criado: {}", business.name);
    if let Some(target) = target {
        println!("Meta mensal: {}", format_brl(target));
    }
    Ok(())
}

fn cmd_rename(store: &SqliteStore, name: &str) -> Result<()> {
    let name = input::parse_business_name(name)?;
    let business = require_business(store)?;
    store.rename_business(&business.id, &name)?;
    println!("Nome atualizado: {}", name);
    Ok(())
}

fn cmd_entry(store: &SqliteStore, form: EntryForm, next: bool) -> Result<()> {
    let business = require_business(store)?;
    let entry = form.validate(&business.id)?;
    store.upsert_entry(&entry)?;

    println!("Salvo {} em {}", format_brl(entry.revenue), entry.entry_date);
    if next {
        let following = input::add_days(&entry.entry_date, 1)?;
        println!("Próximo dia: pulso entry --date {} --revenue ...", following);
    }
    Ok(())
}

fn cmd_target(store: &SqliteStore, value: &str) -> Result<()> {
    let business = require_business(store)?;
    let target = input::parse_target(value)?;
    store.upsert_settings(&business.id, target)?;

    match target {
        Some(target) => println!("Meta mensal: {}", format_brl(target)),
        None => println!("Meta mensal removida."),
    }
    Ok(())
}

fn cmd_dashboard(store: &SqliteStore, config: &Config, days: u32, json: bool) -> Result<()> {
    let business = require_business(store)?;
    let view = DashboardView::load(store, &business.id, days)?;

    if json {
        let output = serde_json::json!({
            "business": business,
            "windowDays": days,
            "dashboard": view,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let colors = Colors::for_mode(config.color);
    print!("{}", render_dashboard(&view, &business.name, &colors));
    Ok(())
}

fn cmd_entries(store: &SqliteStore, config: &Config, days: u32, json: bool) -> Result<()> {
    let business = require_business(store)?;
    let entries = store.fetch_entries(&business.id, days)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let colors = Colors::for_mode(config.color);
    println!(
        "{}",
        section_header(&format!("Lançamentos ({} dias)", days), &colors)
    );
    if entries.is_empty() {
        println!("  {}Nenhum lançamento ainda.{}", colors.dim, colors.reset);
    }
    for entry in entries.iter().rev() {
        println!("{}", format_entry_row(entry, &colors));
    }
    Ok(())
}
