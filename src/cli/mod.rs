pub mod expenses;
pub mod import;
pub mod init;
pub mod report;
pub mod status;

use clap::{Parser, Subcommand};

use crate::db::SqliteStore;
use crate::error::Result;
use crate::settings::get_data_dir;

pub(crate) fn open_store() -> Result<SqliteStore> {
    SqliteStore::open(&get_data_dir().join("penny.db"))
}

#[derive(Parser)]
#[command(name = "penny", about = "Personal expense tracker with Presentbin mobile import.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up Penny: choose a data directory and initialize the database.
    Init {
        /// Path for Penny data (default: ~/Documents/penny)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Record an expense manually.
    Add {
        /// Amount in major units, e.g. 12.50
        #[arg(long)]
        amount: String,
        /// ISO-style currency code, e.g. USD
        #[arg(long)]
        currency: String,
        /// Category label, e.g. Food
        #[arg(long)]
        category: String,
        /// Free-text note (blank gets a placeholder)
        #[arg(long, default_value = "")]
        note: String,
        /// Transaction date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Transaction time: HH:MM (default: now)
        #[arg(long)]
        time: Option<String>,
    },
    /// List all recorded expenses, newest first.
    List,
    /// Update an expense by id. Omitted fields keep their current value.
    Update {
        id: i64,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        currency: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        note: Option<String>,
        /// Transaction date: YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        /// Transaction time: HH:MM
        #[arg(long)]
        time: Option<String>,
    },
    /// Delete an expense by id.
    Delete { id: i64 },
    /// Import a Presentbin JSON export (use "-" to read stdin).
    Import {
        /// Path to the JSON file
        file: String,
    },
    /// Show expenses and per-currency totals for a time window.
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Show current database and summary statistics.
    Status,
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// The current calendar day.
    Today,
    /// A specific day.
    Day {
        /// Date: YYYY-MM-DD
        date: String,
    },
    /// A specific month.
    Month {
        /// Month: YYYY-MM
        month: String,
    },
}
