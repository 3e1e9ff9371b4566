mod cli;
mod db;
mod error;
mod fingerprint;
mod fmt;
mod models;
mod parser;
mod reconcile;
mod reports;
mod settings;
mod store;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands, ReportCommands};

fn main() {
    let args = Cli::parse();

    let result = match args.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Add {
            amount,
            currency,
            category,
            note,
            date,
            time,
        } => cli::expenses::add(
            &amount,
            &currency,
            &category,
            &note,
            date.as_deref(),
            time.as_deref(),
        ),
        Commands::List => cli::expenses::list(),
        Commands::Update {
            id,
            amount,
            currency,
            category,
            note,
            date,
            time,
        } => cli::expenses::update(
            id,
            amount.as_deref(),
            currency.as_deref(),
            category.as_deref(),
            note.as_deref(),
            date.as_deref(),
            time.as_deref(),
        ),
        Commands::Delete { id } => cli::expenses::delete(id),
        Commands::Import { file } => cli::import::run(&file),
        Commands::Report { command } => match command {
            ReportCommands::Today => cli::report::today(),
            ReportCommands::Day { date } => cli::report::day(&date),
            ReportCommands::Month { month } => cli::report::month(&month),
        },
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("{} {e}", "Error:".red());
        std::process::exit(1);
    }
}
